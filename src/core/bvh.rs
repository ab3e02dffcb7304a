// Copyright @yucwang 2026

use crate::core::shape::{BvhLeaf, LeafHit};
use crate::math::aabb::AABB;
use crate::math::constants::{Float, Vector3f};
use crate::math::ray::Ray3f;

const SAH_BUCKETS: usize = 12;
const DEFAULT_MAX_LEAF_SIZE: usize = 4;

#[derive(Debug, Clone)]
enum BVHNode {
    Leaf { bounds: AABB, start: usize, count: usize },
    Interior { bounds: AABB, left: usize, right: usize },
}

impl BVHNode {
    fn bounds(&self) -> &AABB {
        match self {
            BVHNode::Leaf { bounds, .. } | BVHNode::Interior { bounds, .. } => bounds,
        }
    }
}

#[derive(Clone, Copy)]
struct Bucket {
    count: usize,
    bounds: AABB,
}

/// Bounding volume hierarchy over primitive indices. Holds no geometry; hits
/// are resolved through callbacks or a `BvhLeaf` implementation.
pub struct BVH {
    nodes: Vec<BVHNode>,
    indices: Vec<usize>,
    prim_bounds: Vec<AABB>,
    prim_centroids: Vec<Vector3f>,
    max_leaf_size: usize,
}

impl BVH {
    pub fn new(prim_bounds: Vec<AABB>, prim_centroids: Vec<Vector3f>) -> Self {
        Self::with_max_leaf_size(prim_bounds, prim_centroids, DEFAULT_MAX_LEAF_SIZE)
    }

    pub fn from_leaves<L: BvhLeaf + ?Sized>(leaves: &L) -> Self {
        let prim_bounds: Vec<AABB> = (0..leaves.leaf_count()).map(|i| leaves.leaf_bounds(i)).collect();
        let prim_centroids = prim_bounds.iter().map(|b| b.center()).collect();
        Self::new(prim_bounds, prim_centroids)
    }

    pub fn with_max_leaf_size(prim_bounds: Vec<AABB>, prim_centroids: Vec<Vector3f>, max_leaf_size: usize) -> Self {
        let prim_count = prim_bounds.len();
        let mut bvh = Self {
            nodes: Vec::with_capacity(2 * prim_count),
            indices: (0..prim_count).collect(),
            prim_bounds,
            prim_centroids,
            max_leaf_size: max_leaf_size.max(1),
        };
        if prim_count > 0 {
            bvh.build(0, prim_count);
        }
        bvh
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Closest hit reported by `hit_fn`, which returns a payload and its `t`.
    /// The ray handed to `hit_fn` is clipped to the closest hit found so far.
    pub fn ray_intersection<F, T>(&self, ray: &Ray3f, mut hit_fn: F) -> Option<(usize, T)>
    where
        F: FnMut(usize, &Ray3f) -> Option<(T, Float)>,
    {
        let mut closest: Option<(usize, T)> = None;
        self.traverse(|prims, clipped| {
            for &prim_idx in prims {
                if let Some((hit, t)) = hit_fn(prim_idx, clipped) {
                    if t < clipped.max_t() {
                        *clipped = clipped.with_max_t(t);
                        closest = Some((prim_idx, hit));
                    }
                }
            }
            false
        }, ray);
        closest
    }

    /// True as soon as `hit_fn` accepts any primitive.
    pub fn ray_intersection_t<F>(&self, ray: &Ray3f, mut hit_fn: F) -> bool
    where
        F: FnMut(usize, &Ray3f) -> bool,
    {
        self.traverse(|prims, clipped| prims.iter().any(|&prim_idx| hit_fn(prim_idx, clipped)), ray)
    }

    pub fn closest_leaf<L: BvhLeaf + ?Sized>(&self, leaves: &L, ray: &Ray3f) -> Option<(usize, LeafHit)> {
        self.ray_intersection(ray, |prim_idx, ray| {
            leaves.leaf_intersection(prim_idx, ray).map(|hit| (hit, hit.t))
        })
    }

    pub fn any_leaf<L: BvhLeaf + ?Sized>(&self, leaves: &L, ray: &Ray3f) -> bool {
        self.ray_intersection_t(ray, |prim_idx, ray| leaves.leaf_intersection(prim_idx, ray).is_some())
    }

    /// Depth-first walk over the nodes whose bounds the (possibly clipped)
    /// ray overlaps. `visit` gets the primitive indices of each reached leaf
    /// and may shorten the ray; returning true stops the walk.
    fn traverse<V>(&self, mut visit: V, ray: &Ray3f) -> bool
    where
        V: FnMut(&[usize], &mut Ray3f) -> bool,
    {
        if self.nodes.is_empty() {
            return false;
        }

        let mut clipped = *ray;
        let mut stack = vec![0usize];
        while let Some(node_idx) = stack.pop() {
            let node = &self.nodes[node_idx];
            if !node.bounds().ray_intersect(&clipped) {
                continue;
            }
            match *node {
                BVHNode::Leaf { start, count, .. } => {
                    if visit(&self.indices[start..start + count], &mut clipped) {
                        return true;
                    }
                }
                BVHNode::Interior { left, right, .. } => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
        false
    }

    /// Builds the subtree over `indices[start..end]` and returns its node index.
    fn build(&mut self, start: usize, end: usize) -> usize {
        let (bounds, centroid_bounds) = self.compute_bounds(start, end);
        let node_idx = self.nodes.len();
        self.nodes.push(BVHNode::Leaf { bounds, start, count: end - start });

        if end - start <= self.max_leaf_size {
            return node_idx;
        }
        let mid = match self.split_sah(start, end, &bounds, &centroid_bounds) {
            Some(mid) => mid,
            None => return node_idx,
        };

        let left = self.build(start, mid);
        let right = self.build(mid, end);
        self.nodes[node_idx] = BVHNode::Interior { bounds, left, right };
        node_idx
    }

    /// Partitions `indices[start..end]` at the cheapest bucket boundary along
    /// the widest centroid axis. `None` means a leaf is at least as cheap.
    fn split_sah(&mut self, start: usize, end: usize, bounds: &AABB, centroid_bounds: &AABB) -> Option<usize> {
        let axis = centroid_bounds.max_extent();
        let lo = centroid_bounds.p_min[axis];
        let extent = centroid_bounds.p_max[axis] - lo;
        if extent.abs() < 1e-6 {
            return None;
        }
        let bucket_of = |centroid: &Vector3f| {
            (((centroid[axis] - lo) / extent * SAH_BUCKETS as Float) as usize).min(SAH_BUCKETS - 1)
        };

        let mut buckets = [Bucket { count: 0, bounds: AABB::default() }; SAH_BUCKETS];
        for &idx in &self.indices[start..end] {
            let bucket = &mut buckets[bucket_of(&self.prim_centroids[idx])];
            bucket.count += 1;
            bucket.bounds.expand_by_aabb(&self.prim_bounds[idx]);
        }

        // Sweep from the right so every split sees its right-hand cost in O(1).
        let mut right_cost = [0.0 as Float; SAH_BUCKETS];
        let mut acc = Bucket { count: 0, bounds: AABB::default() };
        for b in (1..SAH_BUCKETS).rev() {
            acc.count += buckets[b].count;
            acc.bounds.expand_by_aabb(&buckets[b].bounds);
            right_cost[b] = side_cost(&acc);
        }

        let inv_area = 1.0 / bounds.surface_area().max(1e-6);
        let mut best: Option<(usize, Float)> = None;
        let mut acc = Bucket { count: 0, bounds: AABB::default() };
        for b in 0..SAH_BUCKETS - 1 {
            acc.count += buckets[b].count;
            acc.bounds.expand_by_aabb(&buckets[b].bounds);
            let cost = 1.0 + (side_cost(&acc) + right_cost[b + 1]) * inv_area;
            if best.map_or(true, |(_, c)| cost < c) {
                best = Some((b, cost));
            }
        }

        let (split_bucket, cost) = best?;
        if cost >= (end - start) as Float {
            return None;
        }

        let mut mid = start;
        for i in start..end {
            let idx = self.indices[i];
            if bucket_of(&self.prim_centroids[idx]) <= split_bucket {
                self.indices.swap(i, mid);
                mid += 1;
            }
        }

        if mid == start || mid == end {
            None
        } else {
            Some(mid)
        }
    }

    fn compute_bounds(&self, start: usize, end: usize) -> (AABB, AABB) {
        let mut bounds = AABB::default();
        let mut centroid_bounds = AABB::default();
        for &idx in &self.indices[start..end] {
            bounds.expand_by_aabb(&self.prim_bounds[idx]);
            centroid_bounds.expand_by_point(&self.prim_centroids[idx]);
        }
        (bounds, centroid_bounds)
    }
}

fn side_cost(bucket: &Bucket) -> Float {
    if bucket.count == 0 {
        0.0
    } else {
        bucket.count as Float * bucket.bounds.surface_area()
    }
}

#[cfg(test)]
mod tests {
    use super::BVH;
    use crate::core::shape::{BvhLeaf, LeafHit};
    use crate::math::aabb::AABB;
    use crate::math::constants::{Float, Vector3f};
    use crate::math::ray::Ray3f;
    use crate::shapes::triangle::Triangle;

    struct Soup(Vec<Triangle>);

    impl BvhLeaf for Soup {
        fn leaf_count(&self) -> usize {
            self.0.len()
        }

        fn leaf_bounds(&self, index: usize) -> AABB {
            self.0[index].bounding_box()
        }

        fn leaf_intersection(&self, index: usize, ray: &Ray3f) -> Option<LeafHit> {
            self.0[index].ray_intersection(ray)
        }
    }

    fn row_of_triangles() -> Soup {
        let mut tris = Vec::new();
        for i in 0..8 {
            let x = i as Float * 2.0;
            let p0 = Vector3f::new(x, 0.0, 0.0);
            let p1 = Vector3f::new(x + 0.5, 0.0, 0.0);
            let p2 = Vector3f::new(x, 0.5, 0.0);
            tris.push(Triangle::new(p0, p1, p2));
        }
        Soup(tris)
    }

    fn naive_closest(soup: &Soup, ray: &Ray3f) -> Option<(usize, Float)> {
        let mut best: Option<(usize, Float)> = None;
        for i in 0..soup.leaf_count() {
            if let Some(hit) = soup.leaf_intersection(i, ray) {
                if best.map_or(true, |(_, t)| hit.t < t) {
                    best = Some((i, hit.t));
                }
            }
        }
        best
    }

    #[test]
    fn test_bvh_vs_naive_triangles() {
        let soup = row_of_triangles();
        let bvh = BVH::from_leaves(&soup);
        assert!(bvh.node_count() > 0);

        for i in 0..soup.leaf_count() {
            let origin = Vector3f::new(i as Float * 2.0 + 0.1, 0.1, 1.0);
            let ray = Ray3f::new(origin, Vector3f::new(0.0, 0.0, -1.0), None, None);

            let (bvh_idx, bvh_hit) = bvh.closest_leaf(&soup, &ray).expect("BVH miss");
            let (naive_idx, naive_t) = naive_closest(&soup, &ray).expect("naive miss");
            assert_eq!(bvh_idx, naive_idx);
            assert!((bvh_hit.t - naive_t).abs() < 1e-5);
            assert!(bvh.any_leaf(&soup, &ray));
        }

        let miss_ray = Ray3f::new(Vector3f::new(100.0, 100.0, 1.0), Vector3f::new(0.0, 0.0, -1.0), None, None);
        assert!(bvh.closest_leaf(&soup, &miss_ray).is_none());
        assert!(!bvh.any_leaf(&soup, &miss_ray));
    }

    #[test]
    fn test_closest_of_stacked_layers() {
        let mut tris = Vec::new();
        for layer in 0..20 {
            let z = layer as Float * 0.5;
            tris.push(Triangle::new(Vector3f::new(-1.0, -1.0, z),
                                    Vector3f::new(1.0, -1.0, z),
                                    Vector3f::new(0.0, 1.0, z)));
        }
        let soup = Soup(tris);
        let bvh = BVH::from_leaves(&soup);

        let down = Ray3f::new(Vector3f::new(0.0, 0.0, 20.0), Vector3f::new(0.0, 0.0, -1.0), None, None);
        let (idx, hit) = bvh.closest_leaf(&soup, &down).expect("hit");
        assert_eq!(idx, 19);
        assert!((hit.t - 10.5).abs() < 1e-4);

        let up = Ray3f::new(Vector3f::new(0.0, 0.0, -5.0), Vector3f::new(0.0, 0.0, 1.0), None, None);
        let (idx, _) = bvh.closest_leaf(&soup, &up).expect("hit");
        assert_eq!(idx, 0);
    }

    #[test]
    fn test_empty_hierarchy() {
        let soup = Soup(Vec::new());
        let bvh = BVH::from_leaves(&soup);
        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, 1.0), None, None);
        assert!(bvh.closest_leaf(&soup, &ray).is_none());
        assert!(!bvh.any_leaf(&soup, &ray));
    }
}

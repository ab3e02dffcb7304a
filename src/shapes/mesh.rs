// Copyright @yucwang 2023

use super::triangle::Triangle;

use crate::core::bvh::BVH;
use crate::core::interaction::SurfaceInfo;
use crate::core::shape::{ BvhLeaf, Intersectable, LeafHit };
use crate::math::aabb::AABB;
use crate::math::constants::{ Float, Vector2f, Vector3f, Vector4f };
use crate::math::frame::basis_from_normal;
use crate::math::ray::Ray3f;

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    pub indices: [usize; 3],
    pub material_id: usize,
}

/// Per-vertex attribute sets a mesh can interpolate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexAttribute {
    Position,
    Normal,
    Tangent,
    TexCoord(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MeshError {
    IndexOutOfRange { face: usize, index: usize },
    AttributeLength { attribute: &'static str, expected: usize, found: usize },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshError::IndexOutOfRange { face, index } => {
                write!(f, "face {} references missing vertex {}", face, index)
            }
            MeshError::AttributeLength { attribute, expected, found } => {
                write!(f, "{} has {} entries, expected {}", attribute, found, expected)
            }
        }
    }
}

impl std::error::Error for MeshError {}

/// Indexed triangle mesh with optional normals, tangents and any number of
/// UV channels. Call `build` after the last face is added.
pub struct Mesh {
    positions: Vec<Vector3f>,
    normals: Vec<Vector3f>,
    tangents: Vec<Vector4f>,
    uv_channels: Vec<Vec<Vector2f>>,
    faces: Vec<Face>,
    face_normals: Vec<Vector3f>,
    face_tangents: Vec<Vector4f>,
    bvh: Option<BVH>,
}

impl Mesh {
    pub fn new(positions: Vec<Vector3f>) -> Self {
        Self {
            positions,
            normals: Vec::new(),
            tangents: Vec::new(),
            uv_channels: Vec::new(),
            faces: Vec::new(),
            face_normals: Vec::new(),
            face_tangents: Vec::new(),
            bvh: None,
        }
    }

    pub fn with_normals(mut self, normals: Vec<Vector3f>) -> Self {
        self.normals = normals;
        self
    }

    /// `w` of each tangent carries the bitangent sign.
    pub fn with_tangents(mut self, tangents: Vec<Vector4f>) -> Self {
        self.tangents = tangents;
        self
    }

    pub fn with_uv_channel(mut self, uvs: Vec<Vector2f>) -> Self {
        self.uv_channels.push(uvs);
        self
    }

    pub fn add_face(&mut self, indices: [usize; 3], material_id: usize) -> usize {
        self.faces.push(Face { indices, material_id });
        self.faces.len() - 1
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn uv_channel_count(&self) -> usize {
        self.uv_channels.len()
    }

    pub fn is_built(&self) -> bool {
        self.bvh.is_some()
    }

    pub fn face_normal(&self, face: usize) -> Option<Vector3f> {
        self.face_normals.get(face).cloned()
    }

    pub fn face_tangent(&self, face: usize) -> Option<Vector4f> {
        self.face_tangents.get(face).cloned()
    }

    pub fn surface_area(&self) -> Float {
        (0..self.faces.len()).filter_map(|i| self.triangle(i)).map(|t| t.surface_area()).sum()
    }

    /// `None` for a missing face or one referencing a missing vertex.
    pub fn triangle(&self, face: usize) -> Option<Triangle> {
        let [a, b, c] = self.faces.get(face)?.indices;
        Some(Triangle::new(*self.positions.get(a)?, *self.positions.get(b)?, *self.positions.get(c)?))
    }

    /// Validates indices and attribute lengths, then computes per-face
    /// normals and tangents and the acceleration structure.
    pub fn build(&mut self) -> Result<(), MeshError> {
        let n = self.positions.len();
        for (face_idx, face) in self.faces.iter().enumerate() {
            if let Some(&index) = face.indices.iter().find(|&&i| i >= n) {
                return Err(MeshError::IndexOutOfRange { face: face_idx, index });
            }
        }
        check_length("normals", &self.normals, n)?;
        check_length("tangents", &self.tangents, n)?;
        for uvs in &self.uv_channels {
            check_length("uv channel", uvs, n)?;
        }

        self.face_normals = (0..self.faces.len())
            .map(|i| {
                self.triangle(i)
                    .and_then(|t| t.area_normal().try_normalize(0.0))
                    .unwrap_or_else(Vector3f::zeros)
            })
            .collect();
        self.face_tangents = (0..self.faces.len())
            .map(|i| self.compute_face_tangent(i, &self.face_normals[i]))
            .collect();
        self.bvh = Some(BVH::from_leaves(self));

        log::debug!("mesh built: {} vertices, {} faces, {} uv channels",
                    self.positions.len(), self.faces.len(), self.uv_channels.len());
        Ok(())
    }

    /// Weighted blend of `attribute` over the vertices of `face`. Three-component
    /// attributes come back with `w = 0`; UVs occupy `x` and `y`.
    pub fn interpolate_attribute(&self, face: usize, attribute: VertexAttribute, bary: &Vector3f) -> Option<Vector4f> {
        let indices = self.faces.get(face)?.indices;
        let blend = |values: [Vector4f; 3]| values[0] * bary.x + values[1] * bary.y + values[2] * bary.z;

        match attribute {
            VertexAttribute::Position => {
                Some(blend(gather(&self.positions, indices, |p| Vector4f::new(p.x, p.y, p.z, 0.0))?))
            }
            VertexAttribute::Normal => {
                Some(blend(gather(&self.normals, indices, |n| Vector4f::new(n.x, n.y, n.z, 0.0))?))
            }
            VertexAttribute::Tangent => Some(blend(gather(&self.tangents, indices, |t| *t)?)),
            VertexAttribute::TexCoord(channel) => {
                let uvs = self.uv_channels.get(channel)?;
                Some(blend(gather(uvs, indices, |uv| Vector4f::new(uv.x, uv.y, 0.0, 0.0))?))
            }
        }
    }

    /// Tangent along increasing `u` of the first UV channel, or an arbitrary
    /// direction perpendicular to `normal` when there is no usable mapping.
    fn compute_face_tangent(&self, face: usize, normal: &Vector3f) -> Vector4f {
        if normal.norm_squared() == 0.0 {
            return Vector4f::new(1.0, 0.0, 0.0, 1.0);
        }
        let normal = *normal;
        let fallback = || {
            let (t, _) = basis_from_normal(&normal);
            Vector4f::new(t.x, t.y, t.z, 1.0)
        };

        let uvs = match self.uv_channels.first() {
            Some(uvs) => uvs,
            None => return fallback(),
        };

        let (p0, p1, p2) = match self.triangle(face) {
            Some(t) => t.vertices(),
            None => return fallback(),
        };
        let [a, b, c] = self.faces[face].indices;
        let (uv0, uv1, uv2) = match (uvs.get(a), uvs.get(b), uvs.get(c)) {
            (Some(uv0), Some(uv1), Some(uv2)) => (uv0, uv1, uv2),
            _ => return fallback(),
        };
        let e1 = p1 - p0;
        let e2 = p2 - p0;
        let duv1 = uv1 - uv0;
        let duv2 = uv2 - uv0;
        let det = duv1.x * duv2.y - duv2.x * duv1.y;
        if det.abs() < 1e-12 {
            return fallback();
        }

        let r = 1.0 / det;
        let t = (e1 * duv2.y - e2 * duv1.y) * r;
        let b = (e2 * duv1.x - e1 * duv2.x) * r;
        let t = match (t - normal * normal.dot(&t)).try_normalize(1e-12) {
            Some(t) => t,
            None => return fallback(),
        };
        let w = if normal.cross(&t).dot(&b) < 0.0 { -1.0 } else { 1.0 };
        Vector4f::new(t.x, t.y, t.z, w)
    }

    fn surface_at(&self, face: usize, hit: &LeafHit, ray: &Ray3f) -> SurfaceInfo {
        let geo_n = self.face_normal(face)
            .or_else(|| self.triangle(face).map(|t| t.geometric_normal()))
            .unwrap_or_else(Vector3f::zeros);
        let face_tangent = self.face_tangent(face).unwrap_or_else(|| self.compute_face_tangent(face, &geo_n));

        let mut sh_n = self.interpolate_attribute(face, VertexAttribute::Normal, &hit.bary)
            .and_then(|n| n.xyz().try_normalize(1e-12))
            .unwrap_or(geo_n);
        if sh_n.dot(&geo_n) < 0.0 {
            sh_n = -sh_n;
        }

        let tangent = match self.interpolate_attribute(face, VertexAttribute::Tangent, &hit.bary) {
            Some(t) => {
                let w = self.tangents[self.faces[face].indices[0]].w;
                let xyz = t.xyz().try_normalize(1e-12).unwrap_or_else(|| face_tangent.xyz());
                Vector4f::new(xyz.x, xyz.y, xyz.z, if w < 0.0 { -1.0 } else { 1.0 })
            }
            None => face_tangent,
        };

        let uvs = (0..self.uv_channels.len())
            .filter_map(|channel| self.interpolate_attribute(face, VertexAttribute::TexCoord(channel), &hit.bary))
            .map(|uv| Vector2f::new(uv.x, uv.y))
            .collect();

        SurfaceInfo::new(ray.at(hit.t), geo_n, hit.t)
            .with_sh_normal(sh_n)
            .with_tangent(tangent)
            .with_uvs(uvs)
            .with_material_id(Some(self.faces[face].material_id))
            .with_face_index(Some(face))
    }

    fn closest_face(&self, ray: &Ray3f) -> Option<(usize, LeafHit)> {
        match &self.bvh {
            Some(bvh) => bvh.closest_leaf(self, ray),
            None => {
                let mut closest: Option<(usize, LeafHit)> = None;
                for face in 0..self.faces.len() {
                    if let Some(hit) = self.leaf_intersection(face, ray) {
                        if closest.map_or(true, |(_, c)| hit.t < c.t) {
                            closest = Some((face, hit));
                        }
                    }
                }
                closest
            }
        }
    }
}

fn check_length<T>(attribute: &'static str, values: &[T], expected: usize) -> Result<(), MeshError> {
    if values.is_empty() || values.len() == expected {
        Ok(())
    } else {
        Err(MeshError::AttributeLength { attribute, expected, found: values.len() })
    }
}

fn gather<T, F>(values: &[T], indices: [usize; 3], f: F) -> Option<[Vector4f; 3]>
where
    F: Fn(&T) -> Vector4f,
{
    Some([f(values.get(indices[0])?), f(values.get(indices[1])?), f(values.get(indices[2])?)])
}

impl BvhLeaf for Mesh {
    fn leaf_count(&self) -> usize {
        self.faces.len()
    }

    fn leaf_bounds(&self, index: usize) -> AABB {
        self.triangle(index).map(|t| t.bounding_box()).unwrap_or_default()
    }

    fn leaf_intersection(&self, index: usize, ray: &Ray3f) -> Option<LeafHit> {
        self.triangle(index)?.ray_intersection(ray)
    }
}

impl Intersectable for Mesh {
    fn bounding_box(&self) -> AABB {
        AABB::from_points(&self.positions)
    }

    fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceInfo> {
        self.closest_face(ray).map(|(face, hit)| self.surface_at(face, &hit, ray))
    }

    fn ray_intersection_t(&self, ray: &Ray3f) -> bool {
        match &self.bvh {
            Some(bvh) => bvh.any_leaf(self, ray),
            None => (0..self.faces.len()).any(|face| self.leaf_intersection(face, ray).is_some()),
        }
    }
}

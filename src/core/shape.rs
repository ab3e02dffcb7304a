// Copyright @yucwang 2023

use crate::core::interaction::SurfaceInfo;
use crate::math::aabb::AABB;
use crate::math::constants::{ Float, Vector3f };
use crate::math::ray::Ray3f;

/// Anything a ray can be traced against.
pub trait Intersectable: Send + Sync {
    fn bounding_box(&self) -> AABB;
    /// Closest hit inside the ray's `[min_t, max_t]` segment.
    fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceInfo>;
    /// Any hit inside the segment.
    fn ray_intersection_t(&self, ray: &Ray3f) -> bool;
}

/// Raw hit against a single leaf primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeafHit {
    pub t: Float,
    /// Weights of the primitive's three vertices.
    pub bary: Vector3f,
}

/// A collection of primitives an acceleration structure can index into.
pub trait BvhLeaf {
    fn leaf_count(&self) -> usize;
    fn leaf_bounds(&self, index: usize) -> AABB;
    fn leaf_intersection(&self, index: usize, ray: &Ray3f) -> Option<LeafHit>;
}

// Copyright @yucwang 2023

use crate::core::shape::LeafHit;
use crate::math::aabb::AABB;
use crate::math::constants::{ EPSILON, Float, Vector3f };
use crate::math::ray::Ray3f;

/// A single triangle by value. Meshes build these on the fly from indices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    p0: Vector3f,
    p1: Vector3f,
    p2: Vector3f,
}

impl Triangle {
    pub fn new(p0: Vector3f, p1: Vector3f, p2: Vector3f) -> Self {
        Self { p0, p1, p2 }
    }

    pub fn vertices(&self) -> (Vector3f, Vector3f, Vector3f) {
        (self.p0, self.p1, self.p2)
    }

    pub fn bounding_box(&self) -> AABB {
        let mut bound = AABB::new(self.p0, self.p1);
        bound.expand_by_point(&self.p2);
        bound
    }

    /// Unnormalized `(p1 - p0) x (p2 - p0)`. Zero for degenerate triangles.
    pub fn area_normal(&self) -> Vector3f {
        (self.p1 - self.p0).cross(&(self.p2 - self.p0))
    }

    pub fn geometric_normal(&self) -> Vector3f {
        self.area_normal().normalize()
    }

    pub fn surface_area(&self) -> Float {
        0.5 * self.area_normal().norm()
    }

    /// Two-sided plane hit followed by an inside test.
    pub fn ray_intersection(&self, ray: &Ray3f) -> Option<LeafHit> {
        let area_normal = self.area_normal();
        if area_normal.norm_squared() == 0.0 {
            return None;
        }
        let geo_normal = area_normal.normalize();

        let n_dot_dir = geo_normal.dot(&ray.dir());
        if n_dot_dir > -EPSILON && n_dot_dir < EPSILON {
            return None;
        }

        let plane_d = geo_normal.dot(&self.p0);
        let t = (plane_d - geo_normal.dot(&ray.origin())) / n_dot_dir;
        if !ray.test_segment(t) {
            return None;
        }

        let p = ray.at(t);
        if !self.is_in_triangle(&p) {
            return None;
        }

        Some(LeafHit { t, bary: self.barycentric(&p) })
    }

    fn is_in_triangle(&self, p: &Vector3f) -> bool {
        let geo_normal = self.area_normal();

        let n0 = (self.p1 - self.p0).cross(&(p - self.p0));
        let n1 = (self.p2 - self.p1).cross(&(p - self.p1));
        let n2 = (self.p0 - self.p2).cross(&(p - self.p2));

        n0.dot(&geo_normal) >= 0.0 && n1.dot(&geo_normal) >= 0.0 && n2.dot(&geo_normal) >= 0.0
    }

    /// Weights of `p0`, `p1`, `p2` for a point on the triangle's plane.
    pub fn barycentric(&self, p: &Vector3f) -> Vector3f {
        let v0 = self.p1 - self.p0;
        let v1 = self.p2 - self.p0;
        let v2 = *p - self.p0;

        let d00 = v0.dot(&v0);
        let d01 = v0.dot(&v1);
        let d11 = v1.dot(&v1);
        let d20 = v2.dot(&v0);
        let d21 = v2.dot(&v1);
        let denom = d00 * d11 - d01 * d01;
        if denom.abs() < 1e-12 {
            return Vector3f::new(1.0, 0.0, 0.0);
        }

        let v = (d11 * d20 - d01 * d21) / denom;
        let w = (d00 * d21 - d01 * d20) / denom;
        Vector3f::new(1.0 - v - w, v, w)
    }
}

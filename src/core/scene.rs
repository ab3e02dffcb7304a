// Copyright @yucwang 2026

use crate::core::interaction::SurfaceInfo;
use crate::core::material::Material;
use crate::core::shape::Intersectable;
use crate::math::aabb::AABB;
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

use std::sync::Arc;

/// Geometry plus the material table its faces index into. Read-only while
/// rendering, so it can be shared across worker threads.
pub struct Scene {
    shapes: Vec<Arc<dyn Intersectable>>,
    materials: Vec<Arc<Material>>,
    environment: RGBSpectrum,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self { shapes: Vec::new(), materials: Vec::new(), environment: RGBSpectrum::default() }
    }

    pub fn add_shape(&mut self, shape: Arc<dyn Intersectable>) -> usize {
        self.shapes.push(shape);
        self.shapes.len() - 1
    }

    /// Returns the id faces use to refer to `material`.
    pub fn add_material(&mut self, material: Arc<Material>) -> usize {
        self.materials.push(material);
        self.materials.len() - 1
    }

    pub fn set_environment(&mut self, radiance: RGBSpectrum) {
        self.environment = radiance;
    }

    /// Radiance arriving along any ray that leaves the scene.
    pub fn environment(&self) -> RGBSpectrum {
        self.environment
    }

    pub fn material(&self, id: usize) -> Option<&Material> {
        self.materials.get(id).map(|m| m.as_ref())
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    pub fn bounding_box(&self) -> AABB {
        let mut bound = AABB::default();
        for shape in &self.shapes {
            bound.expand_by_aabb(&shape.bounding_box());
        }
        bound
    }

    /// Nearest hit over all shapes.
    pub fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceInfo> {
        let mut closest: Option<SurfaceInfo> = None;
        let mut current = *ray;
        for shape in &self.shapes {
            if let Some(hit) = shape.ray_intersection(&current) {
                current = current.with_max_t(hit.t());
                closest = Some(hit);
            }
        }
        closest
    }

    pub fn ray_intersection_t(&self, ray: &Ray3f) -> bool {
        self.shapes.iter().any(|shape| shape.ray_intersection_t(ray))
    }
}

// Copyright @yucwang 2026

use crate::core::rng::RandomStream;
use crate::core::scene::Scene;
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

/// Estimates radiance arriving along a ray. Shared by all render workers;
/// each worker brings its own random stream.
pub trait Integrator: Sync {
    fn trace_ray(&self, scene: &Scene, ray: &Ray3f, rng: &mut dyn RandomStream) -> RGBSpectrum;
}

// Copyright @yucwang 2026

use crate::core::bsdf::{same_geometric_side, Bxdf, BxdfEval, BxdfId, ShadingParams};
use crate::core::interaction::SurfaceInfo;
use crate::core::rng::RandomStream;
use crate::math::constants::Vector3f;
use crate::math::spectrum::RGBSpectrum;
use crate::math::warp::DirectionSample;

/// Mirror of `wi` about `n`. Both vectors point the same way as a ray.
pub fn reflect(wi: &Vector3f, n: &Vector3f) -> Vector3f {
    wi - n * (2.0 * wi.dot(n))
}

/// Ideal mirror about the shading normal. Delta lobe: sampling is
/// deterministic and the value cancels the renderer's cosine term.
pub struct PerfectSpecularBxdf;

impl Bxdf for PerfectSpecularBxdf {
    fn id(&self) -> BxdfId {
        BxdfId::Specular
    }

    fn sample(&self, wi: &Vector3f, surface: &SurfaceInfo, _rng: &mut dyn RandomStream) -> DirectionSample {
        DirectionSample::new(reflect(wi, &surface.sh_normal()), 1.0)
    }

    fn eval(&self, wi: &Vector3f, wo: &Vector3f, surface: &SurfaceInfo) -> BxdfEval {
        // A shading normal perpendicular to `wi` has no finite mirror value.
        let cos_i = (-wi).dot(&surface.sh_normal()).abs();
        let value = if cos_i > 0.0 && same_geometric_side(wi, wo, surface) {
            1.0 / cos_i
        } else {
            0.0
        };
        BxdfEval { value, pdf: 1.0 }
    }

    fn filter_color(&self, params: &ShadingParams) -> RGBSpectrum {
        RGBSpectrum::lerp(params.albedo, RGBSpectrum::white(), params.metallic)
    }
}

#[cfg(test)]
mod tests {
    use super::{reflect, PerfectSpecularBxdf};
    use crate::core::bsdf::{Bxdf, ShadingParams};
    use crate::core::interaction::SurfaceInfo;
    use crate::core::rng::LcgRng;
    use crate::math::constants::Vector3f;
    use crate::math::spectrum::RGBSpectrum;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-5, "expected {} ~ {}", a, b);
    }

    #[test]
    fn test_sample_is_mirror_direction() {
        let surface = SurfaceInfo::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, 1.0), 1.0);
        let wi = Vector3f::new(1.0, 0.0, -1.0).normalize();
        let mut rng = LcgRng::new(1);
        let s = PerfectSpecularBxdf.sample(&wi, &surface, &mut rng);
        assert_close(s.dir.x, wi.x);
        assert_close(s.dir.y, 0.0);
        assert_close(s.dir.z, -wi.z);
        assert_eq!(s.pdf, 1.0);
    }

    #[test]
    fn test_eval_cancels_cosine() {
        let n = Vector3f::new(0.0, 0.0, 1.0);
        let surface = SurfaceInfo::new(Vector3f::zeros(), n, 1.0);
        let wi = Vector3f::new(0.6, 0.0, -0.8);
        let wo = reflect(&wi, &n);
        let eval = PerfectSpecularBxdf.eval(&wi, &wo, &surface);
        assert_close(eval.value, 1.0 / 0.8);
        assert_eq!(eval.pdf, 1.0);
    }

    #[test]
    fn test_eval_rejects_leaking_direction() {
        // Shading normal tilted so the mirror direction goes below the surface.
        let surface = SurfaceInfo::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, 1.0), 1.0)
            .with_sh_normal(Vector3f::new(0.8, 0.0, 0.6));
        let wi = Vector3f::new(0.6, 0.0, -0.8);
        let wo = reflect(&wi, &surface.sh_normal());
        assert!(wo.z < 0.0);
        let eval = PerfectSpecularBxdf.eval(&wi, &wo, &surface);
        assert_eq!(eval.value, 0.0);
    }

    #[test]
    fn test_eval_grazing_shading_normal_is_finite() {
        let surface = SurfaceInfo::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, 1.0), 1.0)
            .with_sh_normal(Vector3f::new(0.6, 0.0, 0.8));
        let wi = Vector3f::new(0.8, 0.0, -0.6);
        assert_eq!((-wi).dot(&surface.sh_normal()), 0.0);
        let eval = PerfectSpecularBxdf.eval(&wi, &Vector3f::new(0.0, 0.0, 1.0), &surface);
        assert!(eval.value.is_finite());
        assert_eq!(eval.value, 0.0);
    }

    #[test]
    fn test_filter_blends_towards_white() {
        let albedo = RGBSpectrum::new(0.8, 0.2, 0.2);
        let dielectric = ShadingParams { albedo, metallic: 0.0, roughness: 0.0 };
        let metal = ShadingParams { albedo, metallic: 1.0, roughness: 0.0 };
        assert_eq!(PerfectSpecularBxdf.filter_color(&dielectric), albedo);
        assert_eq!(PerfectSpecularBxdf.filter_color(&metal), RGBSpectrum::white());
    }
}

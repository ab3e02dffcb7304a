// Copyright @yucwang 2023

use crate::core::bsdf::{same_geometric_side, Bxdf, BxdfEval, BxdfId, ShadingParams};
use crate::core::interaction::SurfaceInfo;
use crate::core::rng::RandomStream;
use crate::math::constants::{ INV_PI, Vector3f };
use crate::math::spectrum::RGBSpectrum;
use crate::math::warp::{ sample_cosine_weighted_hemisphere, DirectionSample };

/// Perfectly diffuse reflection, tinted by the surface albedo.
pub struct LambertianDiffuseBxdf;

impl Bxdf for LambertianDiffuseBxdf {
    fn id(&self) -> BxdfId {
        BxdfId::Lambert
    }

    fn sample(&self, wi: &Vector3f, surface: &SurfaceInfo, rng: &mut dyn RandomStream) -> DirectionSample {
        // Sample around the side of the shading normal the ray arrives from.
        let sh_n = surface.sh_normal();
        let s = if wi.dot(&sh_n) > 0.0 { -1.0 } else { 1.0 };
        sample_cosine_weighted_hemisphere(&(sh_n * s), rng)
    }

    fn eval(&self, wi: &Vector3f, wo: &Vector3f, surface: &SurfaceInfo) -> BxdfEval {
        let value = if same_geometric_side(wi, wo, surface) { INV_PI } else { 0.0 };
        // Relative to the cosine-weighted sampling already performed.
        BxdfEval { value, pdf: 1.0 }
    }

    fn filter_color(&self, params: &ShadingParams) -> RGBSpectrum {
        params.albedo
    }
}

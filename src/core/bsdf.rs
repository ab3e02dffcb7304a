// Copyright @yucwang 2023

use crate::core::interaction::SurfaceInfo;
use crate::core::rng::RandomStream;
use crate::math::constants::{ Float, Vector3f };
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;
use crate::math::warp::DirectionSample;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BxdfId {
    Lambert,
    Specular,
    Transmit,
    Ggx,
    Emit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BxdfType {
    Diffuse,
    Specular,
    Transmit,
    Emission,
}

impl BxdfId {
    pub fn bxdf_type(self) -> BxdfType {
        match self {
            BxdfId::Lambert => BxdfType::Diffuse,
            BxdfId::Specular | BxdfId::Ggx => BxdfType::Specular,
            BxdfId::Transmit => BxdfType::Transmit,
            BxdfId::Emit => BxdfType::Emission,
        }
    }
}

/// Surface parameters a lobe needs, already modulated by textures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadingParams {
    pub albedo: RGBSpectrum,
    pub metallic: Float,
    pub roughness: Float,
}

/// Scalar BxDF value and the pdf the lobe reports for it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BxdfEval {
    pub value: Float,
    pub pdf: Float,
}

/// Uniform capability of every implemented scattering lobe.
///
/// `wi` is the incoming ray direction, pointing towards the surface.
pub trait Bxdf: Send + Sync {
    fn id(&self) -> BxdfId;
    fn sample(&self, wi: &Vector3f, surface: &SurfaceInfo, rng: &mut dyn RandomStream) -> DirectionSample;
    fn eval(&self, wi: &Vector3f, wo: &Vector3f, surface: &SurfaceInfo) -> BxdfEval;
    /// Tint multiplying the scalar BxDF value into the final throughput.
    fn filter_color(&self, params: &ShadingParams) -> RGBSpectrum;
}

/// True when `-wi` and `wo` leave the surface into the same half-space of
/// the geometric normal. Keeps perturbed shading normals from leaking light.
pub fn same_geometric_side(wi: &Vector3f, wo: &Vector3f, surface: &SurfaceInfo) -> bool {
    let ng = surface.geo_normal();
    (-wi).dot(&ng) * wo.dot(&ng) > 0.0
}

/// A lobe chosen by a selection policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BxdfSelection {
    pub id: BxdfId,
    /// Reciprocal of the probability that `id` was chosen.
    pub weight: Float,
}

/// Pure function from surface parameters and a random draw to a lobe.
pub type BxdfSelector = fn(&ShadingParams, &mut dyn RandomStream) -> BxdfSelection;

/// Diagnostics for one scattering event. Built fresh per call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvalLog {
    pub selected_bxdf_id: BxdfId,
    pub bxdf_type: BxdfType,
    pub selection_weight: Float,
    pub sample_pdf: Float,
    pub bxdf_pdf: Float,
    /// `sample_pdf * bxdf_pdf`.
    pub pdf: Float,
    pub bxdf_value: Float,
    pub filter_color: RGBSpectrum,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scattering {
    pub ray: Ray3f,
    /// `filter_color * bxdf_value`. Neither the cosine term nor the division
    /// by `log.pdf` is applied; that is left to the integrator.
    pub throughput: RGBSpectrum,
    pub log: EvalLog,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScatterOutcome {
    Scattered(Scattering),
    /// The selected lobe has no scattering implementation. The path ends here.
    NotScattered(BxdfId),
}

impl ScatterOutcome {
    pub fn is_scattered(&self) -> bool {
        matches!(self, ScatterOutcome::Scattered(_))
    }

    pub fn scattering(&self) -> Option<&Scattering> {
        match self {
            ScatterOutcome::Scattered(s) => Some(s),
            ScatterOutcome::NotScattered(_) => None,
        }
    }

    pub fn into_scattering(self) -> Option<Scattering> {
        match self {
            ScatterOutcome::Scattered(s) => Some(s),
            ScatterOutcome::NotScattered(_) => None,
        }
    }
}

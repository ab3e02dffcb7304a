// Copyright @yucwang 2026

use crate::core::bsdf::{BxdfId, BxdfSelection, ShadingParams};
use crate::core::rng::RandomStream;

/// Current policy: every hit scatters diffusely. Draws no randomness.
pub fn select_diffuse(_params: &ShadingParams, _rng: &mut dyn RandomStream) -> BxdfSelection {
    BxdfSelection { id: BxdfId::Lambert, weight: 1.0 }
}

/// Stochastic conductor/dielectric split by metallic factor, then a
/// roughness-based lobe inside the dielectric branch. Opt-in only; materials
/// use `select_diffuse` unless this is installed explicitly.
pub fn select_metallic_roughness(params: &ShadingParams, rng: &mut dyn RandomStream) -> BxdfSelection {
    let metallic = params.metallic;
    if rng.next_f32_co() < metallic {
        // TODO: route conductors to the GGX lobe once rough-conductor eval exists.
        BxdfSelection { id: BxdfId::Lambert, weight: 1.0 / metallic }
    } else {
        let weight = 1.0 / (1.0 - metallic);
        let id = if params.roughness == 0.0 {
            BxdfId::Specular
        } else {
            BxdfId::Lambert
        };
        BxdfSelection { id, weight }
    }
}

// Copyright @yucwang 2026

pub mod lambertian_diffuse;
pub mod selection;
pub mod specular;

use crate::core::bsdf::{Bxdf, BxdfId};

use self::lambertian_diffuse::LambertianDiffuseBxdf;
use self::specular::PerfectSpecularBxdf;

static LAMBERT: LambertianDiffuseBxdf = LambertianDiffuseBxdf;
static SPECULAR: PerfectSpecularBxdf = PerfectSpecularBxdf;

/// Implementation for a lobe identity. Transmission, GGX and emission are
/// declared identities with no scattering implementation yet.
pub fn lobe_for(id: BxdfId) -> Option<&'static dyn Bxdf> {
    match id {
        BxdfId::Lambert => Some(&LAMBERT),
        BxdfId::Specular => Some(&SPECULAR),
        BxdfId::Transmit | BxdfId::Ggx | BxdfId::Emit => None,
    }
}

#[cfg(test)]
mod tests {
    use super::lobe_for;
    use crate::core::bsdf::BxdfId;

    #[test]
    fn test_lobe_table() {
        assert_eq!(lobe_for(BxdfId::Lambert).map(|b| b.id()), Some(BxdfId::Lambert));
        assert_eq!(lobe_for(BxdfId::Specular).map(|b| b.id()), Some(BxdfId::Specular));
        assert!(lobe_for(BxdfId::Transmit).is_none());
        assert!(lobe_for(BxdfId::Ggx).is_none());
        assert!(lobe_for(BxdfId::Emit).is_none());
    }
}

// Copyright @yucwang 2026

use crate::core::bsdf::ScatterOutcome;
use crate::core::integrator::Integrator;
use crate::core::rng::RandomStream;
use crate::core::scene::Scene;
use crate::math::constants::RAY_EPSILON;
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

/// Upper bound on alpha pass-throughs along one path.
const MAX_PASS_THROUGHS: u32 = 256;

/// Unidirectional path tracer without light sampling. Radiance comes from
/// emissive surfaces hit along the path and from the environment once the
/// path escapes.
pub struct PathIntegrator {
    /// Maximum number of scattering events per path. Alpha pass-throughs
    /// do not count.
    pub max_depth: u32,
}

impl PathIntegrator {
    pub fn new(max_depth: u32) -> Self {
        Self { max_depth }
    }
}

impl Integrator for PathIntegrator {
    fn trace_ray(&self, scene: &Scene, ray: &Ray3f, rng: &mut dyn RandomStream) -> RGBSpectrum {
        let mut radiance = RGBSpectrum::default();
        let mut throughput = RGBSpectrum::white();
        let mut ray = *ray;
        let mut bounces = 0;
        let mut pass_throughs = 0;

        loop {
            let hit = match scene.ray_intersection(&ray) {
                Some(hit) => hit,
                None => {
                    radiance += throughput * scene.environment();
                    break;
                }
            };

            let material = match hit.material_id().and_then(|id| scene.material(id)) {
                Some(material) => material,
                None => {
                    log::warn!("hit at {:?} has no material, terminating path", hit.p());
                    break;
                }
            };

            // Partially covered surfaces let the path through unchanged.
            let coverage = material.alpha_coverage(hit.uvs());
            if coverage < 1.0 && rng.next_f32_co() >= coverage {
                pass_throughs += 1;
                if pass_throughs > MAX_PASS_THROUGHS {
                    log::trace!("path exceeded {} pass-throughs", MAX_PASS_THROUGHS);
                    break;
                }
                ray = Ray3f::new(hit.p(), ray.dir(), Some(RAY_EPSILON), None);
                continue;
            }

            radiance += throughput * material.evaluate_emissive(hit.uvs());
            if bounces == self.max_depth {
                break;
            }

            let sh_normal = material.evaluate_normal(hit.uvs(), &hit.sh_normal(), &hit.tangent());
            let surface = hit.with_sh_normal(sh_normal);

            let scattering = match material.evaluate_throughput(&ray, &surface, rng) {
                ScatterOutcome::Scattered(scattering) => scattering,
                ScatterOutcome::NotScattered(_) => break,
            };
            if scattering.log.pdf <= 0.0 {
                break;
            }

            // The chosen lobe stands in for the whole material, so the
            // selection weight cancels against the mixture weight.
            let cos_theta = scattering.ray.dir().dot(&sh_normal).abs();
            throughput *= scattering.throughput * (cos_theta / scattering.log.pdf);
            if throughput.is_black() {
                break;
            }

            ray = scattering.ray;
            bounces += 1;
        }

        radiance
    }
}

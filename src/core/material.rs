// Copyright @yucwang 2026

use crate::core::bsdf::{BxdfEval, BxdfId, BxdfSelector, EvalLog, ScatterOutcome, Scattering, ShadingParams};
use crate::core::interaction::SurfaceInfo;
use crate::core::rng::RandomStream;
use crate::core::texture::TextureInfo;
use crate::materials::lobe_for;
use crate::materials::selection::select_diffuse;
use crate::math::constants::{ Float, Vector2f, Vector3f, Vector4f, RAY_EPSILON };
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlphaMode {
    Opaque,
    Mask,
    Blend,
}

/// glTF metallic-roughness material.
///
/// Filled in by a scene loader and read-only afterwards, so one instance can
/// be shared by every render worker. Factors are used as given: nothing here
/// clamps them to their nominal ranges.
#[derive(Clone)]
pub struct Material {
    pub name: String,
    pub asset_id: i32,

    pub base_color_texture: TextureInfo,
    pub base_color_factor: RGBSpectrum,
    pub base_color_alpha: Float,
    /// Metallic scales with the red channel, roughness with the green one.
    pub metallic_roughness_texture: TextureInfo,
    pub metallic_factor: Float,
    pub roughness_factor: Float,

    pub normal_texture: TextureInfo,
    pub occlusion_texture: TextureInfo,
    pub emissive_texture: TextureInfo,
    pub emissive_factor: RGBSpectrum,
    pub emissive_strength: Float,

    pub alpha_mode: AlphaMode,
    pub alpha_cutoff: Float,
    pub double_sided: bool,

    // Extension parameters. Carried for loaders; no lobe reads them yet.
    pub ior: Float,
    pub transmission_factor: Float,
    /// Red channel.
    pub transmission_texture: TextureInfo,
    pub specular_factor: Float,
    /// Alpha channel.
    pub specular_texture: TextureInfo,
    pub specular_color_factor: RGBSpectrum,
    pub specular_color_texture: TextureInfo,

    pub selector: BxdfSelector,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            asset_id: -1,
            base_color_texture: TextureInfo::default(),
            base_color_factor: RGBSpectrum::white(),
            base_color_alpha: 1.0,
            metallic_roughness_texture: TextureInfo::default(),
            metallic_factor: 1.0,
            roughness_factor: 1.0,
            normal_texture: TextureInfo::default(),
            occlusion_texture: TextureInfo::default(),
            emissive_texture: TextureInfo::default(),
            emissive_factor: RGBSpectrum::default(),
            emissive_strength: 1.0,
            // glTF defaults to OPAQUE and single sided; this renderer does not.
            alpha_mode: AlphaMode::Blend,
            alpha_cutoff: 0.5,
            double_sided: true,
            ior: 1.33,
            transmission_factor: 0.0,
            transmission_texture: TextureInfo::default(),
            specular_factor: 1.0,
            specular_texture: TextureInfo::default(),
            specular_color_factor: RGBSpectrum::white(),
            specular_color_texture: TextureInfo::default(),
            selector: select_diffuse,
        }
    }
}

impl fmt::Debug for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Material")
            .field("name", &self.name)
            .field("asset_id", &self.asset_id)
            .field("base_color_factor", &self.base_color_factor)
            .field("base_color_texture", &self.base_color_texture)
            .field("metallic_factor", &self.metallic_factor)
            .field("roughness_factor", &self.roughness_factor)
            .field("emissive_factor", &self.emissive_factor)
            .field("alpha_mode", &self.alpha_mode)
            .finish()
    }
}

impl Material {
    pub fn new(name: &str, asset_id: i32) -> Self {
        Self { name: name.to_string(), asset_id, ..Self::default() }
    }

    /// Scatters `ray` at `surface`: picks a lobe, samples the next direction
    /// and evaluates the lobe for it.
    ///
    /// The returned throughput is `filter_color * bxdf_value`. It carries no
    /// cosine factor and is not divided by `log.pdf`; the caller owns that
    /// normalisation. Lobes without an implementation yield
    /// `ScatterOutcome::NotScattered`.
    pub fn evaluate_throughput(&self, ray: &Ray3f, surface: &SurfaceInfo, rng: &mut dyn RandomStream) -> ScatterOutcome {
        let params = self.shading_params(surface.uvs());
        let selection = (self.selector)(&params, rng);

        let lobe = match lobe_for(selection.id) {
            Some(lobe) => lobe,
            None => {
                log::trace!("material {}: lobe {:?} does not scatter", self.name, selection.id);
                return ScatterOutcome::NotScattered(selection.id);
            }
        };

        let sample = lobe.sample(&ray.dir(), surface, rng);
        let next = Ray3f::new(surface.p(), sample.dir, Some(RAY_EPSILON), None);
        let eval = lobe.eval(&ray.dir(), &next.dir(), surface);
        let filter_color = lobe.filter_color(&params);

        let log = EvalLog {
            selected_bxdf_id: selection.id,
            bxdf_type: selection.id.bxdf_type(),
            selection_weight: selection.weight,
            sample_pdf: sample.pdf,
            bxdf_pdf: eval.pdf,
            pdf: sample.pdf * eval.pdf,
            bxdf_value: eval.value,
            filter_color,
        };

        ScatterOutcome::Scattered(Scattering {
            ray: next,
            throughput: filter_color * eval.value,
            log,
        })
    }

    /// Value of lobe `bxdf_id` for the pair `(incoming, outgoing)`. Identities
    /// without an implementation evaluate to zero with zero pdf.
    pub fn evaluate_bxdf(&self, incoming: &Ray3f, outgoing: &Ray3f, bxdf_id: BxdfId, surface: &SurfaceInfo) -> BxdfEval {
        match lobe_for(bxdf_id) {
            Some(lobe) => lobe.eval(&incoming.dir(), &outgoing.dir(), surface),
            None => BxdfEval::default(),
        }
    }

    pub fn shading_params(&self, uvs: &[Vector2f]) -> ShadingParams {
        let (metallic, roughness) = self.evaluate_metallic_roughness(uvs);
        ShadingParams {
            albedo: self.evaluate_albedo_color(uvs),
            metallic,
            roughness,
        }
    }

    pub fn evaluate_albedo_color(&self, uvs: &[Vector2f]) -> RGBSpectrum {
        match self.base_color_texture.sample(uvs, true) {
            Some(s) => self.base_color_factor * s.rgb,
            None => self.base_color_factor,
        }
    }

    /// Returns `(metallic, roughness)`.
    pub fn evaluate_metallic_roughness(&self, uvs: &[Vector2f]) -> (Float, Float) {
        match self.metallic_roughness_texture.sample(uvs, false) {
            Some(s) => (self.metallic_factor * s.rgb.r(), self.roughness_factor * s.rgb.g()),
            None => (self.metallic_factor, self.roughness_factor),
        }
    }

    pub fn evaluate_emissive(&self, uvs: &[Vector2f]) -> RGBSpectrum {
        let emit = self.emissive_factor * self.emissive_strength;
        match self.emissive_texture.sample(uvs, false) {
            Some(s) => emit * s.rgb,
            None => emit,
        }
    }

    /// Perturbs the interpolated vertex normal `normal` by the tangent-space
    /// normal map. `tangent.w` carries the bitangent handedness. Without a
    /// normal map `normal` is returned untouched.
    pub fn evaluate_normal(&self, uvs: &[Vector2f], normal: &Vector3f, tangent: &Vector4f) -> Vector3f {
        let s = match self.normal_texture.sample(uvs, false) {
            Some(s) => s,
            None => return *normal,
        };

        let scale = self.normal_texture.scale;
        let map = Vector3f::new((s.rgb.r() * 2.0 - 1.0) * scale,
                                (s.rgb.g() * 2.0 - 1.0) * scale,
                                s.rgb.b() * 2.0 - 1.0);

        let n = normal.normalize();
        let t = tangent.xyz().normalize();
        // cross(t, n) points against the glTF bitangent, hence the minus below.
        let b = t.cross(&n) * tangent.w;

        (t * map.x - b * map.y + n * map.z).normalize()
    }

    /// Base alpha times the base color texture's alpha.
    pub fn evaluate_alpha(&self, uvs: &[Vector2f]) -> Float {
        match self.base_color_texture.sample(uvs, true) {
            Some(s) => self.base_color_alpha * s.alpha,
            None => self.base_color_alpha,
        }
    }

    /// Fraction of light stopped by the surface under the alpha mode.
    pub fn alpha_coverage(&self, uvs: &[Vector2f]) -> Float {
        match self.alpha_mode {
            AlphaMode::Opaque => 1.0,
            AlphaMode::Mask => {
                if self.evaluate_alpha(uvs) >= self.alpha_cutoff { 1.0 } else { 0.0 }
            }
            AlphaMode::Blend => self.evaluate_alpha(uvs),
        }
    }

    /// `1 + strength * (r - 1)`, with the texture's scale as strength.
    pub fn evaluate_occlusion(&self, uvs: &[Vector2f]) -> Float {
        match self.occlusion_texture.sample(uvs, false) {
            Some(s) => 1.0 + self.occlusion_texture.scale * (s.rgb.r() - 1.0),
            None => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AlphaMode, Material};
    use crate::core::bsdf::{BxdfId, BxdfSelection, BxdfType, ScatterOutcome, ShadingParams};
    use crate::core::interaction::SurfaceInfo;
    use crate::core::rng::{LcgRng, RandomStream};
    use crate::core::texture::{Texture, TextureInfo, TextureSample};
    use crate::materials::selection::select_metallic_roughness;
    use crate::materials::specular::reflect;
    use crate::math::constants::{Float, INV_PI, Vector2f, Vector3f, Vector4f};
    use crate::math::ray::Ray3f;
    use crate::math::spectrum::RGBSpectrum;
    use crate::textures::constant::ConstantTexture;
    use std::sync::Arc;

    fn assert_close(a: Float, b: Float) {
        assert!((a - b).abs() < 1e-4, "expected {} ~ {}", a, b);
    }

    /// rgb = (u, v, srgb flag), alpha = u.
    struct UvTexture;

    impl Texture for UvTexture {
        fn describe(&self) -> String {
            String::from("UvTexture")
        }

        fn sample(&self, uv: Vector2f, srgb: bool) -> TextureSample {
            TextureSample::new(RGBSpectrum::new(uv.x, uv.y, if srgb { 1.0 } else { 0.0 }), uv.x)
        }
    }

    fn constant(r: Float, g: Float, b: Float) -> TextureInfo {
        TextureInfo::new(Arc::new(ConstantTexture::new(RGBSpectrum::new(r, g, b))))
    }

    fn red_diffuse() -> Material {
        let mut material = Material::new("red", 0);
        material.base_color_factor = RGBSpectrum::new(0.8, 0.2, 0.2);
        material.metallic_factor = 0.0;
        material.roughness_factor = 1.0;
        material
    }

    fn flat_hit() -> SurfaceInfo {
        SurfaceInfo::new(Vector3f::new(0.0, 0.0, 0.0), Vector3f::new(0.0, 0.0, 1.0), 1.0)
            .with_uvs(vec![Vector2f::new(0.25, 0.75), Vector2f::new(0.5, 0.1)])
    }

    fn down_ray() -> Ray3f {
        Ray3f::new(Vector3f::new(0.0, 0.0, 1.0), Vector3f::new(0.0, 0.0, -1.0), None, None)
    }

    #[test]
    fn test_defaults() {
        let m = Material::default();
        assert_eq!(m.asset_id, -1);
        assert_eq!(m.base_color_factor, RGBSpectrum::white());
        assert_eq!(m.base_color_alpha, 1.0);
        assert_eq!(m.metallic_factor, 1.0);
        assert_eq!(m.roughness_factor, 1.0);
        assert_eq!(m.alpha_mode, AlphaMode::Blend);
        assert_eq!(m.alpha_cutoff, 0.5);
        assert!(m.double_sided);
        assert_eq!(m.ior, 1.33);
        assert_eq!(m.transmission_factor, 0.0);
        assert_eq!(m.specular_color_factor, RGBSpectrum::white());
        assert_eq!(m.emissive_strength, 1.0);
    }

    #[test]
    fn test_diffuse_scenario() {
        let material = red_diffuse();
        let mut rng = LcgRng::new(2023);
        let outcome = material.evaluate_throughput(&down_ray(), &flat_hit(), &mut rng);
        let scattering = outcome.into_scattering().expect("lambert always scatters");

        assert_eq!(scattering.log.selected_bxdf_id, BxdfId::Lambert);
        assert_eq!(scattering.log.bxdf_type, BxdfType::Diffuse);
        assert_close(scattering.log.bxdf_value, 0.3183);
        assert_eq!(scattering.log.filter_color, RGBSpectrum::new(0.8, 0.2, 0.2));
        assert_close(scattering.throughput[0], 0.2546);
        assert_close(scattering.throughput[1], 0.0637);
        assert_close(scattering.throughput[2], 0.0637);
        assert!(scattering.ray.dir().dot(&Vector3f::new(0.0, 0.0, 1.0)) >= 0.0);
        assert_eq!(scattering.ray.origin(), Vector3f::zeros());
        assert_eq!(scattering.log.bxdf_pdf, 1.0);
        assert_close(scattering.log.pdf, scattering.log.sample_pdf);
        assert_close(scattering.log.sample_pdf, scattering.ray.dir().z * INV_PI);
    }

    #[test]
    fn test_diffuse_from_below_flips_normal() {
        let material = red_diffuse();
        let mut rng = LcgRng::new(8);
        let up_ray = Ray3f::new(Vector3f::new(0.0, 0.0, -1.0), Vector3f::new(0.1, 0.0, 1.0), None, None);
        for _ in 0..100 {
            let s = material.evaluate_throughput(&up_ray, &flat_hit(), &mut rng).into_scattering().unwrap();
            assert!(s.ray.dir().z <= 0.0);
        }
    }

    #[test]
    fn test_evaluate_bxdf_scenario() {
        let material = red_diffuse();
        let surface = flat_hit();
        let incoming = down_ray();
        let up = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, 1.0), None, None);
        let down = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, -1.0), None, None);

        let consistent = material.evaluate_bxdf(&incoming, &up, BxdfId::Lambert, &surface);
        assert_eq!(consistent.value, INV_PI);
        assert_eq!(consistent.pdf, 1.0);

        let leaking = material.evaluate_bxdf(&incoming, &down, BxdfId::Lambert, &surface);
        assert_eq!(leaking.value, 0.0);
    }

    #[test]
    fn test_evaluate_bxdf_specular() {
        let material = red_diffuse();
        let surface = flat_hit();
        let incoming = Ray3f::new(Vector3f::new(-0.6, 0.0, 0.8), Vector3f::new(0.6, 0.0, -0.8), None, None);
        let mirror = Ray3f::new(Vector3f::zeros(), reflect(&incoming.dir(), &surface.sh_normal()), None, None);
        let eval = material.evaluate_bxdf(&incoming, &mirror, BxdfId::Specular, &surface);
        assert_close(eval.value, 1.0 / 0.8);
        assert_eq!(eval.pdf, 1.0);
    }

    #[test]
    fn test_evaluate_bxdf_unimplemented_is_zero() {
        let material = red_diffuse();
        let surface = flat_hit();
        let up = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, 1.0), None, None);
        let eval = material.evaluate_bxdf(&down_ray(), &up, BxdfId::Ggx, &surface);
        assert_eq!(eval.value, 0.0);
        assert_eq!(eval.pdf, 0.0);
    }

    fn always_specular(_params: &ShadingParams, _rng: &mut dyn RandomStream) -> BxdfSelection {
        BxdfSelection { id: BxdfId::Specular, weight: 1.0 }
    }

    fn always_transmit(_params: &ShadingParams, _rng: &mut dyn RandomStream) -> BxdfSelection {
        BxdfSelection { id: BxdfId::Transmit, weight: 1.0 }
    }

    #[test]
    fn test_specular_throughput() {
        let mut material = red_diffuse();
        material.metallic_factor = 0.5;
        material.selector = always_specular;
        let ray = Ray3f::new(Vector3f::new(-0.6, 0.0, 0.8), Vector3f::new(0.6, 0.0, -0.8), None, None);
        let mut rng = LcgRng::new(1);
        let s = material.evaluate_throughput(&ray, &flat_hit(), &mut rng).into_scattering().unwrap();

        assert_eq!(s.log.bxdf_type, BxdfType::Specular);
        assert_close(s.ray.dir().x, 0.6);
        assert_close(s.ray.dir().z, 0.8);
        assert_eq!(s.log.sample_pdf, 1.0);
        assert_eq!(s.log.pdf, 1.0);
        let filter = RGBSpectrum::new(0.9, 0.6, 0.6);
        assert_close(s.log.filter_color[0], filter[0]);
        assert_close(s.log.filter_color[1], filter[1]);
        assert_close(s.throughput[0], 0.9 / 0.8);
        assert_close(s.throughput[2], 0.6 / 0.8);
    }

    #[test]
    fn test_unimplemented_lobe_does_not_scatter() {
        let mut material = red_diffuse();
        material.selector = always_transmit;
        let mut rng = LcgRng::new(1);
        let outcome = material.evaluate_throughput(&down_ray(), &flat_hit(), &mut rng);
        assert_eq!(outcome, ScatterOutcome::NotScattered(BxdfId::Transmit));
    }

    #[test]
    fn test_metallic_roughness_selector_opt_in() {
        let mut material = red_diffuse();
        material.roughness_factor = 0.0;
        material.selector = select_metallic_roughness;
        let mut rng = LcgRng::new(4);
        let s = material.evaluate_throughput(&down_ray(), &flat_hit(), &mut rng).into_scattering().unwrap();
        assert_eq!(s.log.selected_bxdf_id, BxdfId::Specular);
        assert_close(s.ray.dir().z, 1.0);
    }

    #[test]
    fn test_absent_textures_return_factors() {
        let mut material = red_diffuse();
        material.emissive_factor = RGBSpectrum::new(1.0, 2.0, 3.0);
        material.emissive_strength = 2.0;
        let uvs = [Vector2f::new(0.3, 0.3)];
        assert_eq!(material.evaluate_albedo_color(&uvs), material.base_color_factor);
        assert_eq!(material.evaluate_metallic_roughness(&uvs), (0.0, 1.0));
        assert_eq!(material.evaluate_emissive(&uvs), RGBSpectrum::new(2.0, 4.0, 6.0));
        assert_eq!(material.evaluate_occlusion(&uvs), 1.0);

        let n = Vector3f::new(0.0, 3.0, 0.0);
        let t = Vector4f::new(1.0, 0.0, 0.0, 1.0);
        assert_eq!(material.evaluate_normal(&uvs, &n, &t), n);
    }

    #[test]
    fn test_albedo_requests_srgb() {
        let mut material = Material::new("uv", 1);
        material.base_color_factor = RGBSpectrum::new(1.0, 0.5, 1.0);
        material.base_color_texture = TextureInfo::new(Arc::new(UvTexture));
        let albedo = material.evaluate_albedo_color(&[Vector2f::new(0.5, 0.8)]);
        assert_eq!(albedo, RGBSpectrum::new(0.5, 0.4, 1.0));
    }

    #[test]
    fn test_metallic_roughness_channels() {
        let mut material = Material::new("mr", 2);
        material.metallic_factor = 0.5;
        material.roughness_factor = 0.8;
        material.metallic_roughness_texture = constant(0.25, 0.5, 0.0);
        let (metallic, roughness) = material.evaluate_metallic_roughness(&[Vector2f::new(0.0, 0.0)]);
        assert_close(metallic, 0.125);
        assert_close(roughness, 0.4);
    }

    #[test]
    fn test_emissive_texture_is_linear() {
        let mut material = Material::new("emit", 3);
        material.emissive_factor = RGBSpectrum::new(1.0, 1.0, 1.0);
        material.emissive_strength = 4.0;
        material.emissive_texture = TextureInfo::new(Arc::new(UvTexture));
        let e = material.evaluate_emissive(&[Vector2f::new(0.25, 0.5)]);
        assert_eq!(e, RGBSpectrum::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn test_negative_tex_coord_matches_zero() {
        let uvs = [Vector2f::new(0.2, 0.6), Vector2f::new(0.9, 0.1)];
        let mut a = Material::new("a", 0);
        let mut b = Material::new("b", 1);
        a.base_color_texture = TextureInfo::new(Arc::new(UvTexture)).with_tex_coord(-1);
        b.base_color_texture = TextureInfo::new(Arc::new(UvTexture)).with_tex_coord(0);
        a.metallic_roughness_texture = a.base_color_texture.clone();
        b.metallic_roughness_texture = b.base_color_texture.clone();
        assert_eq!(a.evaluate_albedo_color(&uvs), b.evaluate_albedo_color(&uvs));
        assert_eq!(a.evaluate_metallic_roughness(&uvs), b.evaluate_metallic_roughness(&uvs));

        let mut c = Material::new("c", 2);
        c.base_color_texture = TextureInfo::new(Arc::new(UvTexture)).with_tex_coord(1);
        assert_ne!(c.evaluate_albedo_color(&uvs), b.evaluate_albedo_color(&uvs));
    }

    #[test]
    fn test_flat_normal_map_keeps_normal() {
        let mut material = Material::new("nrm", 4);
        material.normal_texture = constant(0.5, 0.5, 1.0);
        let n = Vector3f::new(0.0, 0.0, 2.0);
        let t = Vector4f::new(1.0, 0.0, 0.0, 1.0);
        let out = material.evaluate_normal(&[Vector2f::new(0.0, 0.0)], &n, &t);
        assert_close(out.x, 0.0);
        assert_close(out.y, 0.0);
        assert_close(out.z, 1.0);
    }

    #[test]
    fn test_normal_map_tangent_frame() {
        let mut material = Material::new("nrm", 5);
        let n = Vector3f::new(0.0, 0.0, 1.0);
        let right_handed = Vector4f::new(1.0, 0.0, 0.0, 1.0);
        let left_handed = Vector4f::new(1.0, 0.0, 0.0, -1.0);

        // +x in tangent space follows the tangent
        material.normal_texture = constant(1.0, 0.5, 0.5);
        let out = material.evaluate_normal(&[], &n, &right_handed);
        assert_close(out.x, 1.0);
        assert_close(out.z, 0.0);

        // +y follows cross(n, t) * w
        material.normal_texture = constant(0.5, 1.0, 0.5);
        let out = material.evaluate_normal(&[], &n, &right_handed);
        assert_close(out.y, 1.0);
        let out = material.evaluate_normal(&[], &n, &left_handed);
        assert_close(out.y, -1.0);

        // tilted map stays unit length
        material.normal_texture = constant(0.75, 0.25, 0.9);
        let out = material.evaluate_normal(&[], &n, &right_handed);
        assert_close(out.norm(), 1.0);
    }

    #[test]
    fn test_normal_scale_flattens() {
        let mut material = Material::new("nrm", 6);
        material.normal_texture = constant(1.0, 0.5, 1.0).with_scale(0.0);
        let out = material.evaluate_normal(&[], &Vector3f::new(0.0, 0.0, 1.0), &Vector4f::new(1.0, 0.0, 0.0, 1.0));
        assert_close(out.z, 1.0);
    }

    #[test]
    fn test_alpha_modes() {
        let mut material = Material::new("alpha", 7);
        material.base_color_alpha = 0.8;
        material.base_color_texture = TextureInfo::new(Arc::new(UvTexture));
        let uvs = [Vector2f::new(0.5, 0.0)];
        assert_close(material.evaluate_alpha(&uvs), 0.4);

        material.alpha_mode = AlphaMode::Blend;
        assert_close(material.alpha_coverage(&uvs), 0.4);
        material.alpha_mode = AlphaMode::Mask;
        assert_eq!(material.alpha_coverage(&uvs), 0.0);
        material.alpha_cutoff = 0.3;
        assert_eq!(material.alpha_coverage(&uvs), 1.0);
        material.alpha_mode = AlphaMode::Opaque;
        assert_eq!(material.alpha_coverage(&[Vector2f::new(0.0, 0.0)]), 1.0);
    }

    #[test]
    fn test_occlusion_strength() {
        let mut material = Material::new("ao", 8);
        material.occlusion_texture = constant(0.25, 0.0, 0.0).with_scale(0.5);
        assert_close(material.evaluate_occlusion(&[]), 0.625);
    }

    #[test]
    fn test_material_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Material>();
    }
}

// Copyright @yucwang 2026

use crate::core::texture::{Texture, TextureSample};
use crate::math::constants::{Float, Vector2f};
use crate::math::spectrum::RGBSpectrum;

/// Same value everywhere; the value is taken to be linear already.
pub struct ConstantTexture {
    value: RGBSpectrum,
    alpha: Float,
}

impl ConstantTexture {
    pub fn new(value: RGBSpectrum) -> Self {
        Self { value, alpha: 1.0 }
    }

    pub fn with_alpha(value: RGBSpectrum, alpha: Float) -> Self {
        Self { value, alpha }
    }
}

impl Texture for ConstantTexture {
    fn describe(&self) -> String {
        String::from("ConstantTexture")
    }

    fn sample(&self, _uv: Vector2f, _srgb: bool) -> TextureSample {
        TextureSample::new(self.value, self.alpha)
    }
}

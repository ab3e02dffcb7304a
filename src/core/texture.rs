// Copyright @yucwang 2026

use crate::math::constants::{Float, Vector2f};
use crate::math::spectrum::RGBSpectrum;

use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureSample {
    pub rgb: RGBSpectrum,
    pub alpha: Float,
}

impl TextureSample {
    pub fn new(rgb: RGBSpectrum, alpha: Float) -> Self {
        Self { rgb, alpha }
    }

    pub fn opaque(rgb: RGBSpectrum) -> Self {
        Self { rgb, alpha: 1.0 }
    }
}

pub trait Texture: Send + Sync {
    fn describe(&self) -> String;
    /// `srgb` requests display-encoded data be decoded to linear.
    fn sample(&self, uv: Vector2f, srgb: bool) -> TextureSample;
}

/// Binds an optional texture to a UV channel.
///
/// `tex_coord` may be negative, which selects channel 0. `scale` is only read
/// by normal and occlusion evaluation.
#[derive(Clone)]
pub struct TextureInfo {
    pub texture: Option<Arc<dyn Texture>>,
    pub tex_coord: i32,
    pub scale: Float,
}

impl Default for TextureInfo {
    fn default() -> Self {
        Self { texture: None, tex_coord: 0, scale: 1.0 }
    }
}

impl fmt::Debug for TextureInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextureInfo")
            .field("texture", &self.texture.as_ref().map(|t| t.describe()))
            .field("tex_coord", &self.tex_coord)
            .field("scale", &self.scale)
            .finish()
    }
}

impl TextureInfo {
    pub fn new(texture: Arc<dyn Texture>) -> Self {
        Self { texture: Some(texture), ..Self::default() }
    }

    pub fn with_tex_coord(mut self, tex_coord: i32) -> Self {
        self.tex_coord = tex_coord;
        self
    }

    pub fn with_scale(mut self, scale: Float) -> Self {
        self.scale = scale;
        self
    }

    /// Index into the hit's UV channels. Negative channels select 0 and
    /// channels past the end clamp to the last one.
    pub fn channel(&self, channel_count: usize) -> usize {
        let channel = self.tex_coord.max(0) as usize;
        channel.min(channel_count.saturating_sub(1))
    }

    /// `None` when no texture is bound.
    pub fn sample(&self, uvs: &[Vector2f], srgb: bool) -> Option<TextureSample> {
        let texture = self.texture.as_ref()?;
        let uv = uvs
            .get(self.channel(uvs.len()))
            .cloned()
            .unwrap_or_else(|| Vector2f::new(0.0, 0.0));
        Some(texture.sample(uv, srgb))
    }
}

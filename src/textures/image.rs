// Copyright @yucwang 2026

use crate::core::texture::{Texture, TextureSample};
use crate::math::constants::{Float, MatrixXF, Vector2f};
use crate::math::spectrum::RGBSpectrum;
use exr::prelude::*;
use image::io::Reader as ImageReader;
use image::GenericImageView;
use std::fmt;
use std::path::Path;

const CHANNELS: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterMode {
    Bilinear,
    Nearest,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WrapMode {
    Repeat,
    Mirror,
    Clamp,
}

/// How the stored texels are encoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorEncoding {
    /// Display-referred (sRGB transfer curve), as 8-bit images usually are.
    Display,
    Linear,
}

#[derive(Debug)]
pub enum TextureLoadError {
    Io(std::io::Error),
    Decode(String),
    Unsupported(String),
}

impl From<std::io::Error> for TextureLoadError {
    fn from(err: std::io::Error) -> Self {
        TextureLoadError::Io(err)
    }
}

impl fmt::Display for TextureLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureLoadError::Io(err) => write!(f, "io error: {}", err),
            TextureLoadError::Decode(msg) => write!(f, "decode error: {}", msg),
            TextureLoadError::Unsupported(ext) => write!(f, "unsupported texture format: {}", ext),
        }
    }
}

impl std::error::Error for TextureLoadError {}

pub struct ImageTexture {
    width: usize,
    height: usize,
    data: MatrixXF,
    encoding: ColorEncoding,
    filter_mode: FilterMode,
    wrap_mode: WrapMode,
}

pub fn srgb_to_linear(v: Float) -> Float {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

impl ImageTexture {
    /// Builds a texture from row-major RGBA texels, top row first.
    pub fn from_rgba(width: usize, height: usize, texels: &[[Float; 4]], encoding: ColorEncoding) -> Self {
        let mut data = MatrixXF::zeros(height, width * CHANNELS);
        for y in 0..height {
            for x in 0..width {
                let texel = texels.get(x + width * y).cloned().unwrap_or([0.0, 0.0, 0.0, 1.0]);
                for c in 0..CHANNELS {
                    data[(y, x * CHANNELS + c)] = texel[c];
                }
            }
        }
        Self::from_data(width, height, data, encoding)
    }

    pub fn from_exr(path: &str) -> std::result::Result<Self, TextureLoadError> {
        log::info!("Starting reading OpenEXR texture from: {}.", path);
        let image = read()
            .no_deep_data()
            .largest_resolution_level()
            .rgba_channels(
                |resolution, _| {
                    let width = resolution.width() as usize;
                    let height = resolution.height() as usize;
                    ImageTexture::from_data(width, height,
                                            MatrixXF::zeros(height, width * CHANNELS),
                                            ColorEncoding::Linear)
                },
                |texture, position, (r, g, b, a): (f32, f32, f32, f32)| {
                    let base = position.x() as usize * CHANNELS;
                    let y = position.y() as usize;
                    texture.data[(y, base)] = r;
                    texture.data[(y, base + 1)] = g;
                    texture.data[(y, base + 2)] = b;
                    texture.data[(y, base + 3)] = a;
                },
            )
            .first_valid_layer()
            .all_attributes()
            .from_file(path)
            .map_err(|e| TextureLoadError::Decode(format!("failed to read exr {}: {}", path, e)))?;

        let texture = image.layer_data.channel_data.pixels;
        log::info!("OpenEXR texture loaded, width = {}, height = {}.", texture.width, texture.height);
        Ok(texture)
    }

    /// Texels are kept display-encoded; decoding happens per sample.
    pub fn from_image(path: &str) -> std::result::Result<Self, TextureLoadError> {
        log::info!("Starting reading image texture from: {}.", path);
        let img = ImageReader::open(path)?
            .decode()
            .map_err(|e| TextureLoadError::Decode(format!("failed to decode image {}: {}", path, e)))?;

        let (width, height) = img.dimensions();
        let width = width as usize;
        let height = height as usize;
        let rgba = img.to_rgba32f();
        let mut data = MatrixXF::zeros(height, width * CHANNELS);
        for y in 0..height {
            for x in 0..width {
                let p = rgba.get_pixel(x as u32, y as u32);
                for c in 0..CHANNELS {
                    data[(y, x * CHANNELS + c)] = p[c];
                }
            }
        }

        log::info!("Image texture loaded, width = {}, height = {}.", width, height);
        Ok(Self::from_data(width, height, data, ColorEncoding::Display))
    }

    pub fn from_file(path: &str) -> std::result::Result<Self, TextureLoadError> {
        let ext = Path::new(path)
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match ext.as_str() {
            "exr" => Self::from_exr(path),
            "jpg" | "jpeg" | "png" => Self::from_image(path),
            _ => Err(TextureLoadError::Unsupported(ext)),
        }
    }

    fn from_data(width: usize, height: usize, data: MatrixXF, encoding: ColorEncoding) -> Self {
        Self {
            width,
            height,
            data,
            encoding,
            filter_mode: FilterMode::Bilinear,
            wrap_mode: WrapMode::Repeat,
        }
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn encoding(&self) -> ColorEncoding {
        self.encoding
    }

    pub fn set_filter_mode(&mut self, filter_mode: FilterMode) {
        self.filter_mode = filter_mode;
    }

    pub fn set_wrap_mode(&mut self, wrap_mode: WrapMode) {
        self.wrap_mode = wrap_mode;
    }

    fn texel(&self, x: usize, y: usize) -> [Float; 4] {
        let base = x * CHANNELS;
        [
            self.data[(y, base)],
            self.data[(y, base + 1)],
            self.data[(y, base + 2)],
            self.data[(y, base + 3)],
        ]
    }

    fn sample_bilinear(&self, uv: Vector2f) -> [Float; 4] {
        let uv = self.wrap_uv(uv);
        let x = uv.x * (self.width as Float) - 0.5;
        let y = (1.0 - uv.y) * (self.height as Float) - 0.5;

        let x0 = x.floor() as isize;
        let y0 = y.floor() as isize;
        let tx = x - x0 as Float;
        let ty = y - y0 as Float;

        let x0u = self.wrap_index(x0, self.width);
        let y0u = self.wrap_index(y0, self.height);
        let x1u = self.wrap_index(x0 + 1, self.width);
        let y1u = self.wrap_index(y0 + 1, self.height);

        let t00 = self.texel(x0u, y0u);
        let t10 = self.texel(x1u, y0u);
        let t01 = self.texel(x0u, y1u);
        let t11 = self.texel(x1u, y1u);

        let mut out = [0.0; 4];
        for c in 0..CHANNELS {
            let top = t00[c] * (1.0 - tx) + t10[c] * tx;
            let bottom = t01[c] * (1.0 - tx) + t11[c] * tx;
            out[c] = top * (1.0 - ty) + bottom * ty;
        }
        out
    }

    fn sample_nearest(&self, uv: Vector2f) -> [Float; 4] {
        let uv = self.wrap_uv(uv);
        let x = (uv.x * (self.width as Float) - 0.5).round() as isize;
        let y = ((1.0 - uv.y) * (self.height as Float) - 0.5).round() as isize;
        self.texel(self.wrap_index(x, self.width), self.wrap_index(y, self.height))
    }

    fn wrap_uv(&self, uv: Vector2f) -> Vector2f {
        Vector2f::new(self.wrap_coord(uv.x), self.wrap_coord(uv.y))
    }

    fn wrap_coord(&self, value: Float) -> Float {
        match self.wrap_mode {
            WrapMode::Repeat => value.rem_euclid(1.0),
            WrapMode::Mirror => {
                let v = value.rem_euclid(2.0);
                if v > 1.0 { 2.0 - v } else { v }
            }
            WrapMode::Clamp => value.max(0.0).min(1.0),
        }
    }

    fn wrap_index(&self, idx: isize, size: usize) -> usize {
        let n = size as isize;
        match self.wrap_mode {
            WrapMode::Repeat => idx.rem_euclid(n) as usize,
            WrapMode::Clamp => idx.max(0).min(n - 1) as usize,
            WrapMode::Mirror => {
                if n == 1 {
                    return 0;
                }
                let period = 2 * (n - 1);
                let mut i = idx.rem_euclid(period);
                if i >= n {
                    i = period - i;
                }
                i as usize
            }
        }
    }
}

impl Texture for ImageTexture {
    fn describe(&self) -> String {
        format!("ImageTexture [{}x{}, {:?}]", self.width, self.height, self.encoding)
    }

    fn sample(&self, uv: Vector2f, srgb: bool) -> TextureSample {
        if self.width == 0 || self.height == 0 {
            return TextureSample::new(RGBSpectrum::default(), 1.0);
        }

        let [r, g, b, a] = match self.filter_mode {
            FilterMode::Bilinear => self.sample_bilinear(uv),
            FilterMode::Nearest => self.sample_nearest(uv),
        };
        let rgb = if srgb && self.encoding == ColorEncoding::Display {
            RGBSpectrum::new(srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b))
        } else {
            RGBSpectrum::new(r, g, b)
        };
        TextureSample::new(rgb, a)
    }
}

// Copyright @yucwang 2023

use super::constants::{ INV_PI, PI, Float, Vector2f, Vector3f };
use super::frame::Frame;
use crate::core::rng::RandomStream;

/// A sampled direction together with its density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionSample {
    pub dir: Vector3f,
    pub pdf: Float,
}

impl DirectionSample {
    pub fn new(dir: Vector3f, pdf: Float) -> Self {
        Self { dir, pdf }
    }
}

/// `u.x` is cos(theta) directly, `u.y` the azimuth fraction.
pub fn square_to_uniform_hemisphere(u: &Vector2f) -> Vector3f {
    let z: Float = u.x;
    let r: Float = (1. - z * z).max(0.0).sqrt();
    let phi: Float = 2. * PI * u.y;

    Vector3f::new(r * phi.cos(), r * phi.sin(), z)
}

// NOTE: this is 1/pi, twice the 1/(2*pi) solid-angle density of a uniform
// hemisphere. Estimators weighting by it have always used this value.
pub fn uniform_hemisphere_pdf() -> Float {
    INV_PI
}

/// Shirley-Chiu concentric map of `[0,1)^2` onto the unit disk.
pub fn square_to_uniform_disk_concentric(u: &Vector2f) -> Vector2f {
    let r1: Float = 2.0 * u.x - 1.0;
    let r2: Float = 2.0 * u.y - 1.0;

    let phi: Float;
    let r:   Float;

    if r1 * r1 + r2 * r2 <= 0.0 {
        return Vector2f::new(0.0, 0.0);
    } else if r1.abs() > r2.abs() {
        r = r1;
        phi = (PI / 4.0) * (r2 / r1);
    } else {
        r = r2;
        phi = (PI / 2.0) - (r1 / r2) * (PI / 4.0);
    }

    let (sin_phi, cos_phi) = phi.sin_cos();

    Vector2f::new(r * cos_phi, r * sin_phi)
}

pub fn square_to_cosine_hemisphere(u: &Vector2f) -> Vector3f {
    let p = square_to_uniform_disk_concentric(u);
    let z = (1. - p.x * p.x - p.y * p.y).max(0.0).sqrt();

    Vector3f::new(p.x, p.y, z)
}

pub fn cosine_hemisphere_pdf(cos_theta: Float) -> Float {
    cos_theta * INV_PI
}

/// Uniform direction on the hemisphere around the unit normal `n`.
pub fn sample_uniform_hemisphere<R: RandomStream + ?Sized>(n: &Vector3f, rng: &mut R) -> DirectionSample {
    let z = rng.next_f32_cc();
    let t = rng.next_f32_co();
    let local = square_to_uniform_hemisphere(&Vector2f::new(z, t));

    DirectionSample::new(Frame::from_normal(n).from_local(&local), uniform_hemisphere_pdf())
}

/// Cosine-weighted direction around the unit normal `n`. A draw landing on
/// the disk center returns `n` itself with pdf 1/pi.
pub fn sample_cosine_weighted_hemisphere<R: RandomStream + ?Sized>(n: &Vector3f, rng: &mut R) -> DirectionSample {
    let a = rng.next_f32_co();
    let b = rng.next_f32_co();
    let local = square_to_cosine_hemisphere(&Vector2f::new(a, b));

    DirectionSample::new(Frame::from_normal(n).from_local(&local), cosine_hemisphere_pdf(local.z))
}

// Copyright @yucwang 2026

use crate::math::constants::Float;

/// Source of uniform variates consumed by the samplers.
///
/// Streams are stateful and sequential, so every method takes `&mut self`:
/// a worker can only draw from a stream it exclusively owns.
pub trait RandomStream {
    /// Uniform variate on the closed interval `[0, 1]`.
    fn next_f32_cc(&mut self) -> Float;
    /// Uniform variate on the half-open interval `[0, 1)`.
    fn next_f32_co(&mut self) -> Float;
}

#[derive(Debug, Clone)]
pub struct LcgRng {
    state: u64,
}

impl LcgRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Seed for the `index`-th independent stream derived from `seed`.
    pub fn for_stream(seed: u64, index: u64) -> Self {
        let mut z = seed ^ index.wrapping_mul(0x9E37_79B9_7F4A_7C15);
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        Self::new(z ^ (z >> 31))
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
}

impl RandomStream for LcgRng {
    fn next_f32_cc(&mut self) -> Float {
        ((self.next_u32() as f64) / (u32::MAX as f64)) as Float
    }

    fn next_f32_co(&mut self) -> Float {
        // 24 mantissa bits keep the result strictly below 1.0 in f32.
        (self.next_u32() >> 8) as Float * (1.0 / (1u32 << 24) as Float)
    }
}

// Copyright 2020 @TwoCookingMice

use super::constants::{Float, Vector3f};

/// A ray is immutable once built; bounces construct a fresh one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray3f {
    origin: Vector3f,
    dir: Vector3f,
    min_t: Float,
    max_t: Float
}

impl Ray3f {
    pub fn new(o: Vector3f, d: Vector3f,
               min_t: Option<Float>, max_t: Option<Float>) -> Self {
        Self { origin: o, dir: d.normalize(),
               min_t: min_t.unwrap_or(0.0),
               max_t: max_t.unwrap_or(std::f32::MAX)}
    }

    pub fn origin(&self) -> Vector3f {
        self.origin
    }

    pub fn dir(&self) -> Vector3f {
        self.dir
    }

    pub fn min_t(&self) -> Float {
        self.min_t
    }

    pub fn max_t(&self) -> Float {
        self.max_t
    }

    pub fn at(&self, t: Float) -> Vector3f {
        self.origin + self.dir * t
    }

    /// Same origin and direction, segment clipped to `max_t`.
    pub fn with_max_t(&self, max_t: Float) -> Self {
        Self { origin: self.origin, dir: self.dir, min_t: self.min_t, max_t }
    }

    pub fn test_segment(&self, t: Float) -> bool {
        t >= self.min_t && t <= self.max_t
    }
}

/* Tests for Ray */

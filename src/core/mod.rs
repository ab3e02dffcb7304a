// Copyright @yucwang 2021

pub mod bsdf;
pub mod bvh;
pub mod integrator;
pub mod interaction;
pub mod material;
pub mod rng;
pub mod scene;
pub mod shape;
pub mod texture;

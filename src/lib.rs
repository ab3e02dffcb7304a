// Copyright @yucwang 2021

pub mod core;
pub mod integrators;
pub mod materials;
pub mod math;
pub mod renderers;
pub mod shapes;
pub mod textures;

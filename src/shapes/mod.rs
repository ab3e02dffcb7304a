// Copyright @yucwang 2023

pub mod mesh;
pub mod triangle;

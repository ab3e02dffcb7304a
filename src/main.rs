// Copyright 2020 TwoCookingMice

use financier::core::bsdf::BxdfSelector;
use financier::core::material::Material;
use financier::core::scene::Scene;
use financier::core::texture::TextureInfo;
use financier::integrators::path::PathIntegrator;
use financier::materials::selection::{ select_diffuse, select_metallic_roughness };
use financier::math::constants::{ Float, Vector2f, Vector3f };
use financier::math::ray::Ray3f;
use financier::math::spectrum::RGBSpectrum;
use financier::renderers::furnace::FurnaceRenderer;
use financier::shapes::mesh::Mesh;
use financier::textures::image::ImageTexture;

use std::env;
use std::sync::Arc;

struct RenderSettings {
    paths: usize,
    max_depth: u32,
    seed: u64,
    threads: usize,
    batch_size: usize,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self { paths: 1 << 16, max_depth: 8, seed: 0, threads: 0, batch_size: 1024 }
    }
}

fn parse_rgb(value: Option<&String>) -> Option<RGBSpectrum> {
    let parts: Vec<Float> = value?
        .split(',')
        .map(|v| v.trim().parse::<Float>())
        .collect::<Result<_, _>>()
        .ok()?;
    match parts.as_slice() {
        [r, g, b] => Some(RGBSpectrum::new(*r, *g, *b)),
        [v] => Some(RGBSpectrum::splat(*v)),
        _ => None,
    }
}

fn parse_selector(value: Option<&String>) -> Option<BxdfSelector> {
    match value.map(|v| v.as_str()) {
        Some("diffuse") => Some(select_diffuse as BxdfSelector),
        Some("metallic-roughness") => Some(select_metallic_roughness as BxdfSelector),
        _ => None,
    }
}

/// A 20 x 20 ground quad at z = 0 with one UV channel spanning [0, 1].
fn ground_scene(material: Material) -> Scene {
    let half = 10.0;
    let corners = [(-half, -half), (half, -half), (half, half), (-half, half)];
    let positions = corners.iter().map(|&(x, y)| Vector3f::new(x, y, 0.0)).collect();
    let uvs = corners.iter().map(|&(x, y)| Vector2f::new(x / (2.0 * half) + 0.5, y / (2.0 * half) + 0.5)).collect();

    let mut mesh = Mesh::new(positions)
        .with_normals(vec![Vector3f::new(0.0, 0.0, 1.0); 4])
        .with_uv_channel(uvs);
    let mut scene = Scene::new();
    let material_id = scene.add_material(Arc::new(material));
    mesh.add_face([0, 1, 2], material_id);
    mesh.add_face([0, 2, 3], material_id);
    if let Err(e) = mesh.build() {
        log::error!("failed to build ground mesh: {}", e);
        std::process::exit(1);
    }

    scene.add_shape(Arc::new(mesh));
    scene.set_environment(RGBSpectrum::white());
    scene
}

fn main() {
    env::set_var("RUST_LOG", "info");
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        eprintln!("Usage: {} [--base-color r,g,b] [--metallic F] [--roughness F] [--emissive r,g,b] \
                   [--albedo-texture PATH] [--selector diffuse|metallic-roughness] [--paths N] \
                   [--max-depth N] [--seed N] [--threads N] [--batch-size N]", args[0]);
        std::process::exit(1);
    }

    let mut settings = RenderSettings::default();
    let mut material = Material::new("ground", 0);
    material.metallic_factor = 0.0;
    material.base_color_factor = RGBSpectrum::splat(0.8);
    let mut albedo_texture: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--base-color" => {
                i += 1;
                material.base_color_factor = parse_rgb(args.get(i)).unwrap_or(material.base_color_factor);
            }
            "--metallic" => {
                i += 1;
                material.metallic_factor = args.get(i).and_then(|v| v.parse::<Float>().ok()).unwrap_or(material.metallic_factor);
            }
            "--roughness" => {
                i += 1;
                material.roughness_factor = args.get(i).and_then(|v| v.parse::<Float>().ok()).unwrap_or(material.roughness_factor);
            }
            "--emissive" => {
                i += 1;
                material.emissive_factor = parse_rgb(args.get(i)).unwrap_or(material.emissive_factor);
            }
            "--albedo-texture" => {
                i += 1;
                albedo_texture = args.get(i).cloned();
            }
            "--selector" => {
                i += 1;
                match parse_selector(args.get(i)) {
                    Some(selector) => material.selector = selector,
                    None => log::warn!("unknown selector {:?}, keeping diffuse", args.get(i)),
                }
            }
            "--paths" => {
                i += 1;
                settings.paths = args.get(i).and_then(|v| v.parse::<usize>().ok()).unwrap_or(settings.paths);
            }
            "--max-depth" => {
                i += 1;
                settings.max_depth = args.get(i).and_then(|v| v.parse::<u32>().ok()).unwrap_or(settings.max_depth);
            }
            "--seed" => {
                i += 1;
                settings.seed = args.get(i).and_then(|v| v.parse::<u64>().ok()).unwrap_or(0);
            }
            "--threads" => {
                i += 1;
                settings.threads = args.get(i).and_then(|v| v.parse::<usize>().ok()).unwrap_or(0);
            }
            "--batch-size" => {
                i += 1;
                settings.batch_size = args.get(i).and_then(|v| v.parse::<usize>().ok()).unwrap_or(settings.batch_size);
            }
            other => log::warn!("ignoring unknown argument {}", other),
        }
        i += 1;
    }

    if let Some(path) = albedo_texture {
        match ImageTexture::from_file(&path) {
            Ok(texture) => material.base_color_texture = TextureInfo::new(Arc::new(texture)),
            Err(e) => {
                log::error!("failed to load albedo texture {}: {}", path, e);
                std::process::exit(1);
            }
        }
    }

    log::info!("material: {:?}", material);
    let scene = ground_scene(material);

    let view = Ray3f::new(Vector3f::new(0.0, -1.0, 1.0), Vector3f::new(0.0, 1.0, -1.0), None, None);
    let renderer = FurnaceRenderer::new(Box::new(PathIntegrator::new(settings.max_depth)), settings.seed)
        .with_threads(settings.threads)
        .with_batch_size(settings.batch_size);
    let estimate = renderer.estimate(&scene, &view, settings.paths);

    log::info!("radiance along view ray: ({:.5}, {:.5}, {:.5})", estimate.r(), estimate.g(), estimate.b());
}

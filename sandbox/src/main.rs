// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Sandbox: builds a sky cube map and a light source, and runs them through the
//! headless texture backend.
//!
//! Usage: `sandbox [config.ron] [+X -X +Y -Y +Z -Z image paths]`

use std::path::Path;

use anyhow::{bail, Context, Result};
use lumen_core::math::{Extent2D, LinearRgba, Quaternion, Vec3, FRAC_PI_2};
use lumen_core::renderer::{
    CubeFace, DataType, LightSource, PixelFormat, Texture, TextureContext, TextureData,
};
use lumen_core::scene::SceneMember;
use lumen_core::RenderConfig;
use lumen_infra::{assets, RecordingContext};

const DEFAULT_CONFIG: &str = "sandbox/config.ron";
const FACE_SIZE: u32 = 16;

/// A solid-color face with a darker border, tinted per direction.
fn procedural_face(face: CubeFace, brightness: f32) -> TextureData {
    let tint = match face {
        CubeFace::PositiveX | CubeFace::NegativeX => LinearRgba::RED,
        CubeFace::PositiveY | CubeFace::NegativeY => LinearRgba::GREEN,
        CubeFace::PositiveZ | CubeFace::NegativeZ => LinearRgba::BLUE,
    };
    let mut pixels = Vec::with_capacity((FACE_SIZE * FACE_SIZE * 4) as usize);
    for y in 0..FACE_SIZE {
        for x in 0..FACE_SIZE {
            let edge = x == 0 || y == 0 || x == FACE_SIZE - 1 || y == FACE_SIZE - 1;
            let scale = if edge { brightness * 0.5 } else { brightness };
            for channel in tint.to_rgb_array() {
                pixels.push((channel * scale * 255.0) as u8);
            }
            pixels.push(u8::MAX);
        }
    }
    TextureData::from_buffer(
        pixels,
        Extent2D::new(FACE_SIZE, FACE_SIZE),
        PixelFormat::Rgba,
        DataType::UnsignedByte,
    )
}

fn procedural_faces(brightness: f32) -> [TextureData; 6] {
    CubeFace::ALL.map(|face| procedural_face(face, brightness))
}

fn load_config(path: Option<&str>) -> Result<RenderConfig> {
    let path = path.unwrap_or(DEFAULT_CONFIG);
    if Path::new(path).exists() {
        RenderConfig::load(path).with_context(|| format!("Loading {path}"))
    } else {
        log::warn!("No configuration at {path}, using defaults");
        Ok(RenderConfig::default())
    }
}

fn run_sky(config: &RenderConfig, face_paths: &[String], ctx: &mut impl TextureContext) -> Result<()> {
    let faces = match face_paths {
        [] => procedural_faces(1.0),
        [a, b, c, d, e, f] => assets::load_cube_faces(&[a, b, c, d, e, f])?,
        other => bail!("expected 0 or 6 face images, got {}", other.len()),
    };

    let mut sky = Texture::cube_map_with_faces("sky", faces);
    sky.apply_defaults(&config.textures);
    sky.set_sky_texture(true);

    let handle = sky.allocate(ctx)?;
    log::info!(
        "Sky texture {:?}: {}x{} {:?}, filter {:?}",
        handle,
        sky.width(),
        sky.height(),
        sky.texel_format(),
        sky.filter()
    );

    if face_paths.is_empty() {
        sky.set_faces(procedural_faces(0.25));
        sky.replace(ctx)?;
    }

    sky.destroy(ctx)?;
    Ok(())
}

fn run_light(config: &RenderConfig) {
    let mut light = LightSource::from_defaults(&config.light);
    log::info!(
        "Light {:?} (shader index {}), color {:?}, power {}, capabilities {:?}",
        light.kind(),
        light.kind().shader_index(),
        light.color(),
        light.power(),
        LightSource::CAPABILITIES
    );

    for step in 0..4 {
        light.transform_mut().translate(Vec3::new(0.0, 1.0, 0.0));
        light
            .transform_mut()
            .rotate(Quaternion::from_axis_angle(Vec3::Y, FRAC_PI_2));
        let position = *light.position_array();
        let direction = *light.direction_array();
        log::info!("Step {step}: position {position:?}, direction {direction:?}");
    }
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (config_path, face_paths) = match args.split_first() {
        Some((first, rest)) if first.ends_with(".ron") => (Some(first.as_str()), rest),
        _ => (None, args.as_slice()),
    };
    let config = load_config(config_path)?;

    let mut ctx = RecordingContext::new().with_max_anisotropy(16.0);
    run_sky(&config, face_paths, &mut ctx)?;
    log::info!("Backend received {} texture calls", ctx.calls().len());

    run_light(&config);
    Ok(())
}

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

use lumen_core::renderer::{
    CubeFace, DataType, ImageTarget, MagFilter, MinFilter, MipmapHint, PixelFormat, TextureTarget,
    WrapAxis, WrapMode,
};

// Legacy unsized formats, still the valid internal formats on OpenGL ES 2.
pub(crate) const ALPHA: u32 = 0x1906;
pub(crate) const LUMINANCE: u32 = 0x1909;
pub(crate) const LUMINANCE_ALPHA: u32 = 0x190A;

// EXT_texture_filter_anisotropic
pub(crate) const TEXTURE_MAX_ANISOTROPY_EXT: u32 = 0x84FE;
pub(crate) const MAX_TEXTURE_MAX_ANISOTROPY_EXT: u32 = 0x84FF;

/// A local extension trait to convert our engine's types into GL enums.
/// This avoids Rust's orphan rules while keeping an idiomatic `.into_gl()` syntax.
pub trait IntoGl<T> {
    /// Consumes self and converts it into a GL enum value.
    fn into_gl(self) -> T;
}

// --- Targets ---

impl IntoGl<u32> for TextureTarget {
    fn into_gl(self) -> u32 {
        match self {
            TextureTarget::Texture2D => glow::TEXTURE_2D,
            TextureTarget::Texture2DArray => glow::TEXTURE_2D_ARRAY,
            TextureTarget::CubeMap => glow::TEXTURE_CUBE_MAP,
        }
    }
}

impl IntoGl<u32> for CubeFace {
    fn into_gl(self) -> u32 {
        match self {
            CubeFace::PositiveX => glow::TEXTURE_CUBE_MAP_POSITIVE_X,
            CubeFace::NegativeX => glow::TEXTURE_CUBE_MAP_NEGATIVE_X,
            CubeFace::PositiveY => glow::TEXTURE_CUBE_MAP_POSITIVE_Y,
            CubeFace::NegativeY => glow::TEXTURE_CUBE_MAP_NEGATIVE_Y,
            CubeFace::PositiveZ => glow::TEXTURE_CUBE_MAP_POSITIVE_Z,
            CubeFace::NegativeZ => glow::TEXTURE_CUBE_MAP_NEGATIVE_Z,
        }
    }
}

/// Layers are addressed through their array target plus a depth offset.
impl IntoGl<u32> for ImageTarget {
    fn into_gl(self) -> u32 {
        match self {
            ImageTarget::Texture2D => glow::TEXTURE_2D,
            ImageTarget::Layer(_) => glow::TEXTURE_2D_ARRAY,
            ImageTarget::CubeFace(face) => face.into_gl(),
        }
    }
}

// --- Pixel data ---

impl IntoGl<u32> for PixelFormat {
    fn into_gl(self) -> u32 {
        match self {
            PixelFormat::Alpha => ALPHA,
            PixelFormat::Luminance => LUMINANCE,
            PixelFormat::LuminanceAlpha => LUMINANCE_ALPHA,
            PixelFormat::Rgb => glow::RGB,
            PixelFormat::Rgba => glow::RGBA,
        }
    }
}

impl IntoGl<u32> for DataType {
    fn into_gl(self) -> u32 {
        match self {
            DataType::UnsignedByte => glow::UNSIGNED_BYTE,
            DataType::UnsignedShort565 => glow::UNSIGNED_SHORT_5_6_5,
            DataType::UnsignedShort4444 => glow::UNSIGNED_SHORT_4_4_4_4,
            DataType::UnsignedShort5551 => glow::UNSIGNED_SHORT_5_5_5_1,
        }
    }
}

// --- Sampling ---

impl IntoGl<i32> for MinFilter {
    fn into_gl(self) -> i32 {
        (match self {
            MinFilter::Nearest => glow::NEAREST,
            MinFilter::Linear => glow::LINEAR,
            MinFilter::NearestMipmapNearest => glow::NEAREST_MIPMAP_NEAREST,
            MinFilter::LinearMipmapNearest => glow::LINEAR_MIPMAP_NEAREST,
            MinFilter::LinearMipmapLinear => glow::LINEAR_MIPMAP_LINEAR,
        }) as i32
    }
}

impl IntoGl<i32> for MagFilter {
    fn into_gl(self) -> i32 {
        (match self {
            MagFilter::Nearest => glow::NEAREST,
            MagFilter::Linear => glow::LINEAR,
        }) as i32
    }
}

impl IntoGl<i32> for WrapMode {
    fn into_gl(self) -> i32 {
        (match self {
            WrapMode::Repeat => glow::REPEAT,
            WrapMode::ClampToEdge => glow::CLAMP_TO_EDGE,
            WrapMode::MirroredRepeat => glow::MIRRORED_REPEAT,
        }) as i32
    }
}

impl IntoGl<u32> for WrapAxis {
    fn into_gl(self) -> u32 {
        match self {
            WrapAxis::S => glow::TEXTURE_WRAP_S,
            WrapAxis::T => glow::TEXTURE_WRAP_T,
        }
    }
}

impl IntoGl<u32> for MipmapHint {
    fn into_gl(self) -> u32 {
        match self {
            MipmapHint::DontCare => glow::DONT_CARE,
            MipmapHint::Fastest => glow::FASTEST,
            MipmapHint::Nicest => glow::NICEST,
        }
    }
}

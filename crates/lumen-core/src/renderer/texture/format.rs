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

//! Pixel formats and component data types.

use serde::{Deserialize, Serialize};

use crate::math::Extent2D;

/// The layout of the components of a pixel.
///
/// The same enum describes both the client-side pixel format of uploaded data
/// and the GPU-side texel format a texture was allocated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PixelFormat {
    /// A single alpha component.
    Alpha,
    /// A single luminance component.
    Luminance,
    /// Luminance followed by alpha.
    LuminanceAlpha,
    /// Red, green and blue components.
    Rgb,
    /// Red, green, blue and alpha components.
    Rgba,
}

impl PixelFormat {
    /// Returns `true` if the format carries an alpha component.
    pub const fn has_alpha(self) -> bool {
        matches!(
            self,
            PixelFormat::Alpha | PixelFormat::LuminanceAlpha | PixelFormat::Rgba
        )
    }

    /// The number of components per pixel.
    pub const fn component_count(self) -> u32 {
        match self {
            PixelFormat::Alpha | PixelFormat::Luminance => 1,
            PixelFormat::LuminanceAlpha => 2,
            PixelFormat::Rgb => 3,
            PixelFormat::Rgba => 4,
        }
    }
}

/// The storage type of pixel components in client memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// One unsigned byte per component.
    UnsignedByte,
    /// Packed 5-6-5 RGB in an unsigned short.
    UnsignedShort565,
    /// Packed 4-4-4-4 RGBA in an unsigned short.
    UnsignedShort4444,
    /// Packed 5-5-5-1 RGBA in an unsigned short.
    UnsignedShort5551,
}

impl DataType {
    /// Bytes per pixel for `format` stored with this data type.
    pub const fn bytes_per_pixel(self, format: PixelFormat) -> u32 {
        match self {
            DataType::UnsignedByte => format.component_count(),
            DataType::UnsignedShort565
            | DataType::UnsignedShort4444
            | DataType::UnsignedShort5551 => 2,
        }
    }

    /// Bytes needed for a tightly packed `extent` image of `format`.
    pub fn image_len(self, format: PixelFormat, extent: Extent2D) -> usize {
        extent.width as usize * extent.height as usize * self.bytes_per_pixel(format) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha_formats() {
        assert!(PixelFormat::Rgba.has_alpha());
        assert!(PixelFormat::LuminanceAlpha.has_alpha());
        assert!(!PixelFormat::Rgb.has_alpha());
        assert!(!PixelFormat::Luminance.has_alpha());
    }

    #[test]
    fn test_bytes_per_pixel() {
        assert_eq!(DataType::UnsignedByte.bytes_per_pixel(PixelFormat::Rgba), 4);
        assert_eq!(DataType::UnsignedByte.bytes_per_pixel(PixelFormat::Rgb), 3);
        assert_eq!(DataType::UnsignedShort565.bytes_per_pixel(PixelFormat::Rgb), 2);
    }

    #[test]
    fn test_image_len() {
        let extent = Extent2D::new(64, 32);
        assert_eq!(DataType::UnsignedByte.image_len(PixelFormat::Rgba, extent), 64 * 32 * 4);
        assert_eq!(DataType::UnsignedShort4444.image_len(PixelFormat::Rgba, extent), 64 * 32 * 2);
        assert_eq!(DataType::UnsignedByte.image_len(PixelFormat::Rgb, Extent2D::default()), 0);
    }
}

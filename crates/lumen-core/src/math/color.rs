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

//! Defines the `LinearRgba` color type and associated conversions.

use serde::{Deserialize, Serialize};

use super::Vec3;

/// Represents a color in a **linear RGBA** color space using `f32` components.
///
/// Components are not clamped; values above `1.0` express HDR intensities.
/// `#[repr(C)]` keeps the layout stable for uniform uploads.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[repr(C)]
pub struct LinearRgba {
    /// The red component in linear space.
    pub r: f32,
    /// The green component in linear space.
    pub g: f32,
    /// The blue component in linear space.
    pub b: f32,
    /// The alpha (opacity) component.
    pub a: f32,
}

impl LinearRgba {
    /// Opaque white (`[1.0, 1.0, 1.0, 1.0]`).
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    /// Opaque black (`[0.0, 0.0, 0.0, 1.0]`).
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    /// Opaque red (`[1.0, 0.0, 0.0, 1.0]`).
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    /// Opaque green (`[0.0, 1.0, 0.0, 1.0]`).
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    /// Opaque blue (`[0.0, 0.0, 1.0, 1.0]`).
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);

    /// Creates a new `LinearRgba` with explicit RGBA values.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a new opaque `LinearRgba` (alpha = 1.0).
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Creates an opaque color from a packed `0xAARRGGBB` integer.
    ///
    /// Each 8-bit channel is divided by 255. No gamma conversion is applied
    /// and the alpha byte is ignored.
    ///
    /// ```
    /// use lumen_core::math::LinearRgba;
    /// assert_eq!(LinearRgba::from_packed_rgb(0xFFFF0000), LinearRgba::RED);
    /// ```
    #[inline]
    pub fn from_packed_rgb(packed: u32) -> Self {
        let channel = |shift: u32| ((packed >> shift) & 0xFF) as f32 / 255.0;
        Self::rgb(channel(16), channel(8), channel(0))
    }

    /// Creates an opaque color from a vector, reading `x, y, z` as `r, g, b`.
    #[inline]
    pub fn from_vec3(v: Vec3) -> Self {
        Self::rgb(v.x, v.y, v.z)
    }

    /// Returns the `[r, g, b]` channels.
    #[inline]
    pub const fn to_rgb_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for LinearRgba {
    /// Returns opaque white by default.
    #[inline]
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_packed_rgb_channels() {
        let c = LinearRgba::from_packed_rgb(0x00336699);
        assert_relative_eq!(c.r, 0x33 as f32 / 255.0);
        assert_relative_eq!(c.g, 0x66 as f32 / 255.0);
        assert_relative_eq!(c.b, 0x99 as f32 / 255.0);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn test_packed_rgb_ignores_alpha() {
        assert_eq!(
            LinearRgba::from_packed_rgb(0x00FFFFFF),
            LinearRgba::from_packed_rgb(0x80FFFFFF)
        );
        assert_eq!(LinearRgba::from_packed_rgb(0x12FFFFFF), LinearRgba::WHITE);
    }

    #[test]
    fn test_from_vec3() {
        let c = LinearRgba::from_vec3(Vec3::new(0.1, 0.2, 0.3));
        assert_eq!(c.to_rgb_array(), [0.1, 0.2, 0.3]);
    }
}

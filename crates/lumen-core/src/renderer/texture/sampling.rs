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

//! Filtering and wrapping state of a texture.
//!
//! Filtering is configured as a single quality level ([`FilterType`]) which is
//! resolved, together with the texture's mipmapping flag, into the concrete
//! minification and magnification filters a backend understands.

use serde::{Deserialize, Serialize};

use crate::lumen_bitflags;

/// The requested filtering quality of a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Point sampling.
    Nearest,
    /// Linear sampling within a mip level.
    #[default]
    Bilinear,
    /// Linear sampling within and between mip levels. Requires mipmaps.
    Trilinear,
}

/// Minification filters understood by the backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MinFilter {
    /// Nearest texel, base level only.
    Nearest,
    /// Linear interpolation, base level only.
    Linear,
    /// Nearest texel from the nearest mip level.
    NearestMipmapNearest,
    /// Linear interpolation within the nearest mip level.
    LinearMipmapNearest,
    /// Linear interpolation within and between the two nearest mip levels.
    LinearMipmapLinear,
}

/// Magnification filters understood by the backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MagFilter {
    /// Nearest texel.
    Nearest,
    /// Linear interpolation of the four nearest texels.
    Linear,
}

/// The outcome of resolving a [`FilterType`] into a [`MinFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinFilterSelection {
    /// The filter to apply.
    pub filter: MinFilter,
    /// `true` if the requested quality could not be honoured and a lower one
    /// was substituted.
    pub degraded: bool,
}

impl FilterType {
    /// Resolves the minification filter for a texture with or without mipmaps.
    ///
    /// | filter    | mipmapped                 | not mipmapped          |
    /// |-----------|---------------------------|------------------------|
    /// | Nearest   | `NearestMipmapNearest`    | `Nearest`              |
    /// | Bilinear  | `LinearMipmapNearest`     | `Linear`               |
    /// | Trilinear | `LinearMipmapLinear`      | `Linear` (degraded)    |
    pub const fn min_filter(self, mipmapped: bool) -> MinFilterSelection {
        let (filter, degraded) = match (self, mipmapped) {
            (FilterType::Nearest, true) => (MinFilter::NearestMipmapNearest, false),
            (FilterType::Bilinear, true) => (MinFilter::LinearMipmapNearest, false),
            (FilterType::Trilinear, true) => (MinFilter::LinearMipmapLinear, false),
            (FilterType::Nearest, false) => (MinFilter::Nearest, false),
            (FilterType::Bilinear, false) => (MinFilter::Linear, false),
            (FilterType::Trilinear, false) => (MinFilter::Linear, true),
        };
        MinFilterSelection { filter, degraded }
    }

    /// Resolves the magnification filter. Mipmaps never apply to magnification.
    pub const fn mag_filter(self) -> MagFilter {
        match self {
            FilterType::Nearest => MagFilter::Nearest,
            FilterType::Bilinear | FilterType::Trilinear => MagFilter::Linear,
        }
    }
}

/// A texture coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WrapAxis {
    /// The horizontal (S, or U) coordinate.
    S,
    /// The vertical (T, or V) coordinate.
    T,
}

/// How texture coordinates outside `[0, 1]` are handled on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WrapMode {
    /// Coordinates wrap around. `1.1` becomes `0.1`.
    #[default]
    Repeat,
    /// Coordinates are clamped to the edge. `1.1` becomes `1.0`.
    ClampToEdge,
    /// Coordinates wrap around, mirroring at each integer boundary.
    MirroredRepeat,
}

lumen_bitflags! {
    /// Per-axis wrap flags of a texture. An axis with no flag set repeats.
    ///
    /// When both the clamp and the mirrored flag of an axis are set, clamping wins.
    pub struct WrapType: u32 {
        /// Clamp the S coordinate to the edge.
        const CLAMP_S = 1 << 0;
        /// Clamp the T coordinate to the edge.
        const CLAMP_T = 1 << 1;
        /// Mirror-repeat the S coordinate.
        const MIRRORED_REPEAT_S = 1 << 2;
        /// Mirror-repeat the T coordinate.
        const MIRRORED_REPEAT_T = 1 << 3;
    }
}

impl WrapType {
    /// Repeat on both axes.
    pub const REPEAT: Self = Self::EMPTY;

    /// Resolves the wrap mode of a single axis.
    pub const fn mode(&self, axis: WrapAxis) -> WrapMode {
        let (clamp, mirrored) = match axis {
            WrapAxis::S => (Self::CLAMP_S, Self::MIRRORED_REPEAT_S),
            WrapAxis::T => (Self::CLAMP_T, Self::MIRRORED_REPEAT_T),
        };
        if self.contains(clamp) {
            WrapMode::ClampToEdge
        } else if self.contains(mirrored) {
            WrapMode::MirroredRepeat
        } else {
            WrapMode::Repeat
        }
    }

    /// Builds the flag set that resolves to `s` and `t` on the respective axes.
    pub const fn from_modes(s: WrapMode, t: WrapMode) -> Self {
        let s_bits = match s {
            WrapMode::Repeat => 0,
            WrapMode::ClampToEdge => Self::CLAMP_S.bits,
            WrapMode::MirroredRepeat => Self::MIRRORED_REPEAT_S.bits,
        };
        let t_bits = match t {
            WrapMode::Repeat => 0,
            WrapMode::ClampToEdge => Self::CLAMP_T.bits,
            WrapMode::MirroredRepeat => Self::MIRRORED_REPEAT_T.bits,
        };
        Self::from_bits_truncate(s_bits | t_bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_filter_table() {
        let cases = [
            (FilterType::Nearest, true, MinFilter::NearestMipmapNearest, false),
            (FilterType::Bilinear, true, MinFilter::LinearMipmapNearest, false),
            (FilterType::Trilinear, true, MinFilter::LinearMipmapLinear, false),
            (FilterType::Nearest, false, MinFilter::Nearest, false),
            (FilterType::Bilinear, false, MinFilter::Linear, false),
            (FilterType::Trilinear, false, MinFilter::Linear, true),
        ];
        for (filter, mipmapped, expected, degraded) in cases {
            let selection = filter.min_filter(mipmapped);
            assert_eq!(
                selection.filter, expected,
                "{filter:?} mipmapped={mipmapped}"
            );
            assert_eq!(selection.degraded, degraded, "{filter:?} mipmapped={mipmapped}");
        }
    }

    #[test]
    fn test_mag_filter() {
        assert_eq!(FilterType::Nearest.mag_filter(), MagFilter::Nearest);
        assert_eq!(FilterType::Bilinear.mag_filter(), MagFilter::Linear);
        assert_eq!(FilterType::Trilinear.mag_filter(), MagFilter::Linear);
    }

    #[test]
    fn test_wrap_resolution_s_axis() {
        assert_eq!(WrapType::REPEAT.mode(WrapAxis::S), WrapMode::Repeat);
        assert_eq!(WrapType::CLAMP_S.mode(WrapAxis::S), WrapMode::ClampToEdge);
        assert_eq!(
            WrapType::MIRRORED_REPEAT_S.mode(WrapAxis::S),
            WrapMode::MirroredRepeat
        );
        assert_eq!(
            (WrapType::CLAMP_S | WrapType::MIRRORED_REPEAT_S).mode(WrapAxis::S),
            WrapMode::ClampToEdge
        );
        // T flags do not leak into S.
        assert_eq!(
            (WrapType::CLAMP_T | WrapType::MIRRORED_REPEAT_T).mode(WrapAxis::S),
            WrapMode::Repeat
        );
    }

    #[test]
    fn test_wrap_resolution_t_axis() {
        assert_eq!(WrapType::REPEAT.mode(WrapAxis::T), WrapMode::Repeat);
        assert_eq!(WrapType::CLAMP_T.mode(WrapAxis::T), WrapMode::ClampToEdge);
        assert_eq!(
            WrapType::MIRRORED_REPEAT_T.mode(WrapAxis::T),
            WrapMode::MirroredRepeat
        );
        assert_eq!(
            (WrapType::CLAMP_T | WrapType::MIRRORED_REPEAT_T).mode(WrapAxis::T),
            WrapMode::ClampToEdge
        );
        assert_eq!(
            (WrapType::CLAMP_S | WrapType::MIRRORED_REPEAT_S).mode(WrapAxis::T),
            WrapMode::Repeat
        );
    }
}

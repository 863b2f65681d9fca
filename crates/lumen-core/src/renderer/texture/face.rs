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

//! Texture targets and cube-map faces.

/// One of the six logical directions of a cube-map texture.
///
/// The declaration order is the canonical upload order and must match the
/// order of any per-face data list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CubeFace {
    /// The +X face.
    PositiveX,
    /// The -X face.
    NegativeX,
    /// The +Y face.
    PositiveY,
    /// The -Y face.
    NegativeY,
    /// The +Z face.
    PositiveZ,
    /// The -Z face.
    NegativeZ,
}

impl CubeFace {
    /// All faces in canonical order (+X, -X, +Y, -Y, +Z, -Z).
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PositiveX,
        CubeFace::NegativeX,
        CubeFace::PositiveY,
        CubeFace::NegativeY,
        CubeFace::PositiveZ,
        CubeFace::NegativeZ,
    ];

    /// The position of this face in [`CubeFace::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// A short label such as `"+X"`, used in log output.
    pub const fn label(self) -> &'static str {
        match self {
            CubeFace::PositiveX => "+X",
            CubeFace::NegativeX => "-X",
            CubeFace::PositiveY => "+Y",
            CubeFace::NegativeY => "-Y",
            CubeFace::PositiveZ => "+Z",
            CubeFace::NegativeZ => "-Z",
        }
    }
}

/// The binding point a whole texture is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureTarget {
    /// A single two-dimensional texture.
    Texture2D,
    /// A layered two-dimensional texture array.
    Texture2DArray,
    /// A cube-map texture.
    CubeMap,
}

/// The destination of a single image upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageTarget {
    /// The only image of a [`TextureTarget::Texture2D`].
    Texture2D,
    /// One layer of a [`TextureTarget::Texture2DArray`].
    Layer(u32),
    /// One face of a [`TextureTarget::CubeMap`].
    CubeFace(CubeFace),
}

impl ImageTarget {
    /// The texture target this image belongs to.
    pub const fn texture_target(self) -> TextureTarget {
        match self {
            ImageTarget::Texture2D => TextureTarget::Texture2D,
            ImageTarget::Layer(_) => TextureTarget::Texture2DArray,
            ImageTarget::CubeFace(_) => TextureTarget::CubeMap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_face_order() {
        let labels: Vec<_> = CubeFace::ALL.iter().map(|f| f.label()).collect();
        assert_eq!(labels, ["+X", "-X", "+Y", "-Y", "+Z", "-Z"]);
        for (i, face) in CubeFace::ALL.iter().enumerate() {
            assert_eq!(face.index(), i);
        }
    }

    #[test]
    fn test_image_target_parent() {
        assert_eq!(
            ImageTarget::CubeFace(CubeFace::NegativeY).texture_target(),
            TextureTarget::CubeMap
        );
        assert_eq!(
            ImageTarget::Layer(2).texture_target(),
            TextureTarget::Texture2DArray
        );
    }
}

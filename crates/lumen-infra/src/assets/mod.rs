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

//! Decoding image files into texture face data.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use lumen_core::renderer::{CubeFace, DecodedImage, TextureData};

/// Decodes an encoded image (PNG, JPEG, ...) from memory.
///
/// Images with an alpha channel decode to RGBA8, all others to RGB8, so the
/// texture they are uploaded to picks the matching texel format.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage> {
    let img = image::load_from_memory(bytes).context("Failed to decode image from memory")?;
    let (width, height) = (img.width(), img.height());

    let decoded = if img.color().has_alpha() {
        DecodedImage::rgba8(width, height, img.to_rgba8().into_raw())
    } else {
        DecodedImage::rgb8(width, height, img.to_rgb8().into_raw())
    };
    log::debug!(
        "Decoded {}x{} image ({:?})",
        width,
        height,
        decoded.texel_format()
    );
    Ok(decoded)
}

/// Reads and decodes an image file.
pub fn load_image(path: impl AsRef<Path>) -> Result<DecodedImage> {
    let path = path.as_ref();
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    decode_image(&bytes).with_context(|| format!("Failed to load {}", path.display()))
}

/// Loads the six faces of a cube map, given in canonical order
/// (+X, -X, +Y, -Y, +Z, -Z).
pub fn load_cube_faces<P: AsRef<Path>>(paths: &[P; 6]) -> Result<[TextureData; 6]> {
    let mut faces = Vec::with_capacity(CubeFace::ALL.len());
    for (face, path) in CubeFace::ALL.iter().zip(paths) {
        let image = load_image(path).with_context(|| format!("Cube face {}", face.label()))?;
        faces.push(TextureData::from_image(image));
    }
    faces
        .try_into()
        .map_err(|_| anyhow::anyhow!("expected exactly six cube faces"))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage};
    use lumen_core::math::Extent2D;
    use lumen_core::renderer::PixelFormat;

    use super::*;

    fn encode_png(img: DynamicImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_rgb_png_decodes_without_alpha() {
        let bytes = encode_png(DynamicImage::ImageRgb8(RgbImage::from_pixel(
            3,
            2,
            image::Rgb([10, 20, 30]),
        )));
        let decoded = decode_image(&bytes).unwrap();
        assert_eq!(decoded.extent(), Extent2D::new(3, 2));
        assert_eq!(decoded.texel_format(), PixelFormat::Rgb);
        assert_eq!(decoded.pixels().len(), 3 * 2 * 3);
        assert_eq!(&decoded.pixels()[..3], &[10, 20, 30]);
    }

    #[test]
    fn test_rgba_png_keeps_alpha() {
        let bytes = encode_png(DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            2,
            2,
            image::Rgba([1, 2, 3, 4]),
        )));
        let decoded = decode_image(&bytes).unwrap();
        assert!(decoded.has_alpha());
        assert_eq!(decoded.pixels().len(), 2 * 2 * 4);
    }

    #[test]
    fn test_garbage_is_an_error() {
        assert!(decode_image(b"not an image").is_err());
    }

    #[test]
    fn test_missing_file_names_the_path() {
        let err = load_image("missing/face.png").unwrap_err();
        assert!(format!("{err:#}").contains("missing/face.png"));
    }
}

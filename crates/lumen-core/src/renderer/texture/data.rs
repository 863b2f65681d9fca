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

//! CPU-side face data waiting to be uploaded to the GPU.

use std::sync::Arc;

use crate::math::Extent2D;
use crate::renderer::error::ValidationReason;

use super::format::{DataType, PixelFormat};

/// A decoded 8-bit image, tightly packed as RGB8 or RGBA8 rows.
///
/// Decoded images are uploaded through the backend's image-native path, which
/// derives the upload format from the image itself.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    width: u32,
    height: u32,
    has_alpha: bool,
    pixels: Arc<[u8]>,
}

impl DecodedImage {
    /// Wraps tightly packed RGBA8 pixels.
    pub fn rgba8(width: u32, height: u32, pixels: impl Into<Arc<[u8]>>) -> Self {
        Self {
            width,
            height,
            has_alpha: true,
            pixels: pixels.into(),
        }
    }

    /// Wraps tightly packed RGB8 pixels.
    pub fn rgb8(width: u32, height: u32, pixels: impl Into<Arc<[u8]>>) -> Self {
        Self {
            width,
            height,
            has_alpha: false,
            pixels: pixels.into(),
        }
    }

    /// The image extent.
    pub fn extent(&self) -> Extent2D {
        Extent2D::new(self.width, self.height)
    }

    /// Returns `true` if the pixels carry an alpha channel.
    pub fn has_alpha(&self) -> bool {
        self.has_alpha
    }

    /// The texel format a texture allocated from this image uses:
    /// [`PixelFormat::Rgba`] when alpha is present, [`PixelFormat::Rgb`] otherwise.
    pub fn texel_format(&self) -> PixelFormat {
        if self.has_alpha {
            PixelFormat::Rgba
        } else {
            PixelFormat::Rgb
        }
    }

    /// The raw pixel bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Bytes the pixels must hold to cover the whole extent.
    pub fn required_len(&self) -> usize {
        DataType::UnsignedByte.image_len(self.texel_format(), self.extent())
    }
}

/// The payload of a [`TextureData`].
#[derive(Debug, Clone, PartialEq)]
pub enum TextureContent {
    /// A raw pixel buffer, described by the data's pixel format and data type.
    Buffer(Arc<[u8]>),
    /// A decoded image.
    Image(DecodedImage),
}

/// Image data for one face of a texture.
///
/// Cloning is cheap: the pixel payload is shared. Destroying a clone releases
/// only that clone's reference.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureData {
    content: TextureContent,
    extent: Extent2D,
    pixel_format: PixelFormat,
    data_type: DataType,
    destroyed: bool,
}

impl TextureData {
    /// Describes a raw pixel buffer.
    pub fn from_buffer(
        bytes: impl Into<Arc<[u8]>>,
        extent: Extent2D,
        pixel_format: PixelFormat,
        data_type: DataType,
    ) -> Self {
        Self {
            content: TextureContent::Buffer(bytes.into()),
            extent,
            pixel_format,
            data_type,
            destroyed: false,
        }
    }

    /// Describes a decoded image. Extent and format are taken from the image.
    pub fn from_image(image: DecodedImage) -> Self {
        Self {
            extent: image.extent(),
            pixel_format: image.texel_format(),
            data_type: DataType::UnsignedByte,
            content: TextureContent::Image(image),
            destroyed: false,
        }
    }

    /// The payload.
    pub fn content(&self) -> &TextureContent {
        &self.content
    }

    /// Returns `true` if the payload is a raw buffer.
    pub fn has_buffer(&self) -> bool {
        matches!(self.content, TextureContent::Buffer(_))
    }

    /// Returns `true` if the payload is a decoded image.
    pub fn has_image(&self) -> bool {
        matches!(self.content, TextureContent::Image(_))
    }

    /// The face extent.
    pub fn extent(&self) -> Extent2D {
        self.extent
    }

    /// The client-side pixel format.
    pub fn pixel_format(&self) -> PixelFormat {
        self.pixel_format
    }

    /// The client-side component data type.
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Returns `true` once [`TextureData::destroy`] was called.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Releases this reference to the payload and marks the data unusable.
    pub fn destroy(&mut self) {
        self.content = TextureContent::Buffer(Arc::from(Vec::<u8>::new()));
        self.destroyed = true;
    }

    /// Checks that the data can be uploaded: not destroyed, and either a
    /// decoded image or a non-empty buffer.
    pub fn check_uploadable(&self) -> Result<(), ValidationReason> {
        if self.destroyed {
            return Err(ValidationReason::Destroyed);
        }
        match &self.content {
            TextureContent::Buffer(bytes) if bytes.is_empty() => {
                Err(ValidationReason::EmptyContent)
            }
            _ => Ok(()),
        }
    }
}

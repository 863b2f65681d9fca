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

use crate::math::{Extent2D, Origin2D};
use crate::renderer::error::BackendError;
use crate::renderer::texture::{
    DataType, DecodedImage, ImageTarget, MagFilter, MinFilter, PixelFormat, TextureHandle,
    TextureTarget, WrapAxis, WrapMode,
};

/// A sampling or storage parameter set on a bound texture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextureParameter {
    /// The minification filter.
    MinFilter(MinFilter),
    /// The magnification filter.
    MagFilter(MagFilter),
    /// The maximum anisotropy, already clamped to what the backend supports.
    MaxAnisotropy(f32),
    /// The wrap mode of one coordinate axis.
    Wrap(WrapAxis, WrapMode),
}

/// A quality hint for mipmap generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MipmapHint {
    /// Let the driver choose.
    DontCare,
    /// Prefer speed.
    Fastest,
    /// Prefer quality.
    Nicest,
}

/// A raw pixel upload described with explicit dimensions and formats.
#[derive(Debug, Clone, Copy)]
pub struct RawUpload<'a> {
    /// The GPU-side storage format of the texture.
    pub texel_format: PixelFormat,
    /// The region size in texels.
    pub extent: Extent2D,
    /// The layout of the client-side pixels.
    pub pixel_format: PixelFormat,
    /// The storage type of the client-side components.
    pub data_type: DataType,
    /// The pixel bytes.
    pub data: &'a [u8],
}

impl<'a> RawUpload<'a> {
    /// Describes a decoded image as a raw 8-bit upload into `texel_format`.
    pub fn from_image(image: &'a DecodedImage, texel_format: PixelFormat) -> Self {
        Self {
            texel_format,
            extent: image.extent(),
            pixel_format: image.texel_format(),
            data_type: DataType::UnsignedByte,
            data: image.pixels(),
        }
    }

    /// Bytes `data` must hold to cover `extent`.
    pub fn required_len(&self) -> usize {
        self.data_type.image_len(self.pixel_format, self.extent)
    }

    /// Fails with a [`BackendError`] for `operation` if `data` is shorter than
    /// [`RawUpload::required_len`].
    pub fn check_len(&self, operation: &'static str) -> Result<(), BackendError> {
        let required = self.required_len();
        if self.data.len() < required {
            return Err(BackendError::new(
                operation,
                format!(
                    "buffer holds {} bytes, {} needed for {}x{}",
                    self.data.len(),
                    required,
                    self.extent.width,
                    self.extent.height
                ),
            ));
        }
        Ok(())
    }
}

/// The verbs a graphics backend must provide to allocate and fill textures.
///
/// A context represents a single GPU command stream. Every method that issues
/// work takes `&mut self`, and texture operations receive the context
/// explicitly, so all uploads through one context are serialized by
/// construction. Implementations are not required to be `Send`.
///
/// All image uploads target mip level 0.
pub trait TextureContext {
    /// Requests a new, unbound texture handle.
    /// ## Errors
    /// * `BackendError` - If the backend cannot produce a valid handle.
    fn create_texture(&mut self) -> Result<TextureHandle, BackendError>;

    /// Releases a texture handle and its storage.
    fn delete_texture(&mut self, handle: TextureHandle) -> Result<(), BackendError>;

    /// Binds `handle` to `target`, or unbinds the target when `handle` is `None`.
    fn bind_texture(
        &mut self,
        target: TextureTarget,
        handle: Option<TextureHandle>,
    ) -> Result<(), BackendError>;

    /// Sets a parameter on the texture currently bound to `target`.
    fn set_parameter(
        &mut self,
        target: TextureTarget,
        parameter: TextureParameter,
    ) -> Result<(), BackendError>;

    /// Sets the quality hint used by subsequent mipmap generation.
    fn set_mipmap_hint(&mut self, hint: MipmapHint) -> Result<(), BackendError>;

    /// The largest anisotropy the backend accepts, or `None` if anisotropic
    /// filtering is unavailable.
    fn max_anisotropy_supported(&self) -> Option<f32>;

    /// Allocates storage for a layered texture bound to
    /// [`TextureTarget::Texture2DArray`]. Layers are then filled with
    /// [`TextureContext::tex_image_2d`] on [`ImageTarget::Layer`] targets.
    fn allocate_layers(
        &mut self,
        texel_format: PixelFormat,
        extent: Extent2D,
        layers: u32,
    ) -> Result<(), BackendError>;

    /// Specifies the full image at `target` from raw pixels.
    fn tex_image_2d(
        &mut self,
        target: ImageTarget,
        upload: RawUpload<'_>,
    ) -> Result<(), BackendError>;

    /// Specifies the full image at `target` from a decoded image, deriving the
    /// texel format and extent from the image.
    fn tex_image_2d_decoded(
        &mut self,
        target: ImageTarget,
        image: &DecodedImage,
    ) -> Result<(), BackendError>;

    /// Overwrites a region of the existing image at `target` from raw pixels.
    fn tex_sub_image_2d(
        &mut self,
        target: ImageTarget,
        origin: Origin2D,
        upload: RawUpload<'_>,
    ) -> Result<(), BackendError>;

    /// Overwrites a region of the existing image at `target` from a decoded
    /// image, converting to `texel_format`.
    fn tex_sub_image_2d_decoded(
        &mut self,
        target: ImageTarget,
        origin: Origin2D,
        image: &DecodedImage,
        texel_format: PixelFormat,
    ) -> Result<(), BackendError>;

    /// Generates the full mip chain of the texture bound to `target`.
    fn generate_mipmap(&mut self, target: TextureTarget) -> Result<(), BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_len_rejects_short_data() {
        let upload = RawUpload {
            texel_format: PixelFormat::Rgba,
            extent: Extent2D::new(64, 64),
            pixel_format: PixelFormat::Rgba,
            data_type: DataType::UnsignedByte,
            data: &[0u8; 16],
        };
        assert_eq!(upload.required_len(), 64 * 64 * 4);
        let err = upload.check_len("tex_image_2d").unwrap_err();
        assert_eq!(err.operation, "tex_image_2d");
    }

    #[test]
    fn test_decoded_image_upload_uses_its_own_layout() {
        let image = DecodedImage::rgb8(2, 2, vec![0u8; 12]);
        let upload = RawUpload::from_image(&image, PixelFormat::Rgb);
        assert_eq!(upload.pixel_format, PixelFormat::Rgb);
        assert_eq!(upload.required_len(), 12);
        assert!(upload.check_len("tex_image_2d").is_ok());

        let short = DecodedImage::rgba8(64, 64, vec![0u8; 4]);
        assert!(RawUpload::from_image(&short, PixelFormat::Rgba)
            .check_len("tex_image_2d")
            .is_err());
    }
}

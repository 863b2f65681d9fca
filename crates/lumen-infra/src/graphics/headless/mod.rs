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

//! A headless [`TextureContext`] that records every call.
//!
//! [`RecordingContext`] never touches a GPU. It issues handles, tracks which
//! texture is bound to each target and checks uploads the way a driver would
//! (a texture must be bound, buffers must hold enough bytes). Failures can be
//! injected to exercise error paths.

use std::collections::{HashMap, HashSet};

use lumen_core::math::{Extent2D, Origin2D};
use lumen_core::renderer::{
    BackendError, DataType, DecodedImage, ImageTarget, MipmapHint, PixelFormat, RawUpload,
    TextureContext, TextureHandle, TextureParameter, TextureTarget,
};

/// One call received by a [`RecordingContext`].
#[derive(Debug, Clone, PartialEq)]
pub enum TextureCall {
    /// A handle was issued.
    CreateTexture(TextureHandle),
    /// A handle was released.
    DeleteTexture(TextureHandle),
    /// A handle was bound to, or unbound from, a target.
    Bind {
        /// The binding point.
        target: TextureTarget,
        /// The bound handle, `None` for unbinding.
        handle: Option<TextureHandle>,
    },
    /// A parameter was set on the bound texture.
    SetParameter {
        /// The binding point.
        target: TextureTarget,
        /// The parameter and its value.
        parameter: TextureParameter,
    },
    /// The mipmap generation hint was set.
    MipmapHint(MipmapHint),
    /// Layered storage was allocated.
    AllocateLayers {
        /// The storage format.
        texel_format: PixelFormat,
        /// The size of each layer.
        extent: Extent2D,
        /// The number of layers.
        layers: u32,
    },
    /// A full image was specified from raw pixels.
    TexImage {
        /// The image that was written.
        target: ImageTarget,
        /// The storage format.
        texel_format: PixelFormat,
        /// The image size.
        extent: Extent2D,
        /// The client pixel format.
        pixel_format: PixelFormat,
        /// The client data type.
        data_type: DataType,
        /// The number of bytes supplied.
        len: usize,
    },
    /// A full image was specified from a decoded image.
    TexImageDecoded {
        /// The image that was written.
        target: ImageTarget,
        /// The image size.
        extent: Extent2D,
        /// The format derived from the image.
        texel_format: PixelFormat,
    },
    /// A region was overwritten from raw pixels.
    TexSubImage {
        /// The image that was written.
        target: ImageTarget,
        /// The region origin.
        origin: Origin2D,
        /// The region size.
        extent: Extent2D,
        /// The client pixel format.
        pixel_format: PixelFormat,
        /// The client data type.
        data_type: DataType,
    },
    /// A region was overwritten from a decoded image.
    TexSubImageDecoded {
        /// The image that was written.
        target: ImageTarget,
        /// The region origin.
        origin: Origin2D,
        /// The region size.
        extent: Extent2D,
        /// The storage format the image was converted to.
        texel_format: PixelFormat,
    },
    /// A mip chain was generated.
    GenerateMipmap(TextureTarget),
}

impl TextureCall {
    /// Returns `true` for the four image-upload calls.
    pub fn is_upload(&self) -> bool {
        matches!(
            self,
            TextureCall::TexImage { .. }
                | TextureCall::TexImageDecoded { .. }
                | TextureCall::TexSubImage { .. }
                | TextureCall::TexSubImageDecoded { .. }
        )
    }
}

/// A [`TextureContext`] that records calls instead of issuing GPU work.
#[derive(Debug, Default)]
pub struct RecordingContext {
    calls: Vec<TextureCall>,
    live: HashSet<TextureHandle>,
    bound: HashMap<TextureTarget, TextureHandle>,
    next_handle: u32,
    uploads: usize,
    max_anisotropy: Option<f32>,
    refuse_handles: bool,
    fail_upload_at: Option<usize>,
}

impl RecordingContext {
    /// Creates a context without anisotropic filtering support.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports `max` as the supported anisotropy.
    pub fn with_max_anisotropy(mut self, max: f32) -> Self {
        self.max_anisotropy = Some(max);
        self
    }

    /// Makes every subsequent `create_texture` call fail.
    pub fn refuse_handles(&mut self) {
        self.refuse_handles = true;
    }

    /// Makes the upload with the given zero-based index fail. Uploads are
    /// counted across the lifetime of the context.
    pub fn fail_upload_at(&mut self, index: usize) {
        self.fail_upload_at = Some(index);
    }

    /// Every call recorded so far, in order.
    pub fn calls(&self) -> &[TextureCall] {
        &self.calls
    }

    /// Returns and clears the recorded calls. Bindings and handles are kept.
    pub fn take_calls(&mut self) -> Vec<TextureCall> {
        std::mem::take(&mut self.calls)
    }

    /// The number of upload calls received so far, failed ones included.
    pub fn upload_count(&self) -> usize {
        self.uploads
    }

    /// Returns `true` if `handle` was issued and not yet deleted.
    pub fn is_live(&self, handle: TextureHandle) -> bool {
        self.live.contains(&handle)
    }

    /// The handle currently bound to `target`.
    pub fn bound(&self, target: TextureTarget) -> Option<TextureHandle> {
        self.bound.get(&target).copied()
    }

    fn require_bound(&self, operation: &'static str, target: TextureTarget) -> Result<(), BackendError> {
        if self.bound.contains_key(&target) {
            Ok(())
        } else {
            Err(BackendError::new(
                operation,
                format!("no texture bound to {target:?}"),
            ))
        }
    }

    fn begin_upload(&mut self, operation: &'static str, target: ImageTarget) -> Result<(), BackendError> {
        self.require_bound(operation, target.texture_target())?;
        let index = self.uploads;
        self.uploads += 1;
        if self.fail_upload_at == Some(index) {
            log::debug!("Injecting failure into upload #{index} ({operation})");
            return Err(BackendError::new(operation, "injected upload failure"));
        }
        Ok(())
    }
}

impl TextureContext for RecordingContext {
    fn create_texture(&mut self) -> Result<TextureHandle, BackendError> {
        if self.refuse_handles {
            return Err(BackendError::new("create_texture", "handle creation refused"));
        }
        self.next_handle += 1;
        let handle = TextureHandle(self.next_handle);
        self.live.insert(handle);
        self.calls.push(TextureCall::CreateTexture(handle));
        Ok(handle)
    }

    fn delete_texture(&mut self, handle: TextureHandle) -> Result<(), BackendError> {
        if !self.live.remove(&handle) {
            return Err(BackendError::new(
                "delete_texture",
                format!("{handle:?} is not a live texture"),
            ));
        }
        self.bound.retain(|_, bound| *bound != handle);
        self.calls.push(TextureCall::DeleteTexture(handle));
        Ok(())
    }

    fn bind_texture(
        &mut self,
        target: TextureTarget,
        handle: Option<TextureHandle>,
    ) -> Result<(), BackendError> {
        match handle {
            Some(handle) if !self.live.contains(&handle) => {
                return Err(BackendError::new(
                    "bind_texture",
                    format!("{handle:?} is not a live texture"),
                ));
            }
            Some(handle) => {
                self.bound.insert(target, handle);
            }
            None => {
                self.bound.remove(&target);
            }
        }
        self.calls.push(TextureCall::Bind { target, handle });
        Ok(())
    }

    fn set_parameter(
        &mut self,
        target: TextureTarget,
        parameter: TextureParameter,
    ) -> Result<(), BackendError> {
        self.require_bound("set_parameter", target)?;
        self.calls
            .push(TextureCall::SetParameter { target, parameter });
        Ok(())
    }

    fn set_mipmap_hint(&mut self, hint: MipmapHint) -> Result<(), BackendError> {
        self.calls.push(TextureCall::MipmapHint(hint));
        Ok(())
    }

    fn max_anisotropy_supported(&self) -> Option<f32> {
        self.max_anisotropy
    }

    fn allocate_layers(
        &mut self,
        texel_format: PixelFormat,
        extent: Extent2D,
        layers: u32,
    ) -> Result<(), BackendError> {
        self.require_bound("allocate_layers", TextureTarget::Texture2DArray)?;
        self.calls.push(TextureCall::AllocateLayers {
            texel_format,
            extent,
            layers,
        });
        Ok(())
    }

    fn tex_image_2d(
        &mut self,
        target: ImageTarget,
        upload: RawUpload<'_>,
    ) -> Result<(), BackendError> {
        upload.check_len("tex_image_2d")?;
        self.begin_upload("tex_image_2d", target)?;
        self.calls.push(TextureCall::TexImage {
            target,
            texel_format: upload.texel_format,
            extent: upload.extent,
            pixel_format: upload.pixel_format,
            data_type: upload.data_type,
            len: upload.data.len(),
        });
        Ok(())
    }

    fn tex_image_2d_decoded(
        &mut self,
        target: ImageTarget,
        image: &DecodedImage,
    ) -> Result<(), BackendError> {
        RawUpload::from_image(image, image.texel_format()).check_len("tex_image_2d")?;
        self.begin_upload("tex_image_2d", target)?;
        self.calls.push(TextureCall::TexImageDecoded {
            target,
            extent: image.extent(),
            texel_format: image.texel_format(),
        });
        Ok(())
    }

    fn tex_sub_image_2d(
        &mut self,
        target: ImageTarget,
        origin: Origin2D,
        upload: RawUpload<'_>,
    ) -> Result<(), BackendError> {
        upload.check_len("tex_sub_image_2d")?;
        self.begin_upload("tex_sub_image_2d", target)?;
        self.calls.push(TextureCall::TexSubImage {
            target,
            origin,
            extent: upload.extent,
            pixel_format: upload.pixel_format,
            data_type: upload.data_type,
        });
        Ok(())
    }

    fn tex_sub_image_2d_decoded(
        &mut self,
        target: ImageTarget,
        origin: Origin2D,
        image: &DecodedImage,
        texel_format: PixelFormat,
    ) -> Result<(), BackendError> {
        RawUpload::from_image(image, texel_format).check_len("tex_sub_image_2d")?;
        self.begin_upload("tex_sub_image_2d", target)?;
        self.calls.push(TextureCall::TexSubImageDecoded {
            target,
            origin,
            extent: image.extent(),
            texel_format,
        });
        Ok(())
    }

    fn generate_mipmap(&mut self, target: TextureTarget) -> Result<(), BackendError> {
        self.require_bound("generate_mipmap", target)?;
        self.calls.push(TextureCall::GenerateMipmap(target));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_unique_and_tracked() {
        let mut ctx = RecordingContext::new();
        let a = ctx.create_texture().unwrap();
        let b = ctx.create_texture().unwrap();
        assert_ne!(a, b);
        assert!(ctx.is_live(a));

        ctx.delete_texture(a).unwrap();
        assert!(!ctx.is_live(a));
        assert!(ctx.delete_texture(a).is_err());
    }

    #[test]
    fn test_upload_requires_binding() {
        let mut ctx = RecordingContext::new();
        let image = DecodedImage::rgba8(1, 1, vec![0u8; 4]);
        let result = ctx.tex_image_2d_decoded(ImageTarget::Texture2D, &image);
        assert!(result.is_err());
        assert!(ctx.calls().is_empty());
    }

    #[test]
    fn test_short_buffer_is_rejected() {
        let mut ctx = RecordingContext::new();
        let handle = ctx.create_texture().unwrap();
        ctx.bind_texture(TextureTarget::Texture2D, Some(handle))
            .unwrap();
        let result = ctx.tex_image_2d(
            ImageTarget::Texture2D,
            RawUpload {
                texel_format: PixelFormat::Rgba,
                extent: Extent2D::new(2, 2),
                pixel_format: PixelFormat::Rgba,
                data_type: DataType::UnsignedByte,
                data: &[0u8; 15],
            },
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_short_decoded_image_is_rejected() {
        let mut ctx = RecordingContext::new();
        let handle = ctx.create_texture().unwrap();
        ctx.bind_texture(TextureTarget::Texture2D, Some(handle))
            .unwrap();
        let image = DecodedImage::rgba8(64, 64, vec![0u8; 4]);
        let result = ctx.tex_image_2d_decoded(ImageTarget::Texture2D, &image);
        assert!(result.is_err());
        assert_eq!(ctx.upload_count(), 0);
    }

    #[test]
    fn test_deleting_a_bound_texture_unbinds_it() {
        let mut ctx = RecordingContext::new();
        let handle = ctx.create_texture().unwrap();
        ctx.bind_texture(TextureTarget::CubeMap, Some(handle))
            .unwrap();
        ctx.delete_texture(handle).unwrap();
        assert_eq!(ctx.bound(TextureTarget::CubeMap), None);
    }
}

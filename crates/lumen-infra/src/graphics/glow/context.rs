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

//! The `glow` implementation of [`TextureContext`].

use std::collections::HashMap;

use glow::HasContext;
use lumen_core::math::{Extent2D, Origin2D};
use lumen_core::renderer::{
    BackendError, DecodedImage, ImageTarget, MipmapHint, PixelFormat, RawUpload,
    TextureContext, TextureHandle, TextureParameter, TextureTarget,
};

use super::conversions::{IntoGl, MAX_TEXTURE_MAX_ANISOTROPY_EXT, TEXTURE_MAX_ANISOTROPY_EXT};

const ANISOTROPY_EXTENSIONS: [&str; 2] = [
    "GL_EXT_texture_filter_anisotropic",
    "EXT_texture_filter_anisotropic",
];

/// Wraps a `glow::Context` and maps texture verbs onto GL calls.
///
/// Handles given out to the resource layer are small integers looked up in a
/// table of native `glow::Texture`s. The context must be current on the calling
/// thread for every call; `glow::Context` is not `Send`, and neither is this.
pub struct GlowContext {
    gl: glow::Context,
    textures: HashMap<TextureHandle, glow::Texture>,
    next_handle: u32,
    max_anisotropy: Option<f32>,
    mipmap_hint: MipmapHint,
}

impl GlowContext {
    /// Wraps `gl` and queries its texture capabilities.
    ///
    /// Rows of uploaded pixels are treated as tightly packed.
    pub fn new(gl: glow::Context) -> Self {
        let extensions = gl.supported_extensions();
        let max_anisotropy = if ANISOTROPY_EXTENSIONS
            .iter()
            .any(|name| extensions.contains(*name))
        {
            // SAFETY: the caller hands over a context that is current on this thread.
            Some(unsafe { gl.get_parameter_f32(MAX_TEXTURE_MAX_ANISOTROPY_EXT) })
        } else {
            None
        };
        // SAFETY: as above.
        unsafe { gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1) };

        log::info!(
            "GL texture backend ready: anisotropic filtering {}",
            match max_anisotropy {
                Some(max) => format!("up to {max}x"),
                None => "unavailable".to_string(),
            }
        );

        Self {
            gl,
            textures: HashMap::new(),
            next_handle: 0,
            max_anisotropy,
            mipmap_hint: MipmapHint::DontCare,
        }
    }

    /// Returns a reference to the underlying `glow::Context`.
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    /// The last mipmap quality hint requested.
    pub fn mipmap_hint(&self) -> MipmapHint {
        self.mipmap_hint
    }

    /// The native texture behind `handle`, for binding in draw code.
    pub fn native_texture(&self, handle: TextureHandle) -> Option<glow::Texture> {
        self.textures.get(&handle).copied()
    }

    fn native(
        &self,
        operation: &'static str,
        handle: TextureHandle,
    ) -> Result<glow::Texture, BackendError> {
        self.native_texture(handle).ok_or_else(|| {
            BackendError::new(operation, format!("{handle:?} is not a live texture"))
        })
    }

    /// Drains the GL error flag after `operation`.
    fn check(&self, operation: &'static str) -> Result<(), BackendError> {
        // SAFETY: the context is current on this thread.
        let code = unsafe { self.gl.get_error() };
        if code == glow::NO_ERROR {
            Ok(())
        } else {
            Err(BackendError::new(operation, format!("GL error 0x{code:04X}")))
        }
    }

    fn raw_image(&self, target: ImageTarget, upload: &RawUpload<'_>) -> Result<(), BackendError> {
        upload.check_len("tex_image_2d")?;
        let width = gl_size("tex_image_2d", upload.extent.width)?;
        let height = gl_size("tex_image_2d", upload.extent.height)?;
        let texel_format: u32 = upload.texel_format.into_gl();
        let format: u32 = upload.pixel_format.into_gl();
        let ty: u32 = upload.data_type.into_gl();
        // SAFETY: the context is current, UNPACK_ALIGNMENT is 1 and `check_len`
        // made sure `data` covers the whole image.
        unsafe {
            match target {
                ImageTarget::Layer(layer) => self.gl.tex_sub_image_3d(
                    glow::TEXTURE_2D_ARRAY,
                    0,
                    0,
                    0,
                    gl_size("tex_image_2d", layer)?,
                    width,
                    height,
                    1,
                    format,
                    ty,
                    glow::PixelUnpackData::Slice(upload.data),
                ),
                _ => self.gl.tex_image_2d(
                    target.into_gl(),
                    0,
                    texel_format as i32,
                    width,
                    height,
                    0,
                    format,
                    ty,
                    Some(upload.data),
                ),
            }
        }
        self.check("tex_image_2d")
    }

    fn raw_sub_image(
        &self,
        target: ImageTarget,
        origin: Origin2D,
        upload: &RawUpload<'_>,
    ) -> Result<(), BackendError> {
        upload.check_len("tex_sub_image_2d")?;
        let x = gl_size("tex_sub_image_2d", origin.x)?;
        let y = gl_size("tex_sub_image_2d", origin.y)?;
        let width = gl_size("tex_sub_image_2d", upload.extent.width)?;
        let height = gl_size("tex_sub_image_2d", upload.extent.height)?;
        let format: u32 = upload.pixel_format.into_gl();
        let ty: u32 = upload.data_type.into_gl();
        let pixels = glow::PixelUnpackData::Slice(upload.data);
        // SAFETY: the context is current, `data` covers the region, and the
        // region lies inside the image allocated by a previous full upload.
        unsafe {
            match target {
                ImageTarget::Layer(layer) => self.gl.tex_sub_image_3d(
                    glow::TEXTURE_2D_ARRAY,
                    0,
                    x,
                    y,
                    gl_size("tex_sub_image_2d", layer)?,
                    width,
                    height,
                    1,
                    format,
                    ty,
                    pixels,
                ),
                _ => self.gl.tex_sub_image_2d(
                    target.into_gl(),
                    0,
                    x,
                    y,
                    width,
                    height,
                    format,
                    ty,
                    pixels,
                ),
            }
        }
        self.check("tex_sub_image_2d")
    }
}

fn gl_size(operation: &'static str, value: u32) -> Result<i32, BackendError> {
    i32::try_from(value)
        .map_err(|_| BackendError::new(operation, format!("{value} exceeds the GL size range")))
}

impl TextureContext for GlowContext {
    fn create_texture(&mut self) -> Result<TextureHandle, BackendError> {
        // SAFETY: the context is current on this thread.
        let native = unsafe { self.gl.create_texture() }
            .map_err(|message| BackendError::new("create_texture", message))?;
        self.next_handle += 1;
        let handle = TextureHandle(self.next_handle);
        self.textures.insert(handle, native);
        log::debug!("Created GL texture {native:?} as {handle:?}");
        Ok(handle)
    }

    fn delete_texture(&mut self, handle: TextureHandle) -> Result<(), BackendError> {
        let native = self.textures.remove(&handle).ok_or_else(|| {
            BackendError::new("delete_texture", format!("{handle:?} is not a live texture"))
        })?;
        // SAFETY: `native` was created by this context and is deleted once.
        unsafe { self.gl.delete_texture(native) };
        log::debug!("Deleted GL texture {native:?} ({handle:?})");
        self.check("delete_texture")
    }

    fn bind_texture(
        &mut self,
        target: TextureTarget,
        handle: Option<TextureHandle>,
    ) -> Result<(), BackendError> {
        let native = handle
            .map(|handle| self.native("bind_texture", handle))
            .transpose()?;
        // SAFETY: the context is current and `native` is live or `None`.
        unsafe { self.gl.bind_texture(target.into_gl(), native) };
        self.check("bind_texture")
    }

    fn set_parameter(
        &mut self,
        target: TextureTarget,
        parameter: TextureParameter,
    ) -> Result<(), BackendError> {
        let target: u32 = target.into_gl();
        log::debug!("Texture parameter {parameter:?} on 0x{target:04X}");
        // SAFETY: the context is current on this thread.
        unsafe {
            match parameter {
                TextureParameter::MinFilter(filter) => {
                    self.gl
                        .tex_parameter_i32(target, glow::TEXTURE_MIN_FILTER, filter.into_gl())
                }
                TextureParameter::MagFilter(filter) => {
                    self.gl
                        .tex_parameter_i32(target, glow::TEXTURE_MAG_FILTER, filter.into_gl())
                }
                TextureParameter::MaxAnisotropy(value) => {
                    self.gl
                        .tex_parameter_f32(target, TEXTURE_MAX_ANISOTROPY_EXT, value)
                }
                TextureParameter::Wrap(axis, mode) => {
                    self.gl
                        .tex_parameter_i32(target, axis.into_gl(), mode.into_gl())
                }
            }
        }
        self.check("set_parameter")
    }

    /// `glow` exposes no `glHint`, so the hint is only recorded. Drivers treat
    /// it as advisory and fall back to their default quality.
    fn set_mipmap_hint(&mut self, hint: MipmapHint) -> Result<(), BackendError> {
        if self.mipmap_hint != hint {
            log::debug!(
                "Mipmap hint {hint:?} (GL 0x{:04X}) recorded; not forwarded by glow",
                IntoGl::<u32>::into_gl(hint)
            );
            self.mipmap_hint = hint;
        }
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
        let format: u32 = texel_format.into_gl();
        // SAFETY: the context is current; no client memory is read.
        unsafe {
            self.gl.tex_image_3d(
                glow::TEXTURE_2D_ARRAY,
                0,
                format as i32,
                gl_size("allocate_layers", extent.width)?,
                gl_size("allocate_layers", extent.height)?,
                gl_size("allocate_layers", layers)?,
                0,
                format,
                glow::UNSIGNED_BYTE,
                None,
            )
        };
        self.check("allocate_layers")
    }

    fn tex_image_2d(
        &mut self,
        target: ImageTarget,
        upload: RawUpload<'_>,
    ) -> Result<(), BackendError> {
        self.raw_image(target, &upload)
    }

    fn tex_image_2d_decoded(
        &mut self,
        target: ImageTarget,
        image: &DecodedImage,
    ) -> Result<(), BackendError> {
        self.raw_image(target, &RawUpload::from_image(image, image.texel_format()))
    }

    fn tex_sub_image_2d(
        &mut self,
        target: ImageTarget,
        origin: Origin2D,
        upload: RawUpload<'_>,
    ) -> Result<(), BackendError> {
        self.raw_sub_image(target, origin, &upload)
    }

    fn tex_sub_image_2d_decoded(
        &mut self,
        target: ImageTarget,
        origin: Origin2D,
        image: &DecodedImage,
        texel_format: PixelFormat,
    ) -> Result<(), BackendError> {
        self.raw_sub_image(target, origin, &RawUpload::from_image(image, texel_format))
    }

    fn generate_mipmap(&mut self, target: TextureTarget) -> Result<(), BackendError> {
        // SAFETY: the context is current on this thread.
        unsafe { self.gl.generate_mipmap(target.into_gl()) };
        self.check("generate_mipmap")
    }
}

impl Drop for GlowContext {
    fn drop(&mut self) {
        if !self.textures.is_empty() {
            log::warn!(
                "GL texture backend dropped with {} live textures",
                self.textures.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // GlowContext requires a live GL context, so only the API shape is checked.

    #[test]
    fn glow_context_implements_texture_context() {
        fn _assert_backend<C: TextureContext>() {}
        _assert_backend::<GlowContext>();
    }

    #[test]
    fn oversized_extent_is_rejected() {
        assert!(gl_size("tex_image_2d", u32::MAX).is_err());
        assert_eq!(gl_size("tex_image_2d", 512).unwrap(), 512);
    }
}

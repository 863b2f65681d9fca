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

//! The validated allocate / replace / destroy protocol of [`Texture`].
//!
//! Every operation validates the texture's face data completely before the
//! first backend call is issued. Once backend work starts, calls are not
//! transactional: a failure part-way leaves the texture in
//! [`TextureState::Failed`] and releasing the handle is up to the caller.

use crate::math::Origin2D;
use crate::renderer::error::{BackendError, TextureError, ValidationReason};
use crate::renderer::traits::{MipmapHint, RawUpload, TextureContext, TextureParameter};

use super::data::{TextureContent, TextureData};
use super::resource::{Texture, TextureHandle, TextureKind, TextureState};
use super::sampling::WrapAxis;

/// Which operation a validation pass runs for.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Pass {
    Allocate,
    Replace,
}

impl Texture {
    /// Allocates the GPU texture and uploads every face.
    ///
    /// The texture must be [`TextureState::Unallocated`] and carry one data slot
    /// per image target of its kind. On success the texture becomes
    /// [`TextureState::Allocated`] and, if recycling is enabled, its face data is
    /// dropped.
    ///
    /// # Errors
    /// * [`TextureError::Validation`] if the face data is missing, incomplete,
    ///   destroyed, empty, of the wrong size, or holds fewer bytes than its
    ///   extent needs. No backend call is made.
    /// * [`TextureError::Configuration`] if the texture is not unallocated, if a
    ///   layered kind has no layers, or if raw buffers are uploaded while the
    ///   width or height is zero.
    /// * [`TextureError::Allocation`] if the backend refuses a handle or a call.
    ///   If the handle was already created, the state is [`TextureState::Failed`].
    pub fn allocate<C>(&mut self, ctx: &mut C) -> Result<TextureHandle, TextureError>
    where
        C: TextureContext + ?Sized,
    {
        if self.state != TextureState::Unallocated {
            return Err(self.configuration_error(format!(
                "cannot allocate a texture in state {:?}",
                self.state
            )));
        }
        if self.kind == TextureKind::Multi(0) {
            return Err(self.configuration_error(
                "a layered texture needs at least one layer".to_string(),
            ));
        }
        let faces = self.validated_faces(Pass::Allocate)?;
        let needs_extent = faces.iter().any(|face| face.has_buffer())
            || matches!(self.kind, TextureKind::Multi(_));
        if needs_extent && self.extent.is_empty() {
            return Err(self.configuration_error(format!(
                "width and height must be set before upload, was {}x{}",
                self.extent.width, self.extent.height
            )));
        }

        let handle = ctx
            .create_texture()
            .map_err(|source| self.allocation_error(source))?;

        if let Err(source) = self.configure_and_upload(ctx, handle) {
            log::error!(
                "Texture '{}' left partially uploaded as {:?}: {}",
                self.name,
                handle,
                source
            );
            self.unbind_after_failure(ctx);
            self.state = TextureState::Failed(handle);
            return Err(self.allocation_error(source));
        }

        self.state = TextureState::Allocated(handle);
        if self.recycle {
            self.texture_data = None;
        }
        log::info!(
            "Allocated {:?} texture '{}' ({}x{}, {:?}) as {:?}",
            self.kind,
            self.name,
            self.extent.width,
            self.extent.height,
            self.texel_format,
            handle
        );
        Ok(handle)
    }

    /// Re-uploads the current face data into the existing allocation.
    ///
    /// Filtering and wrapping are left as they were at allocation. Mipmaps are
    /// regenerated if the texture is mipmapped.
    ///
    /// # Errors
    /// * [`TextureError::Configuration`] if the texture is not allocated.
    /// * [`TextureError::Validation`] if the face data is missing, incomplete,
    ///   destroyed or empty, if a face's size differs from the allocation, or if
    ///   a decoded image's format differs from the texel format. No backend call
    ///   is made.
    /// * [`TextureError::Allocation`] if the backend rejects a call. The texture
    ///   stays allocated with partially updated contents.
    pub fn replace<C>(&mut self, ctx: &mut C) -> Result<(), TextureError>
    where
        C: TextureContext + ?Sized,
    {
        let TextureState::Allocated(handle) = self.state else {
            return Err(self.configuration_error(format!(
                "cannot replace a texture in state {:?}",
                self.state
            )));
        };
        self.validated_faces(Pass::Replace)?;

        if let Err(source) = self.upload_replacement(ctx, handle) {
            log::error!("Replacing texture '{}' failed: {}", self.name, source);
            self.unbind_after_failure(ctx);
            return Err(self.allocation_error(source));
        }

        log::info!("Replaced the contents of texture '{}'", self.name);
        Ok(())
    }

    /// Releases the GPU texture and the face data.
    ///
    /// Allocated and failed textures delete their handle. An unallocated texture
    /// is only marked destroyed. Destroying twice is a no-op.
    ///
    /// # Errors
    /// * [`TextureError::Allocation`] if the backend fails to delete the handle.
    ///   The texture keeps its state so the call can be retried.
    pub fn destroy<C>(&mut self, ctx: &mut C) -> Result<(), TextureError>
    where
        C: TextureContext + ?Sized,
    {
        match self.state {
            TextureState::Allocated(handle) | TextureState::Failed(handle) => {
                ctx.delete_texture(handle)
                    .map_err(|source| self.allocation_error(source))?;
                log::info!("Destroyed texture '{}' ({:?})", self.name, handle);
            }
            TextureState::Unallocated => {}
            TextureState::Destroyed => return Ok(()),
        }
        self.texture_data = None;
        self.state = TextureState::Destroyed;
        Ok(())
    }

    /// Checks the face data against the texture without touching the backend.
    /// Returns the faces to upload, in image-target order.
    fn validated_faces(&self, pass: Pass) -> Result<Vec<&TextureData>, TextureError> {
        let expected = self.kind.face_count();
        let slots = self
            .texture_data
            .as_deref()
            .ok_or_else(|| self.validation_error(None, ValidationReason::MissingData))?;
        if slots.len() < expected {
            return Err(self.validation_error(
                None,
                ValidationReason::InsufficientFaces {
                    found: slots.len(),
                    expected,
                },
            ));
        }

        let mut faces = Vec::with_capacity(expected);
        for (index, slot) in slots.iter().take(expected).enumerate() {
            let face = slot
                .as_ref()
                .ok_or_else(|| self.validation_error(Some(index), ValidationReason::MissingFace))?;
            face.check_uploadable()
                .map_err(|reason| self.validation_error(Some(index), reason))?;

            let found = face.extent();
            let size_mismatch = match pass {
                Pass::Allocate => {
                    !found.is_empty() && !self.extent.is_empty() && found != self.extent
                }
                Pass::Replace => found != self.extent,
            };
            if size_mismatch {
                return Err(self.validation_error(
                    Some(index),
                    ValidationReason::SizeMismatch {
                        expected: self.extent,
                        found,
                    },
                ));
            }

            let (required, found_len) = match face.content() {
                TextureContent::Buffer(bytes) => (
                    face.data_type().image_len(face.pixel_format(), self.extent),
                    bytes.len(),
                ),
                TextureContent::Image(image) => (image.required_len(), image.pixels().len()),
            };
            if found_len < required {
                return Err(self.validation_error(
                    Some(index),
                    ValidationReason::BufferTooSmall {
                        expected: required,
                        found: found_len,
                    },
                ));
            }

            if pass == Pass::Replace {
                if let TextureContent::Image(image) = face.content() {
                    if image.texel_format() != self.texel_format {
                        return Err(self.validation_error(
                            Some(index),
                            ValidationReason::FormatMismatch {
                                expected: self.texel_format,
                                found: image.texel_format(),
                            },
                        ));
                    }
                }
            }
            faces.push(face);
        }
        Ok(faces)
    }

    fn configure_and_upload<C>(&self, ctx: &mut C, handle: TextureHandle) -> Result<(), BackendError>
    where
        C: TextureContext + ?Sized,
    {
        let target = self.kind.target();
        ctx.bind_texture(target, Some(handle))?;

        let min = self.filter.min_filter(self.mipmapped);
        if min.degraded {
            log::warn!(
                "Texture '{}' requests {:?} filtering without mipmaps; using {:?} instead",
                self.name,
                self.filter,
                min.filter
            );
        }
        ctx.set_parameter(target, TextureParameter::MinFilter(min.filter))?;
        ctx.set_parameter(target, TextureParameter::MagFilter(self.filter.mag_filter()))?;

        if self.max_anisotropy > 1.0 {
            match ctx.max_anisotropy_supported() {
                Some(supported) => ctx.set_parameter(
                    target,
                    TextureParameter::MaxAnisotropy(self.max_anisotropy.min(supported)),
                )?,
                None => log::warn!(
                    "Anisotropic filtering is unavailable; ignoring {}x on texture '{}'",
                    self.max_anisotropy,
                    self.name
                ),
            }
        }

        for axis in [WrapAxis::S, WrapAxis::T] {
            ctx.set_parameter(target, TextureParameter::Wrap(axis, self.wrap.mode(axis)))?;
        }

        if let TextureKind::Multi(layers) = self.kind {
            ctx.allocate_layers(self.texel_format, self.extent, layers)?;
        }

        for (index, face) in self.faces().enumerate() {
            let image_target = self.kind.image_target(index);
            ctx.set_mipmap_hint(MipmapHint::Nicest)?;
            match face.content() {
                TextureContent::Buffer(bytes) => ctx.tex_image_2d(
                    image_target,
                    RawUpload {
                        texel_format: self.texel_format,
                        extent: self.extent,
                        pixel_format: face.pixel_format(),
                        data_type: face.data_type(),
                        data: bytes,
                    },
                )?,
                TextureContent::Image(image) => ctx.tex_image_2d_decoded(image_target, image)?,
            }
        }

        if self.mipmapped {
            ctx.generate_mipmap(target)?;
        }
        ctx.bind_texture(target, None)
    }

    fn upload_replacement<C>(&self, ctx: &mut C, handle: TextureHandle) -> Result<(), BackendError>
    where
        C: TextureContext + ?Sized,
    {
        let target = self.kind.target();
        ctx.bind_texture(target, Some(handle))?;

        for (index, face) in self.faces().enumerate() {
            let image_target = self.kind.image_target(index);
            match face.content() {
                TextureContent::Buffer(bytes) => ctx.tex_sub_image_2d(
                    image_target,
                    Origin2D::ZERO,
                    RawUpload {
                        texel_format: self.texel_format,
                        extent: self.extent,
                        pixel_format: face.pixel_format(),
                        data_type: face.data_type(),
                        data: bytes,
                    },
                )?,
                TextureContent::Image(image) => ctx.tex_sub_image_2d_decoded(
                    image_target,
                    Origin2D::ZERO,
                    image,
                    self.texel_format,
                )?,
            }
        }

        if self.mipmapped {
            ctx.generate_mipmap(target)?;
        }
        ctx.bind_texture(target, None)
    }

    /// The validated faces, in image-target order. Only called after
    /// [`Texture::validated_faces`] succeeded.
    fn faces(&self) -> impl Iterator<Item = &TextureData> {
        self.texture_data
            .iter()
            .flatten()
            .take(self.kind.face_count())
            .flatten()
    }

    fn unbind_after_failure<C>(&self, ctx: &mut C)
    where
        C: TextureContext + ?Sized,
    {
        if let Err(err) = ctx.bind_texture(self.kind.target(), None) {
            log::error!("Could not unbind texture '{}': {}", self.name, err);
        }
    }

    fn validation_error(&self, face: Option<usize>, reason: ValidationReason) -> TextureError {
        TextureError::Validation {
            texture: self.name.clone(),
            face,
            reason,
        }
    }

    fn configuration_error(&self, message: String) -> TextureError {
        TextureError::Configuration {
            texture: self.name.clone(),
            message,
        }
    }

    fn allocation_error(&self, source: BackendError) -> TextureError {
        TextureError::Allocation {
            texture: self.name.clone(),
            source,
        }
    }
}

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

//! The texture resource and its lifecycle state.

use crate::config::TextureDefaults;
use crate::math::Extent2D;

use super::data::{TextureContent, TextureData};
use super::face::{CubeFace, ImageTarget, TextureTarget};
use super::format::PixelFormat;
use super::sampling::{FilterType, WrapAxis, WrapType};

/// An opaque handle to a GPU texture, issued by a
/// [`TextureContext`](crate::renderer::TextureContext).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// The shape of a texture resource, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKind {
    /// A single 2D image.
    Single,
    /// A 2D array with the given number of layers. Allocation requires at
    /// least one.
    Multi(u32),
    /// A cube map with six faces.
    Cube,
}

impl TextureKind {
    /// The binding point of the whole texture.
    pub const fn target(self) -> TextureTarget {
        match self {
            TextureKind::Single => TextureTarget::Texture2D,
            TextureKind::Multi(_) => TextureTarget::Texture2DArray,
            TextureKind::Cube => TextureTarget::CubeMap,
        }
    }

    /// The number of images that make up the texture.
    pub const fn face_count(self) -> usize {
        match self {
            TextureKind::Single => 1,
            TextureKind::Multi(layers) => layers as usize,
            TextureKind::Cube => CubeFace::ALL.len(),
        }
    }

    /// The upload target of the image at `index`, in canonical order.
    ///
    /// # Panics
    /// Panics if `index` is not below [`TextureKind::face_count`].
    pub fn image_target(self, index: usize) -> ImageTarget {
        assert!(index < self.face_count(), "face index {index} out of range");
        match self {
            TextureKind::Single => ImageTarget::Texture2D,
            TextureKind::Multi(_) => ImageTarget::Layer(index as u32),
            TextureKind::Cube => ImageTarget::CubeFace(CubeFace::ALL[index]),
        }
    }
}

/// Where a texture is in its GPU lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureState {
    /// No GPU storage has been requested yet.
    Unallocated,
    /// The texture is fully configured and uploaded.
    Allocated(TextureHandle),
    /// A backend call failed after the handle was created. The handle is still
    /// live and its contents are undefined; release it with `destroy`.
    Failed(TextureHandle),
    /// The GPU storage was released.
    Destroyed,
}

/// A GPU texture resource together with its CPU-side face data.
///
/// The resource is created without GPU storage. [`Texture::allocate`] performs the
/// one-time allocation and upload, [`Texture::replace`] re-uploads face data into
/// the existing storage and [`Texture::destroy`] releases it.
///
/// Filtering, wrapping and anisotropy are applied at allocation time only;
/// changing them afterwards has no effect on the GPU texture.
#[derive(Debug, Clone)]
pub struct Texture {
    pub(super) name: String,
    pub(super) kind: TextureKind,
    pub(super) state: TextureState,
    pub(super) extent: Extent2D,
    pub(super) texel_format: PixelFormat,
    pub(super) filter: FilterType,
    pub(super) mipmapped: bool,
    pub(super) max_anisotropy: f32,
    pub(super) wrap: WrapType,
    pub(super) recycle: bool,
    pub(super) is_sky_texture: bool,
    pub(super) texture_data: Option<Vec<Option<TextureData>>>,
}

impl Texture {
    /// Creates an unallocated texture of the given kind with default settings.
    ///
    /// Cube maps clamp both coordinates to the edge; other kinds repeat.
    pub fn new(name: impl Into<String>, kind: TextureKind) -> Self {
        let wrap = match kind {
            TextureKind::Cube => WrapType::CLAMP_S | WrapType::CLAMP_T,
            TextureKind::Single | TextureKind::Multi(_) => WrapType::REPEAT,
        };
        Self {
            name: name.into(),
            kind,
            state: TextureState::Unallocated,
            extent: Extent2D::default(),
            texel_format: PixelFormat::Rgba,
            filter: FilterType::default(),
            mipmapped: true,
            max_anisotropy: 1.0,
            wrap,
            recycle: false,
            is_sky_texture: false,
            texture_data: None,
        }
    }

    /// Creates an unallocated single 2D texture.
    pub fn single(name: impl Into<String>) -> Self {
        Self::new(name, TextureKind::Single)
    }

    /// Creates an unallocated cube-map texture with no data.
    pub fn cube_map(name: impl Into<String>) -> Self {
        Self::new(name, TextureKind::Cube)
    }

    /// Creates an unallocated cube-map texture from six faces in canonical order.
    pub fn cube_map_with_faces(name: impl Into<String>, faces: [TextureData; 6]) -> Self {
        let mut texture = Self::cube_map(name);
        texture.set_faces(faces);
        texture
    }

    /// Creates a new, unallocated texture with the same settings and shared face
    /// data as `self`.
    pub fn duplicate(&self) -> Self {
        Self {
            state: TextureState::Unallocated,
            ..self.clone()
        }
    }

    /// Applies configured defaults. Wrap modes left unset in `defaults` keep the
    /// kind's own default.
    pub fn apply_defaults(&mut self, defaults: &TextureDefaults) {
        self.filter = defaults.filter;
        self.mipmapped = defaults.mipmap;
        self.max_anisotropy = defaults.max_anisotropy;
        self.recycle = defaults.recycle;
        if defaults.wrap_s.is_some() || defaults.wrap_t.is_some() {
            let current = self.wrap;
            self.wrap = WrapType::from_modes(
                defaults.wrap_s.unwrap_or(current.mode(WrapAxis::S)),
                defaults.wrap_t.unwrap_or(current.mode(WrapAxis::T)),
            );
        }
    }

    // --- Face data ---

    /// Replaces the face data. `None` clears it.
    ///
    /// While the texture is unallocated and its extent is still zero, the extent
    /// is adopted from the first face that has one. While unallocated, the texel
    /// format is adopted from the first decoded image.
    pub fn set_texture_data(&mut self, data: Option<Vec<Option<TextureData>>>) {
        if self.state == TextureState::Unallocated {
            if let Some(faces) = data.as_deref() {
                let mut present = faces.iter().flatten();
                if self.extent.is_empty() {
                    if let Some(face) = present.clone().find(|f| !f.extent().is_empty()) {
                        self.extent = face.extent();
                    }
                }
                if let Some(image) = present.find_map(|f| match f.content() {
                    TextureContent::Image(image) => Some(image),
                    TextureContent::Buffer(_) => None,
                }) {
                    self.texel_format = image.texel_format();
                }
            }
        }
        self.texture_data = data;
    }

    /// Sets every face slot at once.
    pub fn set_faces<I>(&mut self, faces: I)
    where
        I: IntoIterator<Item = TextureData>,
    {
        self.set_texture_data(Some(faces.into_iter().map(Some).collect()));
    }

    /// The current face data, if any.
    pub fn texture_data(&self) -> Option<&[Option<TextureData>]> {
        self.texture_data.as_deref()
    }

    /// Removes and returns the face data.
    pub fn take_texture_data(&mut self) -> Option<Vec<Option<TextureData>>> {
        self.texture_data.take()
    }

    // --- Accessors ---

    /// The debug name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The texture kind chosen at construction.
    pub fn kind(&self) -> TextureKind {
        self.kind
    }

    /// The binding point of this texture.
    pub fn target(&self) -> TextureTarget {
        self.kind.target()
    }

    /// The lifecycle state.
    pub fn state(&self) -> TextureState {
        self.state
    }

    /// The GPU handle, if the texture is allocated.
    pub fn handle(&self) -> Option<TextureHandle> {
        match self.state {
            TextureState::Allocated(handle) => Some(handle),
            _ => None,
        }
    }

    /// The recorded extent.
    pub fn extent(&self) -> Extent2D {
        self.extent
    }

    /// The recorded width in texels.
    pub fn width(&self) -> u32 {
        self.extent.width
    }

    /// The recorded height in texels.
    pub fn height(&self) -> u32 {
        self.extent.height
    }

    /// Sets the extent used for raw-buffer uploads.
    pub fn set_extent(&mut self, extent: Extent2D) {
        self.extent = extent;
    }

    /// The GPU-side storage format.
    pub fn texel_format(&self) -> PixelFormat {
        self.texel_format
    }

    /// Sets the GPU-side storage format.
    pub fn set_texel_format(&mut self, format: PixelFormat) {
        self.texel_format = format;
    }

    /// The requested filter quality.
    pub fn filter(&self) -> FilterType {
        self.filter
    }

    /// Sets the requested filter quality.
    pub fn set_filter(&mut self, filter: FilterType) {
        self.filter = filter;
    }

    /// Returns `true` if a mip chain is generated on upload.
    pub fn is_mipmapped(&self) -> bool {
        self.mipmapped
    }

    /// Enables or disables mip chain generation.
    pub fn set_mipmapped(&mut self, mipmapped: bool) {
        self.mipmapped = mipmapped;
    }

    /// The requested maximum anisotropy. Values of `1.0` or less disable it.
    pub fn max_anisotropy(&self) -> f32 {
        self.max_anisotropy
    }

    /// Sets the requested maximum anisotropy.
    pub fn set_max_anisotropy(&mut self, max_anisotropy: f32) {
        self.max_anisotropy = max_anisotropy;
    }

    /// The wrap flags.
    pub fn wrap(&self) -> WrapType {
        self.wrap
    }

    /// Sets the wrap flags.
    pub fn set_wrap(&mut self, wrap: WrapType) {
        self.wrap = wrap;
    }

    /// Returns `true` if face data is released after a successful allocation.
    pub fn will_recycle(&self) -> bool {
        self.recycle
    }

    /// Sets whether face data is released after a successful allocation.
    pub fn set_recycle(&mut self, recycle: bool) {
        self.recycle = recycle;
    }

    /// Returns `true` if this cube map is used as a sky box rather than an
    /// environment map.
    pub fn is_sky_texture(&self) -> bool {
        self.is_sky_texture
    }

    /// Marks this texture as a sky box (`true`) or environment map (`false`).
    pub fn set_sky_texture(&mut self, value: bool) {
        self.is_sky_texture = value;
    }
}

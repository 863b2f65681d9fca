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

//! GPU texture resources.
//!
//! A [`Texture`] is a single resource type parameterised by its [`TextureKind`]
//! (a single 2D image, an N-layer 2D array, or a six-face cube map). The kind is
//! selected at construction and drives the texture target, the number of faces
//! and the image target each face is uploaded to.
//!
//! Face data is described by [`TextureData`], which is either a raw pixel buffer
//! or a [`DecodedImage`]. Sampling state (filtering and wrapping) is described by
//! the types in [`sampling`].

pub mod data;
pub mod face;
pub mod format;
pub mod resource;
pub mod sampling;
mod upload;

pub use self::data::{DecodedImage, TextureContent, TextureData};
pub use self::face::{CubeFace, ImageTarget, TextureTarget};
pub use self::format::{DataType, PixelFormat};
pub use self::resource::{Texture, TextureHandle, TextureKind, TextureState};
pub use self::sampling::{
    FilterType, MagFilter, MinFilter, MinFilterSelection, WrapAxis, WrapMode, WrapType,
};

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

//! Provides the public, backend-agnostic rendering contracts.
//!
//! This module defines the "common language" for GPU resource work: the
//! [`TextureContext`] trait a graphics backend implements, the [`Texture`]
//! resource with its validated upload protocol, the light sources consumed by
//! shaders, and the error types surfaced by all of them.
//!
//! The 'what' lives here; the 'how' is handled by a concrete backend in the
//! `lumen-infra` crate (e.g. the `glow` backend) implementing [`TextureContext`].

pub mod error;
pub mod light;
pub mod texture;
pub mod traits;

// Re-export the most important traits and types for easier use.
pub use self::error::{BackendError, TextureError, ValidationReason};
pub use self::light::{LightKind, LightSource};
pub use self::texture::*;
pub use self::traits::{MipmapHint, RawUpload, TextureContext, TextureParameter};

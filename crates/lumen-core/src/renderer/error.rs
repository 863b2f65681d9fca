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

//! Defines the error types for GPU texture resources.
//!
//! Three kinds of failure:
//! - [`TextureError::Validation`]: caller-supplied data is malformed or inconsistent.
//!   Always detected before any backend call.
//! - [`TextureError::Configuration`]: the resource is used before required
//!   properties were set, or in the wrong lifecycle state.
//! - [`TextureError::Allocation`]: the graphics backend refused a handle or a call.

use std::fmt;

use crate::math::Extent2D;
use crate::renderer::texture::PixelFormat;

/// An error reported by a graphics backend for a single call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{operation} failed: {message}")]
pub struct BackendError {
    /// The backend verb that failed (e.g. `"create_texture"`).
    pub operation: &'static str,
    /// The backend's description of the failure.
    pub message: String,
}

impl BackendError {
    /// Creates a new backend error for the given operation.
    pub fn new(operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }
}

/// Why a set of face data was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationReason {
    /// No texture data was set on the resource.
    MissingData,
    /// Fewer data slots than the texture kind has faces.
    InsufficientFaces {
        /// Number of slots that were supplied.
        found: usize,
        /// Number of faces the texture kind requires.
        expected: usize,
    },
    /// A face slot is empty.
    MissingFace,
    /// The face data was destroyed before upload.
    Destroyed,
    /// The face carries a zero-length buffer and no decoded image.
    EmptyContent,
    /// The pixel bytes do not cover the upload extent.
    BufferTooSmall {
        /// Bytes needed for the extent and format.
        expected: usize,
        /// Bytes supplied.
        found: usize,
    },
    /// The face extent differs from the texture's recorded extent.
    SizeMismatch {
        /// The texture's recorded extent.
        expected: Extent2D,
        /// The face's extent.
        found: Extent2D,
    },
    /// A decoded image's format differs from the texture's recorded texel format.
    FormatMismatch {
        /// The texture's recorded texel format.
        expected: PixelFormat,
        /// The decoded image's format.
        found: PixelFormat,
    },
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationReason::MissingData => write!(f, "no texture data was set"),
            ValidationReason::InsufficientFaces { found, expected } => {
                write!(f, "insufficient face data, was {found}, expected {expected}")
            }
            ValidationReason::MissingFace => write!(f, "face data is missing"),
            ValidationReason::Destroyed => write!(f, "face data was destroyed"),
            ValidationReason::EmptyContent => {
                write!(f, "face data has a zero-length buffer and no image")
            }
            ValidationReason::BufferTooSmall { expected, found } => {
                write!(f, "face data holds {found} bytes, {expected} needed")
            }
            ValidationReason::SizeMismatch { expected, found } => write!(
                f,
                "face size {}x{} differs from the texture size {}x{}",
                found.width, found.height, expected.width, expected.height
            ),
            ValidationReason::FormatMismatch { expected, found } => write!(
                f,
                "image format {found:?} differs from the texel format {expected:?}"
            ),
        }
    }
}

/// An error raised by a [`Texture`](crate::renderer::Texture) operation.
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    /// Malformed or inconsistent caller-supplied face data.
    #[error("texture '{texture}'{}: {reason}", face_suffix(.face))]
    Validation {
        /// The texture's name.
        texture: String,
        /// The index of the offending face, if a single face is at fault.
        face: Option<usize>,
        /// What was wrong with the data.
        reason: ValidationReason,
    },
    /// The resource was used before required properties were set, or in the
    /// wrong lifecycle state.
    #[error("texture '{texture}' is misconfigured: {message}")]
    Configuration {
        /// The texture's name.
        texture: String,
        /// A description of the missing or conflicting configuration.
        message: String,
    },
    /// The graphics backend refused to produce a resource or rejected a call.
    #[error("texture '{texture}' could not be allocated: {source}")]
    Allocation {
        /// The texture's name.
        texture: String,
        /// The backend failure.
        #[source]
        source: BackendError,
    },
}

impl TextureError {
    /// Returns the validation reason if this is a validation error.
    pub fn validation_reason(&self) -> Option<&ValidationReason> {
        match self {
            TextureError::Validation { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

fn face_suffix(face: &Option<usize>) -> String {
    face.map(|index| format!(" face {index}")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn validation_error_display_names_face() {
        let err = TextureError::Validation {
            texture: "sky".to_string(),
            face: Some(3),
            reason: ValidationReason::Destroyed,
        };
        assert_eq!(format!("{err}"), "texture 'sky' face 3: face data was destroyed");
    }

    #[test]
    fn validation_error_display_without_face() {
        let err = TextureError::Validation {
            texture: "sky".to_string(),
            face: None,
            reason: ValidationReason::InsufficientFaces {
                found: 4,
                expected: 6,
            },
        };
        assert_eq!(
            format!("{err}"),
            "texture 'sky': insufficient face data, was 4, expected 6"
        );
    }

    #[test]
    fn allocation_error_wraps_backend_error() {
        let err = TextureError::Allocation {
            texture: "sky".to_string(),
            source: BackendError::new("create_texture", "out of memory"),
        };
        assert_eq!(
            format!("{err}"),
            "texture 'sky' could not be allocated: create_texture failed: out of memory"
        );
        assert!(err.source().is_some());
    }
}

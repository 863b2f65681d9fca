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

//! # Lumen Core
//!
//! Foundational crate containing the backend-agnostic contracts of the renderer:
//! GPU texture resources and their upload protocol, scene light sources, the
//! capability records scene members expose, and the configuration types that
//! seed them.
//!
//! Nothing in this crate talks to a graphics API directly. Every operation that
//! needs the GPU receives an explicit [`renderer::TextureContext`], which is
//! implemented by the backends in `lumen-infra`.

#![warn(missing_docs)]

pub mod config;
pub mod math;
pub mod renderer;
pub mod scene;
pub mod utils;

pub use config::RenderConfig;

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

//! Scene-graph contracts consumed by the renderer.
//!
//! The scene graph itself lives outside this crate. What lives here is the
//! small contract every node type must honour: a fixed [`NodeCapabilities`]
//! record and the [`SceneMember`] trait built on it, plus the [`Transform`] a
//! node is positioned by.

mod node;
mod transform;

pub use self::node::{
    render_member, ChildMembers, FrameTaskKind, FrameView, NodeCapabilities, NodeId, RenderHook,
    SceneMember,
};
pub use self::transform::Transform;

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

//! Node capability records and the [`SceneMember`] trait.

/// Identifies a node inside the owning scene graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// Whether a node type can own child nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChildMembers {
    /// The node is a leaf.
    None,
    /// The node may own children.
    Some,
}

/// Whether a node type contributes draw work when a frame is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderHook {
    /// The render hook does nothing. The node is read by other passes.
    NoOp,
    /// The render hook issues work.
    Active,
}

/// The task category the scene graph files a node under when building a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameTaskKind {
    /// A light source.
    Light,
    /// A drawable object.
    Object,
    /// A camera.
    Camera,
}

/// The fixed capability profile of a node type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeCapabilities {
    /// Whether the node type can own children.
    pub children: ChildMembers,
    /// Whether the node type's render hook does anything.
    pub render_hook: RenderHook,
    /// How the node is filed when a frame is built.
    pub task_kind: FrameTaskKind,
}

impl NodeCapabilities {
    /// A childless leaf that never draws, such as a light.
    pub const PASSIVE_LEAF: Self = Self {
        children: ChildMembers::None,
        render_hook: RenderHook::NoOp,
        task_kind: FrameTaskKind::Light,
    };
}

/// The matrices of the frame being rendered, column-major.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameView {
    /// The combined view-projection matrix.
    pub view_projection: [f32; 16],
    /// The projection matrix.
    pub projection: [f32; 16],
    /// The view matrix.
    pub view: [f32; 16],
}

impl FrameView {
    const IDENTITY_MATRIX: [f32; 16] = [
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ];

    /// A view with every matrix set to identity.
    pub const IDENTITY: Self = Self {
        view_projection: Self::IDENTITY_MATRIX,
        projection: Self::IDENTITY_MATRIX,
        view: Self::IDENTITY_MATRIX,
    };
}

impl Default for FrameView {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A node type that can be placed in the scene graph.
///
/// Each implementor declares its capabilities once, as a constant. The scene
/// graph reads [`SceneMember::CAPABILITIES`] to decide whether to descend into
/// children or call the render hook, so these decisions are resolved per type at
/// compile time.
pub trait SceneMember {
    /// The capability profile shared by every node of this type.
    const CAPABILITIES: NodeCapabilities;

    /// Returns `true` if this node currently owns children.
    fn has_child_members(&self) -> bool {
        Self::CAPABILITIES.children == ChildMembers::Some && !self.child_members().is_empty()
    }

    /// The node's children. Leaves return an empty slice.
    fn child_members(&self) -> &[NodeId] {
        &[]
    }

    /// Issues the node's draw work for a frame. The default does nothing.
    fn render_to_frame(&mut self, _view: &FrameView) {}
}

/// Calls the render hook of `member` if its type declares an active hook.
///
/// Returns `true` if the hook was called.
pub fn render_member<M: SceneMember>(member: &mut M, view: &FrameView) -> bool {
    match M::CAPABILITIES.render_hook {
        RenderHook::NoOp => false,
        RenderHook::Active => {
            member.render_to_frame(view);
            true
        }
    }
}

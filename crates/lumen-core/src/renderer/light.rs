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

//! Defines the light source scene node.
//!
//! A [`LightSource`] carries the parameters shaders read when lighting a frame:
//! a color, an intensity ("power") and a kind. It is a leaf of the scene graph
//! and draws nothing itself; the renderer uploads its values as uniforms on a
//! separate path.

use serde::{Deserialize, Serialize};

use crate::config::LightDefaults;
use crate::math::{LinearRgba, Vec3};
use crate::scene::{NodeCapabilities, SceneMember, Transform};

/// The shape of a light's emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LightKind {
    /// Parallel rays from an infinitely distant source, like the sun.
    #[default]
    Directional,
    /// Rays in every direction from a single point.
    Point,
    /// Rays in a cone from a single point.
    Spot,
}

impl LightKind {
    /// The index shaders use to branch on the light kind.
    pub const fn shader_index(self) -> u32 {
        match self {
            LightKind::Directional => 0,
            LightKind::Point => 1,
            LightKind::Spot => 2,
        }
    }
}

/// A light source node.
///
/// # Examples
///
/// ```
/// use lumen_core::renderer::{LightKind, LightSource};
/// use lumen_core::math::Vec3;
///
/// let mut lamp = LightSource::new(LightKind::Point);
/// lamp.set_color_packed(0xFFFF8000);
/// lamp.transform_mut().set_position(Vec3::new(0.0, 3.0, 0.0));
/// assert_eq!(lamp.position_array(), &[0.0, 3.0, 0.0]);
/// ```
#[derive(Debug, Clone)]
pub struct LightSource {
    kind: LightKind,
    color: LinearRgba,
    power: f32,
    use_object_transform: bool,
    transform: Transform,
    position_array: [f32; 3],
    direction_array: [f32; 3],
}

impl LightSource {
    /// Creates a white light of the given kind with power `0.5`.
    pub fn new(kind: LightKind) -> Self {
        Self {
            kind,
            color: LinearRgba::WHITE,
            power: 0.5,
            use_object_transform: false,
            transform: Transform::identity(),
            position_array: [0.0; 3],
            direction_array: [0.0; 3],
        }
    }

    /// Creates a light from configured defaults.
    pub fn from_defaults(defaults: &LightDefaults) -> Self {
        let [r, g, b] = defaults.color;
        let mut light = Self::new(defaults.kind);
        light.set_color_rgb(r, g, b);
        light.power = defaults.power;
        light.use_object_transform = defaults.use_object_transform;
        light
    }

    /// The light kind.
    pub fn kind(&self) -> LightKind {
        self.kind
    }

    /// Changes the light kind.
    pub fn set_kind(&mut self, kind: LightKind) {
        self.kind = kind;
    }

    /// Sets the color from linear channels. Values are not clamped.
    pub fn set_color_rgb(&mut self, r: f32, g: f32, b: f32) {
        self.color = LinearRgba::rgb(r, g, b);
    }

    /// Sets the color from a packed `0xAARRGGBB` integer. The alpha byte is
    /// ignored.
    pub fn set_color_packed(&mut self, packed: u32) {
        self.color = LinearRgba::from_packed_rgb(packed);
    }

    /// Sets the color from a vector, reading `x, y, z` as `r, g, b`.
    pub fn set_color_vec3(&mut self, color: Vec3) {
        self.color = LinearRgba::from_vec3(color);
    }

    /// The `[r, g, b]` color.
    pub fn color(&self) -> [f32; 3] {
        self.color.to_rgb_array()
    }

    /// The intensity.
    pub fn power(&self) -> f32 {
        self.power
    }

    /// Sets the intensity.
    pub fn set_power(&mut self, power: f32) {
        self.power = power;
    }

    /// Returns `true` if the renderer should light with the owning object's
    /// transform rather than this node's.
    pub fn use_object_transform(&self) -> bool {
        self.use_object_transform
    }

    /// Sets whether the owning object's transform is used.
    pub fn set_use_object_transform(&mut self, value: bool) {
        self.use_object_transform = value;
    }

    /// The transform the light is placed by.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Mutable access to the transform.
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    /// The current world position.
    pub fn position(&self) -> Vec3 {
        self.transform.position()
    }

    /// Refreshes the position scratch buffer from the transform and borrows it.
    ///
    /// Every call writes into and returns the same buffer, so the borrow must
    /// end before the transform can be moved again.
    pub fn position_array(&mut self) -> &[f32; 3] {
        self.position_array = self.transform.position().to_array();
        &self.position_array
    }

    /// Refreshes the direction scratch buffer with the transform's forward
    /// vector and borrows it. Same aliasing as [`LightSource::position_array`].
    pub fn direction_array(&mut self) -> &[f32; 3] {
        self.direction_array = self.transform.forward().to_array();
        &self.direction_array
    }
}

impl Default for LightSource {
    fn default() -> Self {
        Self::new(LightKind::default())
    }
}

impl SceneMember for LightSource {
    const CAPABILITIES: NodeCapabilities = NodeCapabilities::PASSIVE_LEAF;
}

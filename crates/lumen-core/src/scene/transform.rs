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

use serde::{Deserialize, Serialize};

use crate::math::{Quaternion, Vec3};

/// The position, rotation and scale of a scene node relative to the world
/// origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// The translation (position) of the node.
    pub translation: Vec3,
    /// The rotation of the node.
    pub rotation: Quaternion,
    /// The scale of the node.
    pub scale: Vec3,
}

impl Transform {
    /// Creates a new `Transform` with a given translation, rotation, and scale.
    pub fn new(translation: Vec3, rotation: Quaternion, scale: Vec3) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    /// Creates a new `Transform` at `translation` with identity rotation and scale.
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::identity()
        }
    }

    /// The identity transform, placed at the origin.
    pub fn identity() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quaternion::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    /// The world-space position.
    pub fn position(&self) -> Vec3 {
        self.translation
    }

    /// Moves the node to `position`.
    pub fn set_position(&mut self, position: Vec3) {
        self.translation = position;
    }

    /// Moves the node by `offset`.
    pub fn translate(&mut self, offset: Vec3) {
        self.translation = self.translation + offset;
    }

    /// Applies `rotation` on top of the current rotation.
    pub fn rotate(&mut self, rotation: Quaternion) {
        self.rotation = (rotation * self.rotation).normalize();
    }

    /// The direction the node faces: `-Z` rotated by the node's rotation.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::FORWARD
    }
}

impl Default for Transform {
    /// Returns the identity `Transform`.
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::FRAC_PI_2;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_faces_negative_z() {
        assert_eq!(Transform::identity().forward(), Vec3::FORWARD);
    }

    #[test]
    fn test_translate_accumulates() {
        let mut transform = Transform::from_translation(Vec3::new(1.0, 0.0, 0.0));
        transform.translate(Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(transform.position(), Vec3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn test_rotated_forward() {
        let mut transform = Transform::identity();
        transform.rotate(Quaternion::from_axis_angle(Vec3::Y, FRAC_PI_2));
        let forward = transform.forward();
        assert_relative_eq!(forward.x, -1.0, epsilon = 1e-5);
        assert_relative_eq!(forward.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(forward.z, 0.0, epsilon = 1e-5);
    }
}

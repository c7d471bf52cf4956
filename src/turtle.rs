//! Turtle state and the command set it understands.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Position and orientation of the plant-growing turtle.
///
/// The orientation is stored as a rotation from the canonical frame (forward `+Z`,
/// up `+Y`, left `+X`). The three frame vectors are read back through
/// [`forward`](Self::forward), [`up`](Self::up) and [`left`](Self::left), so they are
/// orthonormal by construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurtleState {
    /// Current world-space position of the cursor.
    pub position: Vec3,

    /// Current world-space orientation.
    pub rotation: Quat,
}

impl Default for TurtleState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl TurtleState {
    /// Heading: the direction the turtle moves in (local Z).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Local Y axis in world space.
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Local X axis in world space.
    pub fn left(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Advances the position by `distance` along the heading.
    pub fn move_forward(&mut self, distance: f32) {
        self.position += self.forward() * distance;
    }

    /// Rotates around the local up axis by `angle` radians (yaw).
    pub fn turn(&mut self, angle: f32) {
        self.rotate_local(Vec3::Y, angle);
    }

    /// Rotates around the local left axis by `angle` radians (pitch).
    pub fn pitch(&mut self, angle: f32) {
        self.rotate_local(Vec3::X, angle);
    }

    /// Rotates around the heading by `angle` radians (roll).
    pub fn roll(&mut self, angle: f32) {
        self.rotate_local(Vec3::Z, angle);
    }

    fn rotate_local(&mut self, axis: Vec3, angle: f32) {
        let rot = Quat::from_axis_angle(axis, angle);
        // Renormalize so long walks don't drift off the unit sphere.
        self.rotation = (self.rotation * rot).normalize();
    }
}

/// Operations that a symbol can be bound to.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum TurtleOp {
    /// Move forward one step and emit a branch (`F`).
    Draw,
    /// Move forward one step without emitting anything (`f`).
    Move,
    /// Rotate around up by `sign * angle` (`+`/`-`).
    Turn(f32),
    /// Rotate around left by `sign * angle` (`&`/`^`).
    Pitch(f32),
    /// Rotate around forward by `sign * angle` (`\` / `/`).
    Roll(f32),
    /// Turn 180 degrees around up (`|`).
    TurnAround,
    /// Emit a marker tagged with the symbol, without moving (`*`).
    Marker,
    /// Save the turtle state onto the branch stack (`[`).
    Push,
    /// Restore the most recently pushed turtle state (`]`).
    Pop,
    /// No-op: symbol only exists for rewriting.
    Ignore,
}

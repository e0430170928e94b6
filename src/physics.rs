//! Physics engine seam
//!
//! The game never simulates anything itself. It creates bodies, nudges the
//! ball and flips bodies between static and dynamic through this trait;
//! the engine (Matter.js in the browser) owns positions and contacts.

use glam::Vec2;

use crate::sim::geometry::Rect;
use crate::sim::win::BodyLabel;

/// Commands the game issues to the external physics engine
pub trait PhysicsWorld {
    /// Opaque body reference handed back by the engine
    type Handle: Copy + Eq + std::fmt::Debug;

    /// Create a static axis-aligned rectangle (not yet in the world)
    fn create_static_rectangle(&mut self, rect: &Rect, label: BodyLabel) -> Self::Handle;

    /// Create a dynamic circle (not yet in the world)
    fn create_circle(&mut self, center: Vec2, radius: f32, label: BodyLabel) -> Self::Handle;

    fn add_to_world(&mut self, handle: Self::Handle);

    fn set_velocity(&mut self, handle: Self::Handle, velocity: Vec2);

    fn velocity(&self, handle: Self::Handle) -> Vec2;

    fn set_static(&mut self, handle: Self::Handle, is_static: bool);

    fn set_gravity(&mut self, gravity: Vec2);
}

//! Rigid-body physics service
//!
//! The game core only talks to physics through [`PhysicsService`].
//! [`PhysicsWorld`] backs it with rapier; tests swap in scripted fakes.

pub mod world;

use glam::{Quat, Vec3};

use crate::consts::*;

pub use world::PhysicsWorld;

/// Opaque handle to a body registered with a physics service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle(pub usize);

/// Friction and bounciness of every collider on a body.
///
/// Pairs combine with the smaller value of each coefficient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub friction: f32,
    pub restitution: f32,
}

impl Surface {
    /// Ball and turf
    pub const PITCH: Surface = Surface {
        friction: PITCH_FRICTION,
        restitution: PITCH_RESTITUTION,
    };
}

impl Default for Surface {
    fn default() -> Self {
        Self {
            friction: DEFAULT_FRICTION,
            restitution: DEFAULT_RESTITUTION,
        }
    }
}

/// Collision shape in body-local space
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Sphere { radius: f32 },
    Cuboid { half_extents: Vec3 },
    /// Ground plane through the shape origin, normal along local +Z
    Plane,
}

/// A shape attached to a body at a local offset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub shape: Shape,
    pub offset: Vec3,
}

/// Body motion type
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyKind {
    /// Never moves (mass 0)
    Static,
    Dynamic { mass: f32 },
}

/// Everything needed to register a body
#[derive(Debug, Clone, PartialEq)]
pub struct BodyDesc {
    pub kind: BodyKind,
    pub position: Vec3,
    pub orientation: Quat,
    pub colliders: Vec<Collider>,
    pub surface: Surface,
    /// Lock rotation (angular velocity stays zero)
    pub fixed_rotation: bool,
    /// Continuous collision detection for fast movers
    pub ccd: bool,
}

impl BodyDesc {
    pub fn fixed() -> Self {
        Self {
            kind: BodyKind::Static,
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            colliders: Vec::new(),
            surface: Surface::default(),
            fixed_rotation: false,
            ccd: false,
        }
    }

    pub fn dynamic(mass: f32) -> Self {
        Self {
            kind: BodyKind::Dynamic { mass },
            ..Self::fixed()
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn rotated(mut self, orientation: Quat) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_shape(self, shape: Shape) -> Self {
        self.with_shape_at(shape, Vec3::ZERO)
    }

    pub fn with_shape_at(mut self, shape: Shape, offset: Vec3) -> Self {
        self.colliders.push(Collider { shape, offset });
        self
    }

    pub fn with_surface(mut self, surface: Surface) -> Self {
        self.surface = surface;
        self
    }

    pub fn with_fixed_rotation(mut self) -> Self {
        self.fixed_rotation = true;
        self
    }

    pub fn with_ccd(mut self) -> Self {
        self.ccd = true;
        self
    }
}

/// Physical pose of a body (owned by the physics service)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyPose {
    pub position: Vec3,
    pub orientation: Quat,
    pub velocity: Vec3,
    pub angular_velocity: Vec3,
}

impl Default for BodyPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
        }
    }
}

impl BodyPose {
    /// Stationary pose at a point
    pub fn at_rest(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}

/// The rigid-body world as seen by the game core
pub trait PhysicsService {
    /// Register a body and return its handle
    fn add_body(&mut self, desc: BodyDesc) -> BodyHandle;

    /// Advance by whole `fixed_dt` steps covering `real_dt`, running at most
    /// `max_substeps`. Returns the number of steps taken.
    fn step(&mut self, fixed_dt: f32, real_dt: f32, max_substeps: u32) -> u32;

    /// Apply an instantaneous impulse at a world-space point
    fn apply_impulse(&mut self, body: BodyHandle, impulse: Vec3, world_point: Vec3);

    /// Current pose of a body
    fn pose(&self, body: BodyHandle) -> BodyPose;

    /// Teleport a body, overwriting position, orientation and velocities
    fn set_pose(&mut self, body: BodyHandle, pose: BodyPose);

    /// Overwrite the linear velocity
    fn set_velocity(&mut self, body: BodyHandle, velocity: Vec3);

    fn wake(&mut self, body: BodyHandle);

    fn sleep(&mut self, body: BodyHandle);

    fn is_sleeping(&self, body: BodyHandle) -> bool;
}

//! Penalty Kick - A swipe-to-shoot penalty mini-game
//!
//! Core modules:
//! - `sim`: Kick/goal state machine, gesture mapping and the frame driver
//! - `physics`: Rigid-body service consumed by the core, backed by rapier
//! - `entities`: Ball, goal, goalkeeper and ground (physics body + render proxy)
//! - `scene`: One-way render proxy placement
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser glue and start-up errors
//! - `tuning`: Data-driven game balance
//! - `ui`, `audio`: Event-driven HUD and sound

pub mod audio;
pub mod entities;
pub mod physics;
pub mod platform;
pub mod renderer;
pub mod scene;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use settings::{QualityPreset, Settings};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    use glam::Vec3;

    /// Fixed physics timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 3;
    /// Largest real frame delta fed to the physics step (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// World gravity (m/s²)
    pub const GRAVITY: Vec3 = Vec3::new(0.0, -9.82, 0.0);

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 0.22;
    pub const BALL_MASS: f32 = 1.0;
    /// Penalty spot, ball resting on the ground
    pub const BALL_SPAWN: Vec3 = Vec3::new(0.0, BALL_RADIUS, 10.0);

    /// Goal mouth (goal line on z = 0, net extends toward -z)
    pub const GOAL_WIDTH: f32 = 8.0;
    pub const GOAL_HEIGHT: f32 = 3.0;
    pub const GOAL_DEPTH: f32 = 2.0;
    /// Half thickness of posts and crossbar
    pub const POST_HALF_THICKNESS: f32 = 0.1;
    /// Half thickness of net panels
    pub const NET_HALF_THICKNESS: f32 = 0.01;

    /// Goalkeeper body
    pub const KEEPER_MASS: f32 = 80.0;
    pub const KEEPER_TORSO_HALF_EXTENTS: Vec3 = Vec3::new(0.3, 0.7, 0.3);
    pub const KEEPER_HEAD_RADIUS: f32 = 0.35;
    pub const KEEPER_SPAWN: Vec3 = Vec3::new(0.0, 0.7, 0.0);
    /// Lateral turnaround point of the patrol
    pub const KEEPER_PATROL_LIMIT: f32 = 2.5;
    /// Lateral patrol speed (m/s)
    pub const KEEPER_PATROL_SPEED: f32 = 15.0;

    /// Swipe pixels to impulse units
    pub const KICK_GAIN_X: f32 = 0.05;
    pub const KICK_GAIN_Y: f32 = 0.05;
    /// Forward impulse along the shooting axis (-z)
    pub const KICK_FORWARD: f32 = -15.0;
    /// Cap on total impulse magnitude
    pub const KICK_MAX_FORCE: f32 = 15.0;

    /// A shot that has not resolved after this long is a miss
    pub const SHOT_TIMEOUT_MS: f64 = 5000.0;
    /// Pause between a verdict and the ball returning to the spot
    pub const RESET_DELAY_MS: f64 = 2000.0;

    /// Ball and turf surface (only the ball/turf pair sees these)
    pub const PITCH_FRICTION: f32 = 0.4;
    pub const PITCH_RESTITUTION: f32 = 0.7;
    /// Every other surface
    pub const DEFAULT_FRICTION: f32 = 0.3;
    pub const DEFAULT_RESTITUTION: f32 = 0.0;

    /// Camera placement behind the penalty spot
    pub const CAMERA_POS: Vec3 = Vec3::new(0.0, 2.0, 14.0);
    pub const CAMERA_TARGET: Vec3 = Vec3::new(0.0, 1.0, 0.0);
}

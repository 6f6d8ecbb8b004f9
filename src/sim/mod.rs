//! Game core
//!
//! Everything gameplay-related lives here and only talks to the outside world
//! through the physics and render service traits:
//! - Clock injected as `now_ms`, never read from the platform
//! - Fixed physics timestep with a bounded catch-up
//! - No DOM, audio or GPU dependencies

pub mod driver;
pub mod gesture;
pub mod state;
pub mod tick;

pub use driver::FrameDriver;
pub use gesture::{clamp_magnitude, map_gesture, raw_impulse};
pub use state::{
    GameEvent, GamePhase, GameState, Message, MissReason, ShotOutcome, ShotSession,
};
pub use tick::{kick, tick};

//! Game entities
//!
//! Each entity pairs physics bodies with one render proxy and knows how to copy
//! its physical pose onto the proxy.

pub mod ball;
pub mod goal;
pub mod goalkeeper;
pub mod ground;

pub use ball::Ball;
pub use goal::Goal;
pub use goalkeeper::Goalkeeper;
pub use ground::Ground;

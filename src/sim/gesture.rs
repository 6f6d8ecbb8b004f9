//! Swipe gesture to kick impulse
//!
//! The swipe only steers: horizontal pixels become lateral impulse, vertical
//! pixels (either direction) become lift, and the forward push is constant.
//! The total is capped at `max_force` without changing direction.

use glam::{Vec2, Vec3};

use crate::tuning::KickTuning;

/// Impulse before the magnitude cap
pub fn raw_impulse(start: Vec2, end: Vec2, tuning: &KickTuning) -> Vec3 {
    let swipe = end - start;
    Vec3::new(
        swipe.x * tuning.gain_x,
        swipe.y.abs() * tuning.gain_y,
        tuning.forward,
    )
}

/// Map a pointer-down/pointer-up pair (screen pixels) to a kick impulse
pub fn map_gesture(start: Vec2, end: Vec2, tuning: &KickTuning) -> Vec3 {
    let raw = raw_impulse(start, end, tuning);
    let impulse = clamp_magnitude(raw, tuning.max_force);
    log::debug!(
        "Swipe {:?} -> impulse {:?} (|raw| = {:.2})",
        end - start,
        impulse,
        raw.length()
    );
    impulse
}

/// Rescale `v` onto the `max` sphere if it is longer than `max`
#[inline]
pub fn clamp_magnitude(v: Vec3, max: f32) -> Vec3 {
    if v.length() > max {
        v.normalize() * max
    } else {
        v
    }
}

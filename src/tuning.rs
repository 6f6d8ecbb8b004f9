//! Data-driven game balance
//!
//! Every number the core logic consults lives here so a build can ship a
//! different feel (longer timeout, weaker kicks) as a JSON blob.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors raised while loading tuning data
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("tuning JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("tuning field `{field}` is invalid: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Gesture-to-impulse mapping
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KickTuning {
    /// Horizontal swipe pixels to lateral impulse
    pub gain_x: f32,
    /// Vertical swipe pixels to lift impulse
    pub gain_y: f32,
    /// Fixed forward impulse (negative = toward the goal)
    pub forward: f32,
    /// Cap on the impulse magnitude
    pub max_force: f32,
}

impl Default for KickTuning {
    fn default() -> Self {
        Self {
            gain_x: KICK_GAIN_X,
            gain_y: KICK_GAIN_Y,
            forward: KICK_FORWARD,
            max_force: KICK_MAX_FORCE,
        }
    }
}

/// Shot deadlines
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShotTuning {
    pub timeout_ms: f64,
    pub reset_delay_ms: f64,
}

impl Default for ShotTuning {
    fn default() -> Self {
        Self {
            timeout_ms: SHOT_TIMEOUT_MS,
            reset_delay_ms: RESET_DELAY_MS,
        }
    }
}

/// Geometry of the goal mouth, fixed once the goal is built
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalBounds {
    pub width: f32,
    pub height: f32,
    /// Goal line to back of the net
    pub depth: f32,
}

impl Default for GoalBounds {
    fn default() -> Self {
        Self {
            width: GOAL_WIDTH,
            height: GOAL_HEIGHT,
            depth: GOAL_DEPTH,
        }
    }
}

/// Goalkeeper patrol
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeeperTuning {
    pub patrol_limit: f32,
    pub patrol_speed: f32,
}

impl Default for KeeperTuning {
    fn default() -> Self {
        Self {
            patrol_limit: KEEPER_PATROL_LIMIT,
            patrol_speed: KEEPER_PATROL_SPEED,
        }
    }
}

/// All tunables
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub kick: KickTuning,
    pub shot: ShotTuning,
    pub goal: GoalBounds,
    pub keeper: KeeperTuning,
}

impl Tuning {
    /// Parse tuning JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Tuning from an optional JSON document; absent or blank means defaults
    pub fn load(json: Option<&str>) -> Result<Self, TuningError> {
        match json.map(str::trim).filter(|j| !j.is_empty()) {
            Some(json) => Self::from_json(json),
            None => {
                let tuning = Self::default();
                tuning.validate()?;
                Ok(tuning)
            }
        }
    }

    /// Reject values the state machine cannot work with
    pub fn validate(&self) -> Result<(), TuningError> {
        let finite = [
            ("kick.gain_x", self.kick.gain_x),
            ("kick.gain_y", self.kick.gain_y),
            ("kick.forward", self.kick.forward),
            ("kick.max_force", self.kick.max_force),
            ("goal.width", self.goal.width),
            ("goal.height", self.goal.height),
            ("goal.depth", self.goal.depth),
            ("keeper.patrol_limit", self.keeper.patrol_limit),
            ("keeper.patrol_speed", self.keeper.patrol_speed),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be finite",
                });
            }
        }

        let positive = [
            ("kick.max_force", self.kick.max_force),
            ("goal.width", self.goal.width),
            ("goal.height", self.goal.height),
            ("goal.depth", self.goal.depth),
            ("keeper.patrol_limit", self.keeper.patrol_limit),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be positive",
                });
            }
        }

        let durations = [
            ("shot.timeout_ms", self.shot.timeout_ms),
            ("shot.reset_delay_ms", self.shot.reset_delay_ms),
        ];
        for (field, value) in durations {
            if !value.is_finite() || value <= 0.0 {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be a positive duration",
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_game_constants() {
        let tuning = Tuning::default();
        assert_eq!(tuning.kick.max_force, 15.0);
        assert_eq!(tuning.kick.forward, -15.0);
        assert_eq!(tuning.shot.timeout_ms, 5000.0);
        assert_eq!(tuning.shot.reset_delay_ms, 2000.0);
        assert_eq!(tuning.goal.width, 8.0);
        assert_eq!(tuning.goal.height, 3.0);
        assert_eq!(tuning.goal.depth, 2.0);
        assert!(tuning.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "shot": { "timeout_ms": 8000 } }"#).unwrap();
        assert_eq!(tuning.shot.timeout_ms, 8000.0);
        assert_eq!(tuning.shot.reset_delay_ms, RESET_DELAY_MS);
        assert_eq!(tuning.kick, KickTuning::default());
    }

    #[test]
    fn test_malformed_json() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_rejects_non_positive_goal() {
        let err = Tuning::from_json(r#"{ "goal": { "depth": 0 } }"#).unwrap_err();
        match err {
            TuningError::Invalid { field, .. } => assert_eq!(field, "goal.depth"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_without_document_gives_defaults() {
        assert_eq!(Tuning::load(None).unwrap(), Tuning::default());
        assert_eq!(Tuning::load(Some("  \n ")).unwrap(), Tuning::default());
    }

    #[test]
    fn test_load_parses_and_validates_document() {
        let tuning = Tuning::load(Some(r#"{ "keeper": { "patrol_speed": 4 } }"#)).unwrap();
        assert_eq!(tuning.keeper.patrol_speed, 4.0);
        assert_eq!(tuning.goal, GoalBounds::default());

        let err = Tuning::load(Some(r#"{ "kick": { "max_force": -1 } }"#)).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "kick.max_force", .. }));
    }

    #[test]
    fn test_rejects_zero_reset_delay() {
        let mut tuning = Tuning::default();
        tuning.shot.reset_delay_ms = 0.0;
        assert!(tuning.validate().is_err());
    }
}

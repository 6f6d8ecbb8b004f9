//! Game state and core shot types
//!
//! One [`GameState`] per game session, passed explicitly into `kick`/`tick`.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::tuning::{GoalBounds, ShotTuning, Tuning};

/// Current phase of the kick cycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball on the spot, waiting for a swipe
    Ready,
    /// Ball kicked, verdict pending
    InFlight,
    /// Verdict reached this tick (transient)
    Resolving,
    /// Showing the verdict before the ball returns to the spot
    ResettingDelay { resolved_at_ms: f64 },
}

impl GamePhase {
    pub fn name(&self) -> &'static str {
        match self {
            GamePhase::Ready => "Ready",
            GamePhase::InFlight => "InFlight",
            GamePhase::Resolving => "Resolving",
            GamePhase::ResettingDelay { .. } => "ResettingDelay",
        }
    }
}

/// The shot currently being tracked
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotSession {
    pub start_time_ms: f64,
    pub resolved: bool,
}

/// Why a shot missed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissReason {
    /// Ball passed behind the goal outside the mouth
    Overrun,
    /// Shot ran out of time
    Timeout,
}

/// Final verdict of a shot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotOutcome {
    Goal,
    Miss(MissReason),
}

impl ShotOutcome {
    pub fn message(&self) -> Message {
        match self {
            ShotOutcome::Goal => Message::Goal,
            ShotOutcome::Miss(_) => Message::Miss,
        }
    }
}

/// Player-facing banner text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    Goal,
    Miss,
    /// Ball is back on the spot
    Prompt,
}

impl Message {
    pub fn text(&self) -> &'static str {
        match self {
            Message::Goal => "GOAL!",
            Message::Miss => "MISS!",
            Message::Prompt => "Swipe to Kick",
        }
    }
}

/// Something the outside world (UI, audio, logs) may react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    KickAccepted { impulse: Vec3 },
    ShotResolved(ShotOutcome),
    ScoreChanged(u32),
    ShowMessage(Message),
    HideMessage,
}

/// Complete kick/goal state for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Current phase
    pub phase: GamePhase,
    /// Live shot, if any
    pub shot: Option<ShotSession>,
    /// Goals scored
    pub score: u32,
    /// Goal mouth used for classification
    pub goal: GoalBounds,
    /// Shot deadlines
    pub timing: ShotTuning,
    /// Events not yet handed to the caller
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(goal: GoalBounds, timing: ShotTuning) -> Self {
        Self {
            phase: GamePhase::Ready,
            shot: None,
            score: 0,
            goal,
            timing,
            events: Vec::new(),
        }
    }

    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self::new(tuning.goal, tuning.shot)
    }

    pub fn is_ready(&self) -> bool {
        self.phase == GamePhase::Ready
    }

    /// Move to a new phase, recording the transition
    pub(crate) fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        self.phase = to;
        log::debug!("Phase {} -> {}", from.name(), to.name());
        self.emit(GameEvent::PhaseChanged { from, to });
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Hand pending events to the caller
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Classify a ball position. Goal is tested before overrun: a ball in the
    /// net is also behind the goal line.
    pub fn classify(&self, ball: Vec3, elapsed_ms: f64) -> Option<ShotOutcome> {
        let goal = &self.goal;
        if ball.z < -goal.depth / 2.0 && ball.y < goal.height && ball.x.abs() < goal.width / 2.0 {
            Some(ShotOutcome::Goal)
        } else if ball.z < -goal.depth {
            Some(ShotOutcome::Miss(MissReason::Overrun))
        } else if elapsed_ms > self.timing.timeout_ms {
            Some(ShotOutcome::Miss(MissReason::Timeout))
        } else {
            None
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GoalBounds::default(), ShotTuning::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        GameState::new(
            GoalBounds {
                width: 8.0,
                height: 3.0,
                depth: 2.0,
            },
            ShotTuning::default(),
        )
    }

    #[test]
    fn test_goal_inside_mouth() {
        assert_eq!(
            state().classify(Vec3::new(0.0, 1.0, -1.5), 100.0),
            Some(ShotOutcome::Goal)
        );
    }

    #[test]
    fn test_wide_but_not_past_net_stays_in_play() {
        assert_eq!(state().classify(Vec3::new(5.0, 1.0, -1.5), 100.0), None);
    }

    #[test]
    fn test_wide_and_behind_goal_is_overrun() {
        assert_eq!(
            state().classify(Vec3::new(5.0, 1.0, -2.5), 100.0),
            Some(ShotOutcome::Miss(MissReason::Overrun))
        );
    }

    #[test]
    fn test_goal_wins_over_overrun() {
        // Inside the mouth and past the back net at once
        assert_eq!(
            state().classify(Vec3::new(0.0, 0.0, -3.0), 100.0),
            Some(ShotOutcome::Goal)
        );
    }

    #[test]
    fn test_over_the_bar_is_not_a_goal() {
        assert_eq!(state().classify(Vec3::new(0.0, 3.5, -1.5), 100.0), None);
        assert_eq!(
            state().classify(Vec3::new(0.0, 3.5, -2.5), 100.0),
            Some(ShotOutcome::Miss(MissReason::Overrun))
        );
    }

    #[test]
    fn test_timeout_is_strictly_after_deadline() {
        let s = state();
        let ball = Vec3::new(0.0, 0.2, 4.0);
        assert_eq!(s.classify(ball, 5000.0), None);
        assert_eq!(
            s.classify(ball, 5000.1),
            Some(ShotOutcome::Miss(MissReason::Timeout))
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(ShotOutcome::Goal.message().text(), "GOAL!");
        assert_eq!(ShotOutcome::Miss(MissReason::Timeout).message().text(), "MISS!");
        assert_eq!(Message::Prompt.text(), "Swipe to Kick");
    }
}

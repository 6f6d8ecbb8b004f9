//! Kick/goal state machine
//!
//! `Ready --kick--> InFlight --verdict--> Resolving --> ResettingDelay --delay--> Ready`
//!
//! Time comes in as `now_ms` so the whole cycle can be driven by a fake clock.

use glam::Vec3;

use super::state::{GameEvent, GamePhase, GameState, Message, ShotOutcome, ShotSession};
use crate::entities::Ball;
use crate::physics::PhysicsService;

/// Launch the ball. Returns false (and does nothing) unless the game is Ready.
pub fn kick(
    state: &mut GameState,
    physics: &mut impl PhysicsService,
    ball: &Ball,
    impulse: Vec3,
    now_ms: f64,
) -> bool {
    if !state.is_ready() {
        log::debug!("Ignoring kick while {}", state.phase.name());
        return false;
    }

    state.emit(GameEvent::HideMessage);

    physics.wake(ball.body);
    let at = ball.position(&*physics);
    physics.apply_impulse(ball.body, impulse, at);

    state.shot = Some(ShotSession {
        start_time_ms: now_ms,
        resolved: false,
    });
    state.emit(GameEvent::KickAccepted { impulse });
    state.set_phase(GamePhase::InFlight);

    log::info!("Kick! impulse = {:?}", impulse);
    true
}

/// Advance the state machine by one frame
pub fn tick(state: &mut GameState, physics: &mut impl PhysicsService, ball: &Ball, now_ms: f64) {
    match state.phase {
        GamePhase::Ready => {}
        GamePhase::InFlight => {
            let Some(shot) = state.shot else {
                log::warn!("In flight without a shot session; returning to Ready");
                state.set_phase(GamePhase::Ready);
                return;
            };
            let position = ball.position(&*physics);
            let elapsed = now_ms - shot.start_time_ms;
            if let Some(outcome) = state.classify(position, elapsed) {
                resolve(state, outcome, now_ms);
            }
        }
        // Resolving always hands over to the delay within the same tick
        GamePhase::Resolving => schedule_reset(state, now_ms),
        GamePhase::ResettingDelay { resolved_at_ms } => {
            if now_ms - resolved_at_ms >= state.timing.reset_delay_ms {
                reset(state, physics, ball);
            }
        }
    }
}

fn resolve(state: &mut GameState, outcome: ShotOutcome, now_ms: f64) {
    if let Some(shot) = state.shot.as_mut() {
        shot.resolved = true;
    }

    if outcome == ShotOutcome::Goal {
        state.score += 1;
        state.emit(GameEvent::ScoreChanged(state.score));
    }
    log::info!("Shot resolved: {:?} (score {})", outcome, state.score);

    state.emit(GameEvent::ShotResolved(outcome));
    state.emit(GameEvent::ShowMessage(outcome.message()));
    state.set_phase(GamePhase::Resolving);
    schedule_reset(state, now_ms);
}

fn schedule_reset(state: &mut GameState, now_ms: f64) {
    state.set_phase(GamePhase::ResettingDelay {
        resolved_at_ms: now_ms,
    });
}

fn reset(state: &mut GameState, physics: &mut impl PhysicsService, ball: &Ball) {
    ball.reset(physics);
    state.shot = None;
    state.emit(GameEvent::ShowMessage(Message::Prompt));
    state.set_phase(GamePhase::Ready);
    log::info!("Ball back on the spot");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::physics::{BodyDesc, BodyHandle, BodyPose};
    use crate::scene::SceneGraph;
    use crate::sim::MissReason;
    use crate::tuning::{GoalBounds, ShotTuning};

    /// Physics stand-in: scripted ball position, records every call
    #[derive(Default)]
    struct FakePhysics {
        poses: Vec<BodyPose>,
        sleeping: Vec<bool>,
        impulses: Vec<(BodyHandle, Vec3, Vec3)>,
        wakes: usize,
    }

    impl FakePhysics {
        fn move_ball(&mut self, ball: &Ball, position: Vec3) {
            self.poses[ball.body.0].position = position;
            self.poses[ball.body.0].velocity = Vec3::new(0.0, 0.0, -10.0);
        }
    }

    impl PhysicsService for FakePhysics {
        fn add_body(&mut self, desc: BodyDesc) -> BodyHandle {
            self.poses.push(BodyPose::at_rest(desc.position));
            self.sleeping.push(false);
            BodyHandle(self.poses.len() - 1)
        }
        fn step(&mut self, _fixed_dt: f32, _real_dt: f32, _max_substeps: u32) -> u32 {
            1
        }
        fn apply_impulse(&mut self, body: BodyHandle, impulse: Vec3, world_point: Vec3) {
            self.impulses.push((body, impulse, world_point));
        }
        fn pose(&self, body: BodyHandle) -> BodyPose {
            self.poses[body.0]
        }
        fn set_pose(&mut self, body: BodyHandle, pose: BodyPose) {
            self.poses[body.0] = pose;
        }
        fn set_velocity(&mut self, body: BodyHandle, velocity: Vec3) {
            self.poses[body.0].velocity = velocity;
        }
        fn wake(&mut self, body: BodyHandle) {
            self.wakes += 1;
            self.sleeping[body.0] = false;
        }
        fn sleep(&mut self, body: BodyHandle) {
            self.sleeping[body.0] = true;
        }
        fn is_sleeping(&self, body: BodyHandle) -> bool {
            self.sleeping[body.0]
        }
    }

    fn setup() -> (GameState, FakePhysics, Ball) {
        let mut physics = FakePhysics::default();
        let mut scene = SceneGraph::new();
        let ball = Ball::spawn(&mut physics, &mut scene);
        let state = GameState::new(
            GoalBounds {
                width: 8.0,
                height: 3.0,
                depth: 2.0,
            },
            ShotTuning::default(),
        );
        (state, physics, ball)
    }

    fn phases(events: &[GameEvent]) -> Vec<&'static str> {
        let mut out = Vec::new();
        for event in events {
            if let GameEvent::PhaseChanged { from, to } = event {
                if out.is_empty() {
                    out.push(from.name());
                }
                out.push(to.name());
            }
        }
        out
    }

    #[test]
    fn test_kick_applies_impulse_at_ball_position() {
        let (mut state, mut physics, ball) = setup();
        let impulse = Vec3::new(1.0, 2.0, -14.0);

        assert!(kick(&mut state, &mut physics, &ball, impulse, 1000.0));
        assert_eq!(state.phase, GamePhase::InFlight);
        assert_eq!(physics.wakes, 1);
        assert_eq!(physics.impulses, vec![(ball.body, impulse, BALL_SPAWN)]);
        assert_eq!(
            state.shot,
            Some(ShotSession {
                start_time_ms: 1000.0,
                resolved: false
            })
        );
        assert!(state.drain_events().contains(&GameEvent::HideMessage));
    }

    #[test]
    fn test_second_kick_is_ignored() {
        let (mut state, mut physics, ball) = setup();
        assert!(kick(&mut state, &mut physics, &ball, Vec3::NEG_Z, 0.0));
        assert!(!kick(&mut state, &mut physics, &ball, Vec3::X, 1.0));

        assert_eq!(physics.impulses.len(), 1);
        assert_eq!(state.shot.unwrap().start_time_ms, 0.0);
    }

    #[test]
    fn test_kick_ignored_during_reset_delay() {
        let (mut state, mut physics, ball) = setup();
        kick(&mut state, &mut physics, &ball, Vec3::NEG_Z, 0.0);
        physics.move_ball(&ball, Vec3::new(0.0, 1.0, -1.5));
        tick(&mut state, &mut physics, &ball, 500.0);
        assert!(matches!(state.phase, GamePhase::ResettingDelay { .. }));

        assert!(!kick(&mut state, &mut physics, &ball, Vec3::NEG_Z, 600.0));
        assert_eq!(physics.impulses.len(), 1);
    }

    #[test]
    fn test_goal_round_trip() {
        let (mut state, mut physics, ball) = setup();
        kick(&mut state, &mut physics, &ball, Vec3::NEG_Z, 0.0);

        // Still in front of the goal
        physics.move_ball(&ball, Vec3::new(0.0, 1.0, 3.0));
        tick(&mut state, &mut physics, &ball, 200.0);
        assert_eq!(state.phase, GamePhase::InFlight);

        physics.move_ball(&ball, Vec3::new(0.0, 1.0, -1.5));
        tick(&mut state, &mut physics, &ball, 400.0);
        assert_eq!(
            state.phase,
            GamePhase::ResettingDelay {
                resolved_at_ms: 400.0
            }
        );
        assert_eq!(state.score, 1);
        assert!(state.shot.unwrap().resolved);

        // No re-evaluation while waiting, even if the ball is still in the net
        tick(&mut state, &mut physics, &ball, 1000.0);
        assert_eq!(state.score, 1);

        tick(&mut state, &mut physics, &ball, 2399.0);
        assert!(matches!(state.phase, GamePhase::ResettingDelay { .. }));

        tick(&mut state, &mut physics, &ball, 2400.0);
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.shot, None);

        let events = state.drain_events();
        assert_eq!(
            phases(&events),
            vec!["Ready", "InFlight", "Resolving", "ResettingDelay", "Ready"]
        );
        assert!(events.contains(&GameEvent::ScoreChanged(1)));
        assert!(events.contains(&GameEvent::ShowMessage(Message::Goal)));
        assert_eq!(events.last(), Some(&GameEvent::PhaseChanged {
            from: GamePhase::ResettingDelay {
                resolved_at_ms: 400.0
            },
            to: GamePhase::Ready
        }));
        assert!(events.contains(&GameEvent::ShowMessage(Message::Prompt)));
    }

    #[test]
    fn test_overrun_round_trip() {
        let (mut state, mut physics, ball) = setup();
        kick(&mut state, &mut physics, &ball, Vec3::NEG_Z, 0.0);

        // Wide of the post but not yet behind the net
        physics.move_ball(&ball, Vec3::new(5.0, 1.0, -1.5));
        tick(&mut state, &mut physics, &ball, 300.0);
        assert_eq!(state.phase, GamePhase::InFlight);

        physics.move_ball(&ball, Vec3::new(5.0, 1.0, -2.5));
        tick(&mut state, &mut physics, &ball, 350.0);
        tick(&mut state, &mut physics, &ball, 2350.0);

        let events = state.drain_events();
        assert_eq!(
            phases(&events),
            vec!["Ready", "InFlight", "Resolving", "ResettingDelay", "Ready"]
        );
        assert!(events.contains(&GameEvent::ShotResolved(ShotOutcome::Miss(
            MissReason::Overrun
        ))));
        assert!(events.contains(&GameEvent::ShowMessage(Message::Miss)));
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_timeout_fires_exactly_once() {
        let (mut state, mut physics, ball) = setup();
        kick(&mut state, &mut physics, &ball, Vec3::NEG_Z, 0.0);
        physics.move_ball(&ball, Vec3::new(0.5, BALL_RADIUS, 6.0));

        tick(&mut state, &mut physics, &ball, 5000.0);
        assert_eq!(state.phase, GamePhase::InFlight);

        tick(&mut state, &mut physics, &ball, 5001.0);
        tick(&mut state, &mut physics, &ball, 5500.0);
        tick(&mut state, &mut physics, &ball, 6000.0);

        let mut events = state.drain_events();
        let misses = events
            .iter()
            .filter(|e| **e == GameEvent::ShowMessage(Message::Miss))
            .count();
        assert_eq!(misses, 1);
        assert!(events.contains(&GameEvent::ShotResolved(ShotOutcome::Miss(
            MissReason::Timeout
        ))));

        tick(&mut state, &mut physics, &ball, 7001.0);
        assert_eq!(state.phase, GamePhase::Ready);
        events.extend(state.drain_events());
        assert_eq!(
            phases(&events),
            vec!["Ready", "InFlight", "Resolving", "ResettingDelay", "Ready"]
        );
        assert!(events.contains(&GameEvent::ShowMessage(Message::Prompt)));
    }

    #[test]
    fn test_reset_restores_spawn() {
        let (mut state, mut physics, ball) = setup();
        kick(&mut state, &mut physics, &ball, Vec3::NEG_Z, 0.0);
        physics.move_ball(&ball, Vec3::new(0.0, 1.0, -1.5));
        physics.poses[ball.body.0].angular_velocity = Vec3::new(3.0, 1.0, 0.0);
        tick(&mut state, &mut physics, &ball, 100.0);
        tick(&mut state, &mut physics, &ball, 2100.0);

        let pose = physics.pose(ball.body);
        assert_eq!(pose.position, BALL_SPAWN);
        assert_eq!(pose.velocity, Vec3::ZERO);
        assert_eq!(pose.angular_velocity, Vec3::ZERO);
        assert!(physics.is_sleeping(ball.body));
        assert_eq!(state.phase, GamePhase::Ready);

        // And the next kick is accepted again
        assert!(kick(&mut state, &mut physics, &ball, Vec3::NEG_Z, 2200.0));
    }

    #[test]
    fn test_tick_while_ready_does_nothing() {
        let (mut state, mut physics, ball) = setup();
        tick(&mut state, &mut physics, &ball, 99_999.0);
        assert_eq!(state.phase, GamePhase::Ready);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_score_counts_goals_only() {
        let (mut state, mut physics, ball) = setup();
        let mut now = 0.0;
        for target in [
            Vec3::new(0.0, 1.0, -1.5),
            Vec3::new(6.0, 1.0, -3.0),
            Vec3::new(-2.0, 2.0, -1.2),
        ] {
            kick(&mut state, &mut physics, &ball, Vec3::NEG_Z, now);
            physics.move_ball(&ball, target);
            now += 100.0;
            tick(&mut state, &mut physics, &ball, now);
            now += 2000.0;
            tick(&mut state, &mut physics, &ball, now);
            assert_eq!(state.phase, GamePhase::Ready);
        }
        assert_eq!(state.score, 2);
    }
}

//! Per-frame glue between the physics service, the entities and the state machine

use glam::{Vec2, Vec3};

use super::gesture::map_gesture;
use super::state::{GameEvent, GameState};
use super::tick::{kick, tick};
use crate::consts::*;
use crate::entities::{Ball, Goal, Goalkeeper, Ground};
use crate::physics::PhysicsService;
use crate::scene::RenderService;
use crate::tuning::Tuning;

/// Owns one game session: physics, entities and the kick/goal state
pub struct FrameDriver<P: PhysicsService> {
    physics: P,
    state: GameState,
    ball: Ball,
    goal: Goal,
    keeper: Goalkeeper,
    tuning: Tuning,
}

impl<P: PhysicsService> FrameDriver<P> {
    /// Build the pitch, goal, keeper and ball into `physics` and `scene`
    pub fn new(mut physics: P, scene: &mut impl RenderService, tuning: Tuning) -> Self {
        Ground::spawn(&mut physics, scene);
        let goal = Goal::build(tuning.goal, &mut physics, scene);
        let keeper = Goalkeeper::spawn(tuning.keeper, &mut physics, scene);
        let ball = Ball::spawn(&mut physics, scene);
        let state = GameState::from_tuning(&tuning);

        log::info!(
            "Pitch ready: goal {}x{}x{}, ball at {:?}",
            tuning.goal.width,
            tuning.goal.height,
            tuning.goal.depth,
            ball.spawn_point()
        );

        Self {
            physics,
            state,
            ball,
            goal,
            keeper,
            tuning,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn physics(&self) -> &P {
        &self.physics
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn goal(&self) -> &Goal {
        &self.goal
    }

    pub fn keeper(&self) -> &Goalkeeper {
        &self.keeper
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Kick with an explicit impulse. False if a shot is already live.
    pub fn kick(&mut self, impulse: Vec3, now_ms: f64) -> bool {
        kick(&mut self.state, &mut self.physics, &self.ball, impulse, now_ms)
    }

    /// Kick from a completed swipe (screen pixels)
    pub fn kick_gesture(&mut self, start: Vec2, end: Vec2, now_ms: f64) -> bool {
        let impulse = map_gesture(start, end, &self.tuning.kick);
        self.kick(impulse, now_ms)
    }

    /// Advance one display frame and return everything that happened since
    /// the previous call (including kicks accepted in between).
    pub fn frame(
        &mut self,
        dt: f32,
        now_ms: f64,
        scene: &mut impl RenderService,
    ) -> Vec<GameEvent> {
        // Long stalls (tab in background) must not fast-forward the shot
        let dt = if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };

        self.physics.step(SIM_DT, dt, MAX_SUBSTEPS);
        self.keeper.update(&mut self.physics);

        if !self.state.is_ready() {
            tick(&mut self.state, &mut self.physics, &self.ball, now_ms);
        }

        self.ball.sync(&self.physics, scene);
        self.keeper.sync(&self.physics, scene);

        self.state.drain_events()
    }
}

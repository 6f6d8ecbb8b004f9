//! Sound effects using the Web Audio API
//!
//! Procedurally generated, no sample files. The event-to-sound mapping is
//! platform-independent; playback only exists on wasm.

use crate::sim::{GameEvent, ShotOutcome};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Boot meets ball
    Kick,
    /// Ball in the net
    Goal,
    /// Wide, over or timed out
    Miss,
    /// Ball back on the spot
    Ready,
}

impl SoundEffect {
    /// Which sound (if any) a game event triggers
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::KickAccepted { .. } => Some(SoundEffect::Kick),
            GameEvent::ShotResolved(ShotOutcome::Goal) => Some(SoundEffect::Goal),
            GameEvent::ShotResolved(ShotOutcome::Miss(_)) => Some(SoundEffect::Miss),
            GameEvent::PhaseChanged { to, .. } if *to == crate::sim::GamePhase::Ready => {
                Some(SoundEffect::Ready)
            }
            _ => None,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::SoundEffect;
    use crate::settings::Settings;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: settings.effective_volume(),
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Pick up new volume/mute settings
        pub fn apply_settings(&mut self, settings: &Settings) {
            self.volume = settings.effective_volume();
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.volume;
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Browsers start suspended until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Kick => self.play_kick(ctx, vol),
                SoundEffect::Goal => self.play_goal(ctx, vol),
                SoundEffect::Miss => self.play_miss(ctx, vol),
                SoundEffect::Ready => self.play_ready(ctx, vol),
            }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Kick - low thud with a short click on top
        fn play_kick(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();

            if let Some((osc, gain)) = self.create_osc(ctx, 140.0, OscillatorType::Sine) {
                gain.gain().set_value_at_time(vol * 0.7, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                    .ok();
                osc.frequency().set_value_at_time(140.0, t).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(50.0, t + 0.12)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.15).ok();
            }

            if let Some((osc, gain)) = self.create_osc(ctx, 1800.0, OscillatorType::Square) {
                gain.gain().set_value_at_time(vol * 0.08, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.03)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.04).ok();
            }
        }

        /// Goal - rising fanfare
        fn play_goal(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [523.0, 659.0, 784.0, 1047.0].iter().enumerate() {
                let delay = i as f64 * 0.1;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle)
                {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.3, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.45)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.5).ok();
                }
            }
        }

        /// Miss - sad descending pair
        fn play_miss(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [330.0, 247.0].iter().enumerate() {
                let delay = i as f64 * 0.2;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.3, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.35).ok();
                }
            }
        }

        /// Ready - soft ding
        fn play_ready(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 880.0, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.15, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.25).ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GamePhase, Message, MissReason};
    use glam::Vec3;

    #[test]
    fn test_event_sounds() {
        assert_eq!(
            SoundEffect::for_event(&GameEvent::KickAccepted {
                impulse: Vec3::NEG_Z
            }),
            Some(SoundEffect::Kick)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::ShotResolved(ShotOutcome::Goal)),
            Some(SoundEffect::Goal)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::ShotResolved(ShotOutcome::Miss(
                MissReason::Timeout
            ))),
            Some(SoundEffect::Miss)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::PhaseChanged {
                from: GamePhase::ResettingDelay {
                    resolved_at_ms: 0.0
                },
                to: GamePhase::Ready,
            }),
            Some(SoundEffect::Ready)
        );
    }

    #[test]
    fn test_quiet_events() {
        assert_eq!(
            SoundEffect::for_event(&GameEvent::PhaseChanged {
                from: GamePhase::Ready,
                to: GamePhase::InFlight,
            }),
            None
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::ShowMessage(Message::Goal)),
            None
        );
        assert_eq!(SoundEffect::for_event(&GameEvent::ScoreChanged(1)), None);
    }
}

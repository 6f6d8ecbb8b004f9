//! HUD: score readout and message banner
//!
//! The core never touches the DOM. Events coming out of the frame driver are
//! handed to [`present`], which drives whatever [`UiService`] the platform
//! provides.

use crate::sim::GameEvent;

/// Where the score and banner end up
pub trait UiService {
    fn update_score(&mut self, score: u32);
    fn show_message(&mut self, text: &str);
    fn hide_message(&mut self);
}

/// Reflect one game event on the HUD. Events with no visible effect are ignored.
pub fn present(ui: &mut impl UiService, event: &GameEvent) {
    match event {
        GameEvent::ScoreChanged(score) => ui.update_score(*score),
        GameEvent::ShowMessage(message) => ui.show_message(message.text()),
        GameEvent::HideMessage => ui.hide_message(),
        GameEvent::PhaseChanged { .. }
        | GameEvent::KickAccepted { .. }
        | GameEvent::ShotResolved(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GamePhase, Message, ShotOutcome};
    use glam::Vec3;

    #[derive(Debug, Default)]
    struct RecordingUi {
        calls: Vec<String>,
    }

    impl UiService for RecordingUi {
        fn update_score(&mut self, score: u32) {
            self.calls.push(format!("score {score}"));
        }
        fn show_message(&mut self, text: &str) {
            self.calls.push(format!("show {text}"));
        }
        fn hide_message(&mut self) {
            self.calls.push("hide".to_string());
        }
    }

    #[test]
    fn test_goal_sequence() {
        let mut ui = RecordingUi::default();
        let events = [
            GameEvent::HideMessage,
            GameEvent::KickAccepted {
                impulse: Vec3::new(0.0, 0.0, -15.0),
            },
            GameEvent::PhaseChanged {
                from: GamePhase::Ready,
                to: GamePhase::InFlight,
            },
            GameEvent::ScoreChanged(3),
            GameEvent::ShotResolved(ShotOutcome::Goal),
            GameEvent::ShowMessage(Message::Goal),
            GameEvent::ShowMessage(Message::Prompt),
        ];
        for event in &events {
            present(&mut ui, event);
        }
        assert_eq!(
            ui.calls,
            vec!["hide", "score 3", "show GOAL!", "show Swipe to Kick"]
        );
    }

    #[test]
    fn test_silent_events() {
        let mut ui = RecordingUi::default();
        present(
            &mut ui,
            &GameEvent::PhaseChanged {
                from: GamePhase::InFlight,
                to: GamePhase::Resolving,
            },
        );
        present(&mut ui, &GameEvent::ShotResolved(ShotOutcome::Goal));
        assert!(ui.calls.is_empty());
    }
}

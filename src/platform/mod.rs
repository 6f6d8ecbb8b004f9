//! Platform layer
//!
//! Start-up errors shared by every target, plus the browser HUD on wasm.

use thiserror::Error;

use crate::tuning::TuningError;

/// Fatal start-up failure. Nothing is retried; the error is logged and the
/// game does not start.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("no browser window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("missing page element #{0}")]
    MissingElement(&'static str),
    #[error("element #{0} is not a canvas")]
    NotACanvas(&'static str),
    #[error("no suitable GPU adapter: {0}")]
    Adapter(String),
    #[error("failed to create GPU device: {0}")]
    Device(String),
    #[error("failed to create render surface: {0}")]
    Surface(String),
    #[error("render surface reports no usable format")]
    NoSurfaceFormat,
    #[error("browser call failed: {0}")]
    Js(String),
    #[error(transparent)]
    Tuning(#[from] TuningError),
}

#[cfg(target_arch = "wasm32")]
pub mod dom {
    //! HUD backed by two DOM elements: `#score` and `#message`

    use web_sys::{Document, Element};

    use super::InitError;
    use crate::ui::UiService;

    pub const SCORE_ID: &str = "score";
    pub const MESSAGE_ID: &str = "message";

    pub struct DomUi {
        score: Element,
        message: Element,
    }

    impl DomUi {
        pub fn new(document: &Document) -> Result<Self, InitError> {
            let score = document
                .get_element_by_id(SCORE_ID)
                .ok_or(InitError::MissingElement(SCORE_ID))?;
            let message = document
                .get_element_by_id(MESSAGE_ID)
                .ok_or(InitError::MissingElement(MESSAGE_ID))?;
            Ok(Self { score, message })
        }
    }

    impl UiService for DomUi {
        fn update_score(&mut self, score: u32) {
            self.score
                .set_text_content(Some(&format!("Score: {score}")));
        }

        fn show_message(&mut self, text: &str) {
            self.message.set_text_content(Some(text));
            let _ = self.message.class_list().remove_1("hidden");
        }

        fn hide_message(&mut self) {
            let _ = self.message.class_list().add_1("hidden");
        }
    }
}

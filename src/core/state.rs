//! # Application State
//!
//! Core state for framedeck. Domain data only; presentation state (scroll,
//! selection, per-item view flags) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── frames: Vec<QueryFrame>          // newest last
//! ├── status_message: String           // status bar text
//! └── selected_query: Option<String>   // last query picked from a frame
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::frame::QueryFrame;

pub struct App {
    pub frames: Vec<QueryFrame>,
    pub status_message: String,
    pub selected_query: Option<String>,
}

impl App {
    pub fn new(frames: Vec<QueryFrame>) -> Self {
        let status_message = if frames.is_empty() {
            String::from("No frames loaded")
        } else {
            format!("{} frame(s) loaded", frames.len())
        };
        Self {
            frames,
            status_message,
            selected_query: None,
        }
    }

    pub fn frame(&self, id: &str) -> Option<&QueryFrame> {
        self.frames.iter().find(|f| f.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_frames;

    #[test]
    fn test_app_new_defaults() {
        let app = App::new(sample_frames());
        assert_eq!(app.frames.len(), 3);
        assert_eq!(app.status_message, "3 frame(s) loaded");
        assert!(app.selected_query.is_none());
    }

    #[test]
    fn test_app_new_empty() {
        let app = App::new(Vec::new());
        assert_eq!(app.status_message, "No frames loaded");
    }

    #[test]
    fn test_frame_lookup() {
        let app = App::new(sample_frames());
        assert_eq!(app.frame("f2").map(|f| f.id.as_str()), Some("f2"));
        assert!(app.frame("missing").is_none());
    }
}

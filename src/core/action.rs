//! # Actions
//!
//! Everything that happens to the frame collection becomes an `Action`.
//! A frame's discard control? That's `Action::DiscardFrame(id)`.
//!
//! The `update()` function applies an action to the state and returns an
//! `Effect` describing what the caller should do next. No I/O here.
//!
//! ```text
//! State + Action  →  update()  →  Effect
//! ```

use log::{debug, info, warn};

use crate::core::state::App;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    DiscardFrame(String),
    SelectQuery(String),
    EditQuery { id: String, query: String },
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::DiscardFrame(id) => {
            let before = app.frames.len();
            app.frames.retain(|f| f.id != id);
            if app.frames.len() < before {
                info!("Discarded frame {}", id);
                app.status_message = format!("Discarded frame ({} left)", app.frames.len());
            } else {
                warn!("Discard requested for unknown frame {}", id);
            }
            Effect::None
        }
        Action::SelectQuery(id) => {
            match app.frame(&id).map(|f| (f.query.clone(), f.action.label())) {
                Some((query, label)) => {
                    app.selected_query = Some(query);
                    app.status_message = format!("Selected {label} query");
                }
                None => warn!("Select requested for unknown frame {}", id),
            }
            Effect::None
        }
        Action::EditQuery { id, query } => {
            match app.frames.iter_mut().find(|f| f.id == id) {
                Some(frame) => {
                    frame.query = query.clone();
                    app.selected_query = Some(query);
                    app.status_message = String::from("Query updated");
                }
                None => warn!("Edit requested for unknown frame {}", id),
            }
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_frames;

    #[test]
    fn discard_removes_frame() {
        let mut app = App::new(sample_frames());
        let effect = update(&mut app, Action::DiscardFrame("f2".to_string()));
        assert_eq!(effect, Effect::None);
        assert_eq!(app.frames.len(), 2);
        assert!(app.frame("f2").is_none());
        assert_eq!(app.status_message, "Discarded frame (2 left)");
    }

    #[test]
    fn discard_unknown_frame_changes_nothing() {
        let mut app = App::new(sample_frames());
        update(&mut app, Action::DiscardFrame("nope".to_string()));
        assert_eq!(app.frames.len(), 3);
    }

    #[test]
    fn select_query_copies_frame_query() {
        let mut app = App::new(sample_frames());
        update(&mut app, Action::SelectQuery("f1".to_string()));
        assert_eq!(app.selected_query.as_deref(), Some(app.frames[0].query.as_str()));
        assert_eq!(app.status_message, "Selected query query");
    }

    #[test]
    fn select_query_reports_frame_action() {
        let mut app = App::new(sample_frames());
        let effect = update(&mut app, Action::SelectQuery("f3".to_string()));
        assert_eq!(effect, Effect::None);
        assert_eq!(app.selected_query.as_deref(), Some(app.frames[2].query.as_str()));
        assert_eq!(app.status_message, "Selected mutate query");
    }

    #[test]
    fn select_unknown_frame_keeps_selection() {
        let mut app = App::new(sample_frames());
        update(&mut app, Action::SelectQuery("nope".to_string()));
        assert!(app.selected_query.is_none());
        assert_eq!(app.status_message, "3 frame(s) loaded");
    }

    #[test]
    fn edit_query_replaces_and_selects() {
        let mut app = App::new(sample_frames());
        update(
            &mut app,
            Action::EditQuery {
                id: "f3".to_string(),
                query: "{ edited }".to_string(),
            },
        );
        assert_eq!(app.frame("f3").map(|f| f.query.as_str()), Some("{ edited }"));
        assert_eq!(app.selected_query.as_deref(), Some("{ edited }"));
    }

    #[test]
    fn quit_returns_quit_effect() {
        let mut app = App::new(Vec::new());
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}

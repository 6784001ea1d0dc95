//! # TitleBar Component
//!
//! Top status bar: frame count, status message and the last selected query.
//!
//! Purely presentational. All data comes in as props:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(app.frames.len(), app.status_message.clone(), None);
//! title_bar.render(frame, area);
//! ```
//!
//! The text degrades in priority order so the count is always visible:
//!
//! 1. `"framedeck (3 frames) | Query updated | query: { me … }"`
//! 2. `"framedeck (3 frames) | Query updated"`
//! 3. `"framedeck (3 frames)"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

pub struct TitleBar {
    pub frame_count: usize,
    pub status_message: String,
    pub selected_query: Option<String>,
}

impl TitleBar {
    pub fn new(frame_count: usize, status_message: String, selected_query: Option<String>) -> Self {
        Self {
            frame_count,
            status_message,
            selected_query,
        }
    }

    /// Longest variant of the title that fits in `width` columns.
    fn title_text(&self, width: u16) -> String {
        let noun = if self.frame_count == 1 { "frame" } else { "frames" };
        let count = format!("framedeck ({} {})", self.frame_count, noun);

        let mut with_status = count.clone();
        if !self.status_message.is_empty() {
            with_status.push_str(" | ");
            with_status.push_str(&self.status_message);
        }

        let mut full = with_status.clone();
        if let Some(query) = &self.selected_query {
            full.push_str(" | query: ");
            full.push_str(&query.split_whitespace().collect::<Vec<_>>().join(" "));
        }

        [full, with_status]
            .into_iter()
            .find(|text| text.width() <= width as usize)
            .unwrap_or(count)
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(Span::styled(
            self.title_text(area.width),
            Style::default().fg(Color::White),
        ));
        frame.render_widget(line, area);
    }
}

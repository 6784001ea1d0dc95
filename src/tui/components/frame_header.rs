//! # FrameHeader Component
//!
//! One-line header of a frame list item:
//!
//! ```text
//! ▾ query  { me(func: uid(0x1)) { name } }…            Nov 14 22:13 ✎ ⛶
//! ```
//!
//! Stateless: the frame item passes everything in as props. While the query
//! is being edited, the query text is replaced by the item's editor.
//!
//! The header owns the key bindings of its controls. `map_event` turns a key
//! into a [`HeaderEvent`] that carries no arguments; what the event means is
//! up to the item.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::frame::QueryFrame;
use crate::tui::components::query_editor::QueryEditor;
use crate::tui::event::TuiEvent;

pub const FULLSCREEN_MARK: &str = "⛶";
pub const EDITING_MARK: &str = "✎";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderEvent {
    ToggleFullscreen,
    ToggleEditingQuery,
    Discard,
    SelectQuery,
}

pub struct FrameHeader<'a> {
    pub frame: &'a QueryFrame,
    pub is_fullscreen: bool,
    pub collapsed: bool,
    pub editing_query: bool,
    pub editor: &'a QueryEditor,
}

impl<'a> FrameHeader<'a> {
    /// Key bindings for the header's controls.
    pub fn map_event(event: &TuiEvent) -> Option<HeaderEvent> {
        match event {
            TuiEvent::InputChar('f') => Some(HeaderEvent::ToggleFullscreen),
            TuiEvent::InputChar('e') => Some(HeaderEvent::ToggleEditingQuery),
            TuiEvent::InputChar('d') => Some(HeaderEvent::Discard),
            TuiEvent::Submit => Some(HeaderEvent::SelectQuery),
            _ => None,
        }
    }

    fn right_text(&self) -> String {
        let mut parts = Vec::new();
        if let Some(ts) = self.frame.timestamp {
            parts.push(format_timestamp(ts));
        }
        if self.editing_query {
            parts.push(EDITING_MARK.to_string());
        }
        if self.is_fullscreen {
            parts.push(FULLSCREEN_MARK.to_string());
        }
        parts.join(" ")
    }
}

impl<'a> Widget for FrameHeader<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let marker = if self.collapsed { "▸ " } else { "▾ " };
        let action = format!("{:<7}", self.frame.action.label());
        let prefix_width = (marker.width() + action.width()) as u16;

        let right = self.right_text();
        let right_width = if right.is_empty() { 0 } else { right.width() as u16 + 1 };

        let [left_area, right_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(right_width)]).areas(area);

        let dim = Style::default().fg(Color::DarkGray);
        let prefix = Line::from(vec![
            Span::styled(marker, dim),
            Span::styled(action, dim.add_modifier(Modifier::ITALIC)),
        ]);
        Paragraph::new(prefix).render(left_area, buf);

        let query_area = Rect {
            x: left_area.x.saturating_add(prefix_width),
            width: left_area.width.saturating_sub(prefix_width),
            ..left_area
        };
        if self.editing_query {
            self.editor.render(query_area, buf);
        } else {
            let query = truncate_to_width(&single_line(&self.frame.query), query_area.width as usize);
            Paragraph::new(Span::styled(query, Style::default().fg(Color::White)))
                .render(query_area, buf);
        }

        if right_width > 0 {
            Paragraph::new(Line::from(Span::styled(right, dim)).right_aligned())
                .render(right_area, buf);
        }
    }
}

/// Collapse whitespace runs (including newlines) to single spaces.
fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate to `max_width` display columns, ending in "…" when cut.
fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Format a Unix timestamp as "Nov 14 22:13" in local time.
fn format_timestamp(ts: i64) -> String {
    use chrono::{DateTime, Local, Utc};
    let dt: DateTime<Local> = DateTime::<Utc>::from_timestamp(ts, 0)
        .unwrap_or_default()
        .with_timezone(&Local);
    dt.format("%b %d %H:%M").to_string()
}

//! # QueryEditor Component
//!
//! Single-line editor shown in a frame header while its query is being
//! edited. Newlines from pastes are flattened to spaces.
//!
//! The editor ignores all input until focused. The owning frame item focuses
//! it after switching into editing mode.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};
use unicode_width::UnicodeWidthStr;

use crate::core::view_state::Focus;
use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    Changed,
    Submit(String),
    Cancel,
}

pub struct QueryEditor {
    buffer: String,
    /// Byte offset, always on a char boundary
    cursor: usize,
    focused: bool,
}

impl QueryEditor {
    pub fn new(text: &str) -> Self {
        let mut editor = Self {
            buffer: String::new(),
            cursor: 0,
            focused: false,
        };
        editor.set_text(text);
        editor
    }

    /// Replace the content and move the cursor to the end.
    pub fn set_text(&mut self, text: &str) {
        self.buffer = flatten(text);
        self.cursor = self.buffer.len();
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the content differs from `text` as it would be loaded.
    pub fn is_modified_from(&self, text: &str) -> bool {
        self.buffer != flatten(text)
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    fn prev_boundary(&self, pos: usize) -> usize {
        self.buffer[..pos]
            .chars()
            .next_back()
            .map_or(0, |c| pos - c.len_utf8())
    }

    fn next_boundary(&self, pos: usize) -> usize {
        self.buffer[pos..]
            .chars()
            .next()
            .map_or(self.buffer.len(), |c| pos + c.len_utf8())
    }
}

impl Focus for QueryEditor {
    fn focus(&mut self) {
        self.focused = true;
    }
}

fn flatten(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

impl EventHandler for QueryEditor {
    type Event = EditorEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if !self.focused {
            return None;
        }
        match event {
            TuiEvent::InputChar(c) => {
                let c = if *c == '\n' { ' ' } else { *c };
                self.buffer.insert(self.cursor, c);
                self.cursor += c.len_utf8();
                Some(EditorEvent::Changed)
            }
            TuiEvent::Paste(text) => {
                let text = flatten(text);
                self.buffer.insert_str(self.cursor, &text);
                self.cursor += text.len();
                Some(EditorEvent::Changed)
            }
            TuiEvent::Backspace => {
                if self.cursor == 0 {
                    return None;
                }
                let prev = self.prev_boundary(self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                Some(EditorEvent::Changed)
            }
            TuiEvent::CursorLeft => (self.cursor > 0).then(|| {
                self.cursor = self.prev_boundary(self.cursor);
                EditorEvent::Changed
            }),
            TuiEvent::CursorRight => (self.cursor < self.buffer.len()).then(|| {
                self.cursor = self.next_boundary(self.cursor);
                EditorEvent::Changed
            }),
            TuiEvent::Submit => Some(EditorEvent::Submit(self.buffer.clone())),
            TuiEvent::Escape => Some(EditorEvent::Cancel),
            _ => None,
        }
    }
}

impl Widget for &QueryEditor {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let avail = area.width as usize;
        if avail == 0 || area.height == 0 {
            return;
        }

        // Slide the window right until the cursor cell fits
        let mut start = 0;
        while start < self.cursor && self.buffer[start..self.cursor].width() + 1 > avail {
            start = self.next_boundary(start);
        }

        let text_style = Style::default().fg(Color::Yellow);
        let cursor_style = if self.focused {
            text_style.add_modifier(Modifier::REVERSED)
        } else {
            text_style
        };

        let before = &self.buffer[start..self.cursor];
        let at_end = self.cursor == self.buffer.len();
        let cursor_end = self.next_boundary(self.cursor);
        let under_cursor = if at_end {
            " "
        } else {
            &self.buffer[self.cursor..cursor_end]
        };
        let after = if at_end { "" } else { &self.buffer[cursor_end..] };

        let line = Line::from(vec![
            Span::styled(before, text_style),
            Span::styled(under_cursor, cursor_style),
            Span::styled(after, text_style),
        ]);
        Paragraph::new(line).render(area, buf);
    }
}

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Padding, Paragraph, Widget, Wrap};

use crate::core::frame::QueryFrame;

/// Horizontal padding (per side) inside the item's border.
const CONTENT_PAD_H: u16 = 1;

const PENDING_TEXT: &str = "Response not fetched yet";

/// Default child content of a frame list item: the frame's response.
///
/// Transient, like every render wrapper here. The wrapping options used by
/// [`calculate_height`](Self::calculate_height) match `Paragraph`'s so the
/// list can lay out items without rendering them.
#[derive(Clone, Copy)]
pub struct FrameBody<'a> {
    pub frame: &'a QueryFrame,
    /// Wrapped rows skipped at the top
    pub scroll: u16,
}

impl<'a> FrameBody<'a> {
    pub fn new(frame: &'a QueryFrame) -> Self {
        Self { frame, scroll: 0 }
    }

    pub fn scroll(mut self, rows: u16) -> Self {
        self.scroll = rows;
        self
    }

    fn text(&self) -> &'a str {
        self.frame
            .response
            .as_deref()
            .map(str::trim)
            .unwrap_or(PENDING_TEXT)
    }

    /// Rows needed to show the body at `width` (inner width of the item).
    pub fn calculate_height(frame: &QueryFrame, width: u16) -> u16 {
        let content_width = width.saturating_sub(CONTENT_PAD_H * 2);
        if content_width == 0 {
            return 1;
        }
        let content = FrameBody::new(frame).text();
        if content.is_empty() {
            return 1;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        (textwrap::wrap(content, options).len() as u16).max(1)
    }
}

impl<'a> Widget for FrameBody<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = if self.frame.response_fetched() {
            Style::default().fg(Color::Gray)
        } else {
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC)
        };

        let inner = ratatui::widgets::Block::default()
            .padding(Padding::horizontal(CONTENT_PAD_H))
            .inner(area);

        Paragraph::new(self.text())
            .style(style)
            .wrap(Wrap { trim: true })
            .scroll((self.scroll, 0))
            .render(inner, buf);
    }
}

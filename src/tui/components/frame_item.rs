//! # FrameListItem Component
//!
//! One frame of the frame list: a bordered list item with a header line and,
//! unless collapsed, the frame's child content.
//!
//! ## Architecture
//!
//! Follows the persistent state + transient wrapper pattern:
//!
//! - `FrameItemState` lives in `FrameListState` for as long as the frame is
//!   listed. It owns the instance identity, the root surface handle, the
//!   `ViewState` flags, the query editor and the fullscreen change
//!   subscription.
//! - `FrameListItem` is created every draw with borrowed state and props and
//!   rendered as a ratatui `Widget`.
//!
//! ## Lifecycle
//!
//! ```text
//! new() ──► mount(registry) ──► [toggles, change notifications] ──► unmount() / drop
//! ```
//!
//! Change notifications reaching an unmounted instance are ignored.
//!
//! ## Classes
//!
//! The rendered item carries a class list derived only from state and props:
//! `frame-item` always, `fullscreen` iff fullscreen, `collapsed` iff the
//! `collapsed` prop, `frame-session` iff a response was fetched. Styling is a
//! function of that list (see [`border_style`]).

use log::{debug, info};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Widget};

use crate::core::frame::QueryFrame;
use crate::core::fullscreen::{
    FullscreenControl, FullscreenRegistry, InstanceId, Subscription, SurfaceHandle,
};
use crate::core::view_state::{self, ViewState};
use crate::tui::component::EventHandler;
use crate::tui::components::frame_body::FrameBody;
use crate::tui::components::frame_header::{FrameHeader, HeaderEvent};
use crate::tui::components::query_editor::{EditorEvent, QueryEditor};
use crate::tui::event::TuiEvent;

pub const CLASS_FRAME_ITEM: &str = "frame-item";
pub const CLASS_FULLSCREEN: &str = "fullscreen";
pub const CLASS_COLLAPSED: &str = "collapsed";
pub const CLASS_FRAME_SESSION: &str = "frame-session";

/// Rows taken by the border (top + bottom).
const BORDER_ROWS: u16 = 2;
const HEADER_ROWS: u16 = 1;

/// Events a frame item passes up to its parent.
///
/// Discard and select are the header's; the item forwards them untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameItemEvent {
    Discard(String),
    SelectQuery(String),
    QueryEdited { id: String, query: String },
}

/// Persistent per-instance state of a frame list item.
pub struct FrameItemState {
    id: InstanceId,
    frame_id: String,
    surface: SurfaceHandle,
    view: ViewState,
    editor: QueryEditor,
    subscription: Option<Subscription>,
    body_scroll: u16,
    /// (content rows, visible rows) of the body at the last fullscreen draw
    body_extent: (u16, u16),
}

impl FrameItemState {
    pub fn new(id: InstanceId, frame: &QueryFrame) -> Self {
        Self {
            id,
            frame_id: frame.id.clone(),
            surface: SurfaceHandle::for_instance(id),
            view: ViewState::default(),
            editor: QueryEditor::new(&frame.query),
            subscription: None,
            body_scroll: 0,
            body_extent: (0, 0),
        }
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn frame_id(&self) -> &str {
        &self.frame_id
    }

    pub fn surface(&self) -> SurfaceHandle {
        self.surface
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn is_fullscreen(&self) -> bool {
        self.view.is_fullscreen
    }

    pub fn editing_query(&self) -> bool {
        self.view.editing_query
    }

    pub fn editor(&self) -> &QueryEditor {
        &self.editor
    }

    pub fn body_scroll(&self) -> u16 {
        self.body_scroll
    }

    /// Record how much of the body fits, clamping the scroll offset.
    pub fn set_body_extent(&mut self, content_rows: u16, visible_rows: u16) {
        self.body_extent = (content_rows, visible_rows);
        self.body_scroll = self.body_scroll.min(self.max_body_scroll());
    }

    fn max_body_scroll(&self) -> u16 {
        self.body_extent.0.saturating_sub(self.body_extent.1)
    }

    fn body_page(&self) -> u16 {
        self.body_extent.1.saturating_sub(1).max(1)
    }

    pub fn scroll_body_up(&mut self) {
        self.body_scroll = self.body_scroll.saturating_sub(self.body_page());
    }

    pub fn scroll_body_down(&mut self) {
        self.body_scroll = self
            .body_scroll
            .saturating_add(self.body_page())
            .min(self.max_body_scroll());
    }

    /// Start listening for fullscreen changes. Mounting twice is a no-op.
    pub fn mount(&mut self, registry: &FullscreenRegistry) {
        if self.subscription.is_none() {
            self.subscription = Some(registry.subscribe(self.id));
            debug!("Mounted frame item {} ({})", self.id, self.frame_id);
        }
    }

    /// Stop listening for fullscreen changes.
    pub fn unmount(&mut self) {
        if self.subscription.take().is_some() {
            debug!("Unmounted frame item {} ({})", self.id, self.frame_id);
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn toggle_fullscreen(&mut self, platform: &mut dyn FullscreenControl) {
        view_state::toggle_fullscreen(&mut self.view, self.surface, platform);
        if !self.view.is_fullscreen {
            self.body_scroll = 0;
        }
    }

    /// Flip editing mode; the editor is focused after entering it.
    ///
    /// The editor is loaded with `query` on the way in.
    pub fn toggle_editing_query(&mut self, query: &str) {
        if !self.view.editing_query {
            self.editor.set_text(query);
        }
        let effect = view_state::toggle_editing_query(&mut self.view);
        if !self.view.editing_query {
            self.editor.blur();
        }
        view_state::dispatch_effect(effect, &mut self.editor);
    }

    /// Fullscreen change notification handler.
    pub fn sync_fullscreen_exit(&mut self, platform: &dyn FullscreenControl) {
        if !self.is_mounted() {
            debug!("Ignoring fullscreen change for unmounted item {}", self.id);
            return;
        }
        view_state::sync_fullscreen_exit(&mut self.view, platform);
        if !self.view.is_fullscreen {
            self.body_scroll = 0;
        }
    }

    /// Route a key event. `frame` is the frame this instance shows.
    pub fn handle_event(
        &mut self,
        event: &TuiEvent,
        frame: &QueryFrame,
        platform: &mut dyn FullscreenControl,
    ) -> Option<FrameItemEvent> {
        if self.view.editing_query && self.editor.is_focused() {
            return match self.editor.handle_event(event)? {
                EditorEvent::Submit(query) => {
                    let modified = self.editor.is_modified_from(&frame.query);
                    self.toggle_editing_query(&frame.query);
                    // Newlines only survive an untouched query
                    if !modified {
                        debug!("Query of frame {} left unchanged", frame.id);
                        return None;
                    }
                    info!("Query edited in frame {}", frame.id);
                    Some(FrameItemEvent::QueryEdited {
                        id: frame.id.clone(),
                        query,
                    })
                }
                EditorEvent::Cancel => {
                    self.toggle_editing_query(&frame.query);
                    None
                }
                EditorEvent::Changed => None,
            };
        }

        match FrameHeader::map_event(event)? {
            HeaderEvent::ToggleFullscreen => {
                self.toggle_fullscreen(platform);
                None
            }
            HeaderEvent::ToggleEditingQuery => {
                self.toggle_editing_query(&frame.query);
                None
            }
            HeaderEvent::Discard => Some(FrameItemEvent::Discard(frame.id.clone())),
            HeaderEvent::SelectQuery => Some(FrameItemEvent::SelectQuery(frame.id.clone())),
        }
    }
}

/// Class list for an item in the given state.
pub fn class_list(is_fullscreen: bool, collapsed: bool, response_fetched: bool) -> Vec<&'static str> {
    let mut classes = vec![CLASS_FRAME_ITEM];
    if is_fullscreen {
        classes.push(CLASS_FULLSCREEN);
    }
    if collapsed {
        classes.push(CLASS_COLLAPSED);
    }
    if response_fetched {
        classes.push(CLASS_FRAME_SESSION);
    }
    classes
}

/// Border style for a class list.
pub fn border_style(classes: &[&str], selected: bool) -> Style {
    let mut style = if selected {
        Style::default().fg(Color::Cyan)
    } else if classes.contains(&CLASS_FRAME_SESSION) {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    if classes.contains(&CLASS_COLLAPSED) {
        style = style.add_modifier(Modifier::DIM);
    }
    if classes.contains(&CLASS_FULLSCREEN) {
        style = style.add_modifier(Modifier::BOLD);
    }
    style
}

/// Rows needed by an item showing the default `FrameBody` at `width`.
pub fn item_height(frame: &QueryFrame, collapsed: bool, width: u16) -> u16 {
    let body = if collapsed {
        0
    } else {
        FrameBody::calculate_height(frame, width.saturating_sub(2))
    };
    BORDER_ROWS + HEADER_ROWS + body
}

/// Transient render wrapper for one frame list item.
pub struct FrameListItem<'a, C: Widget> {
    pub state: &'a FrameItemState,
    pub frame: &'a QueryFrame,
    pub collapsed: bool,
    pub response_fetched: bool,
    pub selected: bool,
    pub children: C,
}

impl<'a> FrameListItem<'a, FrameBody<'a>> {
    /// Item showing the frame's response as its children.
    pub fn with_body(state: &'a FrameItemState, frame: &'a QueryFrame, collapsed: bool) -> Self {
        Self {
            state,
            frame,
            collapsed,
            response_fetched: frame.response_fetched(),
            selected: false,
            children: FrameBody::new(frame).scroll(state.body_scroll()),
        }
    }
}

impl<'a, C: Widget> FrameListItem<'a, C> {
    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn classes(&self) -> Vec<&'static str> {
        class_list(self.state.is_fullscreen(), self.collapsed, self.response_fetched)
    }
}

impl<'a, C: Widget> Widget for FrameListItem<'a, C> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let classes = self.classes();
        let style = border_style(&classes, self.selected);

        let mut block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(style);
        if classes.contains(&CLASS_FULLSCREEN) {
            block = block.title_bottom(Line::from(" f / Esc: leave fullscreen  PgUp/PgDn: scroll ").centered());
        }

        let inner = block.inner(area);
        block.render(area, buf);

        let header_area = Rect {
            height: inner.height.min(HEADER_ROWS),
            ..inner
        };
        FrameHeader {
            frame: self.frame,
            is_fullscreen: self.state.is_fullscreen(),
            collapsed: self.collapsed,
            editing_query: self.state.editing_query(),
            editor: self.state.editor(),
        }
        .render(header_area, buf);

        if !self.collapsed {
            let body_area = Rect {
                y: inner.y.saturating_add(header_area.height),
                height: inner.height.saturating_sub(header_area.height),
                ..inner
            };
            self.children.render(body_area, buf);
        }
    }
}

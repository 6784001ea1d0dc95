//! # FrameList Component
//!
//! Scrollable column of frame list items.
//!
//! ## Responsibilities
//!
//! - Keep one `FrameItemState` per listed frame, in frame order
//! - Mount new instances and unmount removed ones
//! - Selection, collapse toggling, scrolling
//! - Layout caching (item heights) for scroll positioning
//!
//! ## Architecture
//!
//! `FrameList` is a transient component (created each frame) that wraps
//! `&'a mut FrameListState` (persistent state) and the frame slice (props).
//! The layout cache and scroll state are updated during the render pass.

use std::collections::HashSet;

use log::debug;
use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect, Size};
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::frame::QueryFrame;
use crate::core::fullscreen::{FullscreenControl, FullscreenRegistry, InstanceId, SurfaceHandle};
use crate::tui::component::Component;
use crate::tui::components::frame_item::{FrameItemState, FrameListItem, item_height};

/// Cached item heights from the last render.
#[derive(Default)]
pub struct LayoutCache {
    pub heights: Vec<u16>,
    /// Cumulative bottom edge of each item
    pub prefix_heights: Vec<u16>,
}

impl LayoutCache {
    fn update(&mut self, heights: Vec<u16>) {
        let mut acc: u16 = 0;
        self.prefix_heights = heights
            .iter()
            .map(|h| {
                acc = acc.saturating_add(*h);
                acc
            })
            .collect();
        self.heights = heights;
    }

    fn total(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }
}

/// Persistent state for the frame list. Lives in `TuiState`.
pub struct FrameListState {
    items: Vec<FrameItemState>,
    next_instance: u64,
    pub selected: Option<usize>,
    pub collapsed: HashSet<String>,
    pub scroll_state: ScrollViewState,
    pub layout: LayoutCache,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl Default for FrameListState {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameListState {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            next_instance: 1,
            selected: None,
            collapsed: HashSet::new(),
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::default(),
            viewport_height: 0,
        }
    }

    pub fn items(&self) -> &[FrameItemState] {
        &self.items
    }

    /// Reconcile item instances with `frames`, keyed by frame id.
    ///
    /// Kept frames keep their instance (and its view state). New frames get a
    /// fresh, mounted instance. Instances of removed frames are unmounted and
    /// dropped.
    pub fn sync_items(&mut self, frames: &[QueryFrame], registry: &FullscreenRegistry) {
        let mut old = std::mem::take(&mut self.items);
        let mut items = Vec::with_capacity(frames.len());

        for frame in frames {
            let item = match old.iter().position(|i| i.frame_id() == frame.id) {
                Some(pos) => old.swap_remove(pos),
                None => {
                    let id = InstanceId(self.next_instance);
                    self.next_instance += 1;
                    let mut item = FrameItemState::new(id, frame);
                    item.mount(registry);
                    item
                }
            };
            items.push(item);
        }

        for mut gone in old {
            gone.unmount();
        }

        self.items = items;
        self.collapsed
            .retain(|id| frames.iter().any(|f| &f.id == id));
        self.selected = if self.items.is_empty() {
            None
        } else {
            Some(self.selected.unwrap_or(0).min(self.items.len() - 1))
        };
        debug!("Frame list synced: {} item(s)", self.items.len());
    }

    pub fn item_by_instance_mut(&mut self, id: InstanceId) -> Option<&mut FrameItemState> {
        self.items.iter_mut().find(|i| i.id() == id)
    }

    pub fn selected_item_mut(&mut self) -> Option<&mut FrameItemState> {
        self.selected.and_then(|idx| self.items.get_mut(idx))
    }

    /// Index of the item owning `surface`.
    pub fn index_of_surface(&self, surface: SurfaceHandle) -> Option<usize> {
        self.items.iter().position(|i| i.surface() == surface)
    }

    /// Deliver a fullscreen change notification to the given instances.
    pub fn sync_fullscreen_exit(&mut self, ids: &[InstanceId], platform: &dyn FullscreenControl) {
        for id in ids {
            if let Some(item) = self.item_by_instance_mut(*id) {
                item.sync_fullscreen_exit(platform);
            }
        }
    }

    pub fn is_collapsed(&self, frame_id: &str) -> bool {
        self.collapsed.contains(frame_id)
    }

    pub fn toggle_collapsed_selected(&mut self) {
        let Some(item) = self.selected.and_then(|idx| self.items.get(idx)) else {
            return;
        };
        let frame_id = item.frame_id().to_string();
        if !self.collapsed.remove(&frame_id) {
            self.collapsed.insert(frame_id);
        }
    }

    pub fn select_prev(&mut self) {
        if let Some(idx) = self.selected {
            self.selected = Some(idx.saturating_sub(1));
            self.scroll_to_selected();
        }
    }

    pub fn select_next(&mut self) {
        if let Some(idx) = self.selected
            && idx + 1 < self.items.len()
        {
            self.selected = Some(idx + 1);
            self.scroll_to_selected();
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll_state.scroll_up();
    }

    pub fn scroll_down(&mut self) {
        self.scroll_state.scroll_down();
        self.clamp_scroll();
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.layout.total().saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Scroll the viewport so the selected item is fully visible.
    /// If the item is taller than the viewport, align its top edge.
    pub fn scroll_to_selected(&mut self) {
        let Some(idx) = self.selected else {
            return;
        };
        if idx >= self.layout.prefix_heights.len() {
            return;
        }

        let item_top = if idx == 0 {
            0
        } else {
            self.layout.prefix_heights[idx - 1]
        };
        let item_bottom = self.layout.prefix_heights[idx];
        let offset_y = self.scroll_state.offset().y;

        if item_top < offset_y {
            self.scroll_state.set_offset(Position { x: 0, y: item_top });
        } else if item_bottom > offset_y + self.viewport_height {
            let new_y = item_bottom
                .saturating_sub(self.viewport_height)
                .min(item_top);
            self.scroll_state.set_offset(Position { x: 0, y: new_y });
        }
    }
}

/// Scrollable frame list. Created fresh each frame.
pub struct FrameList<'a> {
    pub state: &'a mut FrameListState,
    pub frames: &'a [QueryFrame],
}

impl<'a> FrameList<'a> {
    pub fn new(state: &'a mut FrameListState, frames: &'a [QueryFrame]) -> Self {
        Self { state, frames }
    }
}

impl<'a> Component for FrameList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.viewport_height = area.height;

        if self.frames.is_empty() {
            let empty = Paragraph::new("No frames. Start with --frames <PATH>.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            frame.render_widget(empty, area);
            return;
        }

        let content_width = area.width.saturating_sub(1); // -1 for scrollbar
        let heights: Vec<u16> = self
            .frames
            .iter()
            .map(|f| item_height(f, self.state.is_collapsed(&f.id), content_width))
            .collect();
        self.state.layout.update(heights);
        self.state.clamp_scroll();

        let mut scroll_view = ScrollView::new(Size::new(content_width, self.state.layout.total()))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y: u16 = 0;
        for (idx, (data, height)) in self
            .frames
            .iter()
            .zip(self.state.layout.heights.iter().copied())
            .enumerate()
        {
            let rect = Rect::new(0, y, content_width, height);
            y = y.saturating_add(height);

            let Some(item) = self.state.items.get(idx).filter(|i| i.frame_id() == data.id) else {
                debug!("No item instance for frame {}, skipping", data.id);
                continue;
            };
            let widget = FrameListItem::with_body(item, data, self.state.is_collapsed(&data.id))
                .selected(self.state.selected == Some(idx));
            scroll_view.render_widget(widget, rect);
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::frame::QueryFrame;
    use crate::test_support::{ScriptedFullscreen, buffer_text, sample_frames};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn synced(frames: &[QueryFrame], registry: &FullscreenRegistry) -> FrameListState {
        let mut state = FrameListState::new();
        state.sync_items(frames, registry);
        state
    }

    #[test]
    fn sync_creates_and_mounts_one_item_per_frame() {
        let registry = FullscreenRegistry::new();
        let state = synced(&sample_frames(), &registry);

        assert_eq!(state.items().len(), 3);
        assert_eq!(registry.len(), 3);
        assert!(state.items().iter().all(|i| i.is_mounted()));
        assert_eq!(state.selected, Some(0));
    }

    #[test]
    fn sync_keeps_instances_of_remaining_frames() {
        let registry = FullscreenRegistry::new();
        let mut frames = sample_frames();
        let mut state = synced(&frames, &registry);
        let kept_id = state.items()[2].id();

        frames.remove(1);
        state.sync_items(&frames, &registry);

        assert_eq!(state.items().len(), 2);
        assert_eq!(state.items()[1].id(), kept_id);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn sync_gives_new_frames_fresh_instances() {
        let registry = FullscreenRegistry::new();
        let mut frames = sample_frames();
        let mut state = synced(&frames, &registry);
        let first_ids: Vec<_> = state.items().iter().map(|i| i.id()).collect();

        frames.push(QueryFrame::new("{ new }"));
        state.sync_items(&frames, &registry);

        let new_id = state.items()[3].id();
        assert!(!first_ids.contains(&new_id));
        assert!(registry.is_subscribed(new_id));
    }

    #[test]
    fn removed_frame_no_longer_receives_notifications() {
        let registry = FullscreenRegistry::new();
        let mut platform = ScriptedFullscreen::new();
        let mut frames = sample_frames();
        let mut state = synced(&frames, &registry);
        let removed_id = state.items()[0].id();

        frames.remove(0);
        state.sync_items(&frames, &registry);
        platform.fire_change();

        let ids = registry.dispatch(&mut platform);
        assert!(!ids.contains(&removed_id));
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn selection_clamps_after_removal_and_clears_when_empty() {
        let registry = FullscreenRegistry::new();
        let mut frames = sample_frames();
        let mut state = synced(&frames, &registry);
        state.selected = Some(2);

        frames.truncate(1);
        state.sync_items(&frames, &registry);
        assert_eq!(state.selected, Some(0));

        frames.clear();
        state.sync_items(&frames, &registry);
        assert_eq!(state.selected, None);
        assert!(registry.is_empty());
    }

    #[test]
    fn select_next_and_prev_stay_in_bounds() {
        let registry = FullscreenRegistry::new();
        let mut state = synced(&sample_frames(), &registry);

        state.select_prev();
        assert_eq!(state.selected, Some(0));
        state.select_next();
        state.select_next();
        state.select_next();
        assert_eq!(state.selected, Some(2));
    }

    #[test]
    fn toggle_collapsed_selected_flips() {
        let registry = FullscreenRegistry::new();
        let mut state = synced(&sample_frames(), &registry);

        state.toggle_collapsed_selected();
        assert!(state.is_collapsed("f1"));
        state.toggle_collapsed_selected();
        assert!(!state.is_collapsed("f1"));
    }

    #[test]
    fn collapsed_ids_of_removed_frames_are_forgotten() {
        let registry = FullscreenRegistry::new();
        let mut frames = sample_frames();
        let mut state = synced(&frames, &registry);
        state.toggle_collapsed_selected();

        frames.remove(0);
        state.sync_items(&frames, &registry);

        assert!(state.collapsed.is_empty());
    }

    #[test]
    fn fan_out_reaches_every_mounted_item() {
        let registry = FullscreenRegistry::new();
        let mut platform = ScriptedFullscreen::new();
        let mut state = synced(&sample_frames(), &registry);
        if let Some(item) = state.selected_item_mut() {
            item.toggle_fullscreen(&mut platform);
        }
        assert!(state.items()[0].is_fullscreen());

        platform.external_exit();
        let ids = registry.dispatch(&mut platform);
        state.sync_fullscreen_exit(&ids, &platform);

        assert!(state.items().iter().all(|i| !i.is_fullscreen()));
    }

    #[test]
    fn index_of_surface_finds_owner() {
        let registry = FullscreenRegistry::new();
        let state = synced(&sample_frames(), &registry);
        let surface = state.items()[1].surface();
        assert_eq!(state.index_of_surface(surface), Some(1));
    }

    #[test]
    fn render_lists_frames_and_caches_layout() {
        let registry = FullscreenRegistry::new();
        let frames = sample_frames();
        let mut state = synced(&frames, &registry);
        state.toggle_collapsed_selected();

        let mut terminal = Terminal::new(TestBackend::new(70, 20)).unwrap();
        terminal
            .draw(|f| FrameList::new(&mut state, &frames).render(f, f.area()))
            .unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("people(func: has(name))"));
        assert!(text.contains("Bob"));
        // First frame is collapsed: its response is hidden
        assert!(!text.contains("Alice"));
        assert_eq!(state.layout.heights, vec![3, 4, 4]);
        assert_eq!(state.layout.prefix_heights, vec![3, 7, 11]);
    }

    #[test]
    fn render_empty_list_shows_hint() {
        let mut state = FrameListState::new();
        let mut terminal = Terminal::new(TestBackend::new(60, 5)).unwrap();
        terminal
            .draw(|f| FrameList::new(&mut state, &[]).render(f, f.area()))
            .unwrap();
        assert!(buffer_text(terminal.backend().buffer()).contains("No frames"));
    }
}

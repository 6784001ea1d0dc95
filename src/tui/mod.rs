//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI and
//! routes keyboard events to the frame items and the core reducer.
//!
//! ## Event Routing
//!
//! - `Ctrl+C` always quits.
//! - While the selected item edits its query, every key goes to the item.
//! - Otherwise list keys (`↑`/`↓`, `c`, `q`) are handled here, and `Esc`
//!   leaves platform fullscreen from outside the component. `PgUp`/`PgDn`
//!   scroll the fullscreen item's body, or the list when there is none.
//! - Everything else goes to the selected item, which may emit a
//!   `FrameItemEvent` for the reducer.
//!
//! After each batch of input the platform's pending fullscreen change is
//! fanned out to all mounted items through the `FullscreenRegistry`.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop sleeps up to 500ms and only redraws after
//! input, a resize or a fullscreen change.

pub mod component;
pub mod components;
pub mod event;
pub mod host;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::fullscreen::{FullscreenControl, FullscreenRegistry};
use crate::core::state::App;
use crate::tui::components::{FrameItemEvent, FrameListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::host::TerminalFullscreen;

const IDLE_POLL: Duration = Duration::from_millis(500);

/// TUI-specific presentation state (not part of core domain state)
pub struct TuiState {
    pub frame_list: FrameListState,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            frame_list: FrameListState::new(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, EnableBracketedPaste, Hide)?;
        info!("Terminal modes enabled (mouse, bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste, Show);
    }
}

pub fn run(config: &ResolvedConfig, mut app: App) -> std::io::Result<()> {
    let registry = FullscreenRegistry::new();
    let mut host = TerminalFullscreen::new(config.fullscreen_enabled);
    let mut tui = TuiState::new();
    tui.frame_list.sync_items(&app.frames, &registry);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new()?;

    let mut needs_redraw = true;
    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, &host))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(IDLE_POLL);
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            needs_redraw = true;
            if handle_event(&mut app, &mut tui, &mut host, &registry, event) == Effect::Quit {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }

        if deliver_fullscreen_changes(&mut tui, &mut host, &registry) {
            needs_redraw = true;
        }
    }

    ratatui::restore();
    info!("framedeck shutting down");
    Ok(())
}

/// Fan the platform's pending change notification out to mounted items.
/// Returns `true` if there was one.
fn deliver_fullscreen_changes(
    tui: &mut TuiState,
    host: &mut TerminalFullscreen,
    registry: &FullscreenRegistry,
) -> bool {
    let ids = registry.dispatch(host);
    if ids.is_empty() {
        return false;
    }
    tui.frame_list.sync_fullscreen_exit(&ids, host);
    true
}

/// Scroll the fullscreen item's body if there is one, otherwise the list.
fn scroll(tui: &mut TuiState, host: &TerminalFullscreen, up: bool) {
    if let Some(surface) = host.active_surface()
        && let Some(item) = tui.frame_list.item_by_instance_mut(surface.instance())
    {
        if up {
            item.scroll_body_up();
        } else {
            item.scroll_body_down();
        }
        return;
    }
    if up {
        tui.frame_list.scroll_up();
    } else {
        tui.frame_list.scroll_down();
    }
}

fn handle_event(
    app: &mut App,
    tui: &mut TuiState,
    host: &mut TerminalFullscreen,
    registry: &FullscreenRegistry,
    event: TuiEvent,
) -> Effect {
    match event {
        TuiEvent::Resize => return Effect::None,
        TuiEvent::ForceQuit => return update(app, Action::Quit),
        _ => {}
    }

    // Keys belong to the fullscreen item while there is one
    if let Some(surface) = host.active_surface()
        && let Some(idx) = tui.frame_list.index_of_surface(surface)
    {
        tui.frame_list.selected = Some(idx);
    }

    let editing = tui
        .frame_list
        .selected_item_mut()
        .is_some_and(|item| item.editing_query());

    if !editing {
        match event {
            TuiEvent::InputChar('q') => return update(app, Action::Quit),
            TuiEvent::Escape if host.is_fullscreen() => {
                debug!("Esc pressed, leaving fullscreen");
                host.exit();
                return Effect::None;
            }
            TuiEvent::CursorUp => {
                tui.frame_list.select_prev();
                return Effect::None;
            }
            TuiEvent::CursorDown => {
                tui.frame_list.select_next();
                return Effect::None;
            }
            TuiEvent::ScrollUp | TuiEvent::ScrollDown => {
                scroll(tui, host, event == TuiEvent::ScrollUp);
                return Effect::None;
            }
            TuiEvent::InputChar('c') => {
                tui.frame_list.toggle_collapsed_selected();
                return Effect::None;
            }
            _ => {}
        }
    }

    let Some(idx) = tui.frame_list.selected else {
        return Effect::None;
    };
    let Some(frame) = app.frames.get(idx) else {
        warn!("Selection {} has no frame", idx);
        return Effect::None;
    };
    let Some(item) = tui.frame_list.selected_item_mut() else {
        return Effect::None;
    };

    let item_event = item.handle_event(&event, frame, host);
    let surface = item.surface();

    let action = match item_event {
        Some(FrameItemEvent::Discard(id)) => {
            // A surface removed while fullscreen takes the fullscreen with it
            if host.active_surface() == Some(surface) {
                host.exit();
            }
            Action::DiscardFrame(id)
        }
        Some(FrameItemEvent::SelectQuery(id)) => Action::SelectQuery(id),
        Some(FrameItemEvent::QueryEdited { id, query }) => Action::EditQuery { id, query },
        None => return Effect::None,
    };

    let effect = update(app, action);
    tui.frame_list.sync_items(&app.frames, registry);
    effect
}

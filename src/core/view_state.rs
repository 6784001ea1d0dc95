//! # Frame View State
//!
//! The two flags a frame list item owns, and the transitions that change
//! them. Each transition commits the new state before returning, and any
//! follow-up work comes back as an [`Effect`]:
//!
//! ```text
//! ViewState  →  transition  →  Effect  →  dispatch_effect()
//! ```
//!
//! so an effect always runs strictly after the state it depends on.

use log::debug;

use crate::core::fullscreen::{FullscreenControl, SurfaceHandle};

/// Local view state of one frame list item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewState {
    pub is_fullscreen: bool,
    pub editing_query: bool,
}

/// Work to do after a transition has been committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    FocusQueryEditor,
}

/// Something that can take keyboard focus.
pub trait Focus {
    fn focus(&mut self);
}

/// Enter or leave fullscreen for `surface`.
///
/// Entry is confirmed by re-reading the platform; exit is assumed to work and
/// left to the change notification to correct.
pub fn toggle_fullscreen(
    state: &mut ViewState,
    surface: SurfaceHandle,
    platform: &mut dyn FullscreenControl,
) {
    if !platform.is_enabled() {
        debug!("Fullscreen unavailable, ignoring toggle for {:?}", surface);
        return;
    }

    if state.is_fullscreen {
        platform.exit();
        state.is_fullscreen = false;
    } else {
        platform.request(surface);
        if platform.is_fullscreen() {
            state.is_fullscreen = true;
        }
    }
    debug!("Fullscreen toggled for {:?}: now {}", surface, state.is_fullscreen);
}

pub fn toggle_editing_query(state: &mut ViewState) -> Effect {
    state.editing_query = !state.editing_query;
    if state.editing_query {
        Effect::FocusQueryEditor
    } else {
        Effect::None
    }
}

/// Handle a platform change notification. Only ever clears the flag.
pub fn sync_fullscreen_exit(state: &mut ViewState, platform: &dyn FullscreenControl) {
    if !platform.is_fullscreen() {
        state.is_fullscreen = false;
    }
}

/// Run a committed transition's effect.
pub fn dispatch_effect(effect: Effect, editor: &mut dyn Focus) {
    match effect {
        Effect::FocusQueryEditor => editor.focus(),
        Effect::None => {}
    }
}

//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::frame::{FrameAction, QueryFrame};
use crate::core::fullscreen::{FullscreenControl, SurfaceHandle};
use crate::core::view_state::Focus;

/// A fullscreen platform whose answers are scripted by the test.
///
/// Records how often it was asked to enter and leave fullscreen.
pub struct ScriptedFullscreen {
    pub enabled: bool,
    pub grant_requests: bool,
    pub grant_exits: bool,
    pub active: Option<SurfaceHandle>,
    pub requests: usize,
    pub exits: usize,
    pending_change: bool,
}

impl ScriptedFullscreen {
    pub fn new() -> Self {
        Self {
            enabled: true,
            grant_requests: true,
            grant_exits: true,
            active: None,
            requests: 0,
            exits: 0,
            pending_change: false,
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new()
        }
    }

    pub fn deny_requests(mut self) -> Self {
        self.grant_requests = false;
        self
    }

    pub fn deny_exits(mut self) -> Self {
        self.grant_exits = false;
        self
    }

    /// Leave fullscreen behind the component's back (like the user pressing Esc).
    pub fn external_exit(&mut self) {
        self.active = None;
        self.pending_change = true;
    }

    pub fn fire_change(&mut self) {
        self.pending_change = true;
    }
}

impl FullscreenControl for ScriptedFullscreen {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn request(&mut self, surface: SurfaceHandle) {
        self.requests += 1;
        if self.grant_requests {
            self.active = Some(surface);
            self.pending_change = true;
        }
    }

    fn exit(&mut self) {
        self.exits += 1;
        if self.grant_exits && self.active.take().is_some() {
            self.pending_change = true;
        }
    }

    fn is_fullscreen(&self) -> bool {
        self.active.is_some()
    }

    fn take_change_notification(&mut self) -> bool {
        std::mem::take(&mut self.pending_change)
    }
}

/// Counts focus calls.
#[derive(Default)]
pub struct CountingFocus {
    pub calls: usize,
}

impl Focus for CountingFocus {
    fn focus(&mut self) {
        self.calls += 1;
    }
}

/// Three frames: a fetched query, an unfetched query and a fetched mutation.
pub fn sample_frames() -> Vec<QueryFrame> {
    vec![
        QueryFrame {
            id: "f1".to_string(),
            action: FrameAction::Query,
            query: "{ me(func: uid(0x1)) { name } }".to_string(),
            response: Some(r#"{"me":[{"name":"Alice"}]}"#.to_string()),
            timestamp: Some(1_700_000_000),
        },
        QueryFrame {
            id: "f2".to_string(),
            action: FrameAction::Query,
            query: "{ people(func: has(name)) { uid name } }".to_string(),
            response: None,
            timestamp: None,
        },
        QueryFrame {
            id: "f3".to_string(),
            action: FrameAction::Mutate,
            query: "{ set { _:b <name> \"Bob\" . } }".to_string(),
            response: Some(r#"{"code":"Success"}"#.to_string()),
            timestamp: Some(1_700_000_600),
        },
    ]
}

/// Flatten a test terminal buffer into one string.
pub fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    buffer.content().iter().map(|c| c.symbol()).collect()
}

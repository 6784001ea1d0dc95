//! # Terminal Fullscreen Host
//!
//! The terminal's answer to a fullscreen API: one surface at a time may
//! claim the whole terminal area. The draw pass asks [`TerminalFullscreen::active_surface`]
//! which surface that is.
//!
//! Every accepted request or exit queues a change notification, whoever
//! caused it. The event loop drains it through the `FullscreenRegistry`.

use log::{debug, info};

use crate::core::fullscreen::{FullscreenControl, SurfaceHandle};

pub struct TerminalFullscreen {
    enabled: bool,
    active: Option<SurfaceHandle>,
    pending_change: bool,
}

impl TerminalFullscreen {
    pub fn new(enabled: bool) -> Self {
        info!("Terminal fullscreen {}", if enabled { "enabled" } else { "disabled" });
        Self {
            enabled,
            active: None,
            pending_change: false,
        }
    }

    /// Surface currently covering the terminal, if any.
    pub fn active_surface(&self) -> Option<SurfaceHandle> {
        self.active
    }
}

impl FullscreenControl for TerminalFullscreen {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn request(&mut self, surface: SurfaceHandle) {
        if !self.enabled {
            debug!("Fullscreen request for {:?} denied: disabled", surface);
            return;
        }
        if self.active != Some(surface) {
            self.active = Some(surface);
            self.pending_change = true;
        }
    }

    fn exit(&mut self) {
        if self.active.take().is_some() {
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

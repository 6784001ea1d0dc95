//! # Core Application Logic
//!
//! Frame data, view-state transitions and the fullscreen platform seam.
//! Knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────────┐
//!                    │            CORE             │
//!                    │                             │
//!                    │  • frame (data model)       │
//!                    │  • state / action (app)     │
//!                    │  • view_state (item flags)  │
//!                    │  • fullscreen (platform)    │
//!                    └──────────────┬──────────────┘
//!                                   │
//!                                   ▼
//!                            ┌────────────┐
//!                            │    TUI     │
//!                            │  Adapter   │
//!                            │ (ratatui)  │
//!                            └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all domain state in one place
//! - [`action`]: The `Action` enum and the app reducer
//! - [`view_state`]: Per-item `ViewState` and its transitions
//! - [`fullscreen`]: Platform control trait and the change registry

pub mod action;
pub mod config;
pub mod frame;
pub mod fullscreen;
pub mod state;
pub mod view_state;

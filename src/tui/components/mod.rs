//! # TUI Components
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: Top status bar
//! - `FrameHeader`: One-line header of a frame item
//! - `FrameBody`: A frame's response text
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `QueryEditor`: Single-line editor used while editing a frame's query
//! - `FrameListItem`: One frame; persistent `FrameItemState` + transient wrapper
//! - `FrameList`: Scrollable list of frame items
//!
//! Components receive external data as props and emit events upward
//! instead of reaching into app state. Each file keeps its state types,
//! event types, rendering, event handling and tests together.
//!
//! ```text
//! components/
//! ├── mod.rs
//! ├── title_bar.rs
//! ├── frame_list.rs
//! ├── frame_item.rs
//! ├── frame_header.rs
//! ├── frame_body.rs
//! └── query_editor.rs
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod frame_body;
pub mod frame_header;
pub mod frame_item;
pub mod frame_list;
pub mod query_editor;
pub use frame_body::FrameBody;
pub use frame_header::{FrameHeader, HeaderEvent};
pub use frame_item::{FrameItemEvent, FrameItemState, FrameListItem};
pub use frame_list::{FrameList, FrameListState};
pub use query_editor::{EditorEvent, QueryEditor};

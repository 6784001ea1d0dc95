//! # Frames
//!
//! A frame is one query/response pane. Frames are read from a JSON file at
//! startup; nothing here ever writes them back.
//!
//! ```json
//! [
//!   { "id": "f1", "action": "query", "query": "{ me(func: uid(0x1)) { name } }",
//!     "response": "{\"me\":[{\"name\":\"Alice\"}]}", "timestamp": 1700000000 }
//! ]
//! ```
//!
//! `id` is optional and gets a fresh UUID when missing. Ids must be unique
//! within a file; frames are addressed by id everywhere else.

use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

/// Kind of request a frame was created for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameAction {
    #[default]
    Query,
    Mutate,
    Alter,
}

impl FrameAction {
    pub fn label(&self) -> &'static str {
        match self {
            FrameAction::Query => "query",
            FrameAction::Mutate => "mutate",
            FrameAction::Alter => "alter",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct QueryFrame {
    #[serde(default = "generate_frame_id")]
    pub id: String,
    #[serde(default)]
    pub action: FrameAction,
    pub query: String,
    #[serde(default)]
    pub response: Option<String>,
    /// Unix seconds
    #[serde(default)]
    pub timestamp: Option<i64>,
}

fn generate_frame_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl QueryFrame {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            id: generate_frame_id(),
            action: FrameAction::default(),
            query: query.into(),
            response: None,
            timestamp: None,
        }
    }

    pub fn response_fetched(&self) -> bool {
        self.response.is_some()
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum FrameLoadError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    DuplicateId(String),
}

impl fmt::Display for FrameLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameLoadError::Io(e) => write!(f, "frames I/O error: {e}"),
            FrameLoadError::Parse(e) => write!(f, "frames parse error: {e}"),
            FrameLoadError::DuplicateId(id) => write!(f, "duplicate frame id: {id}"),
        }
    }
}

impl std::error::Error for FrameLoadError {}

// ============================================================================
// Loading
// ============================================================================

pub fn parse_frames(json: &str) -> Result<Vec<QueryFrame>, FrameLoadError> {
    let frames: Vec<QueryFrame> = serde_json::from_str(json).map_err(FrameLoadError::Parse)?;
    let mut seen = HashSet::new();
    for frame in &frames {
        if !seen.insert(frame.id.as_str()) {
            return Err(FrameLoadError::DuplicateId(frame.id.clone()));
        }
    }
    Ok(frames)
}

pub fn load_frames(path: &Path) -> Result<Vec<QueryFrame>, FrameLoadError> {
    let contents = fs::read_to_string(path).map_err(FrameLoadError::Io)?;
    let frames = parse_frames(&contents)?;
    info!("Loaded {} frame(s) from {}", frames.len(), path.display());
    Ok(frames)
}

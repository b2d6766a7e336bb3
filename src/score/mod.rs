// Score module - reading hand-authored note lists

pub mod loader;
pub mod types;

pub use loader::{load_score, notes_from_json, notes_from_record};
pub use types::{NoteRecord, Section};

use std::path::PathBuf;

use crate::sequencer::SequenceError;

/// Score loading error types
#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    #[error("Score file must end in '.json': {}", .0.display())]
    InvalidExtension(PathBuf),

    #[error("Score data must be a list of note records, got {0}")]
    NotAList(String),

    #[error("Record {index} does not have the correct keys. It has: [{}], but it should have: [{expected}]", .found.join(", "))]
    MissingKeys {
        index: usize,
        found: Vec<String>,
        expected: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Note(#[from] SequenceError),
}

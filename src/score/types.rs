// Score file types - serde mirror of the JSON note list

use serde::{Deserialize, Serialize};

/// One sounded interval of a note, in beats
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub start: f64,
    pub end: f64,
}

/// A pitch and every interval during which it sounds
///
/// ```json
/// { "frequency": 82, "note": "E2", "sections": [{ "start": 0, "end": 1.5 }] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteRecord {
    pub frequency: f64,
    /// Display label, e.g. the pitch name
    pub note: String,
    pub sections: Vec<Section>,
}

impl NoteRecord {
    /// Keys every record must carry
    pub const REQUIRED_KEYS: [&'static str; 3] = ["frequency", "note", "sections"];
}

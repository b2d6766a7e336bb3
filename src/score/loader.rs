// Score loading - file on disk to validated notes

use serde_json::Value;
use std::path::Path;

use crate::score::ScoreError;
use crate::score::types::NoteRecord;
use crate::sequencer::note::Note;

/// Extension a score file must carry
pub const SCORE_EXTENSION: &str = ".json";

/// Read a `.json` score file and unwrap it into notes
pub fn load_score(path: &Path) -> Result<Vec<Note>, ScoreError> {
    if !path.to_string_lossy().ends_with(SCORE_EXTENSION) {
        return Err(ScoreError::InvalidExtension(path.to_path_buf()));
    }

    let data = std::fs::read_to_string(path)?;
    let json: Value = serde_json::from_str(&data)?;

    log::debug!("Loaded score file {}", path.display());

    notes_from_json(&json)
}

/// Name of a JSON value's type, for error messages
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

/// Validate the shape of a parsed score and unwrap it into one note per section
///
/// The whole list is checked for required keys before any note is built.
pub fn notes_from_json(json: &Value) -> Result<Vec<Note>, ScoreError> {
    let records = json
        .as_array()
        .ok_or_else(|| ScoreError::NotAList(json_type_name(json).to_string()))?;

    for (index, record) in records.iter().enumerate() {
        let found: Vec<String> = record
            .as_object()
            .map(|fields| fields.keys().cloned().collect())
            .unwrap_or_default();

        let complete = NoteRecord::REQUIRED_KEYS
            .iter()
            .all(|key| found.iter().any(|k| k == key));

        if !complete {
            return Err(ScoreError::MissingKeys {
                index,
                found,
                expected: NoteRecord::REQUIRED_KEYS.join(", "),
            });
        }
    }

    let mut notes = Vec::new();
    for record in records {
        let record: NoteRecord = serde_json::from_value(record.clone())?;
        notes.extend(notes_from_record(&record)?);
    }

    log::info!("Unwrapped {} records into {} notes", records.len(), notes.len());

    Ok(notes)
}

/// One note per section of a record
pub fn notes_from_record(record: &NoteRecord) -> Result<Vec<Note>, ScoreError> {
    record
        .sections
        .iter()
        .map(|section| {
            Note::new(record.frequency, record.note.as_str(), section.start, section.end)
                .map_err(ScoreError::from)
        })
        .collect()
}

// Range derivation - global time span and frequency extent of a note set

use std::fmt;

use crate::sequencer::SequenceError;
use crate::sequencer::note::Note;

/// Half-open time span `[start, end)` in beat units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeRange {
    pub start: f64,
    pub end: f64,
}

impl TimeRange {
    pub fn length(&self) -> f64 {
        self.end - self.start
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Lowest and highest frequency of a note set (diagnostic only)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyRange {
    pub min: f64,
    pub max: f64,
}

impl fmt::Display for FrequencyRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.min, self.max)
    }
}

/// Scan the notes once and return the global time range and frequency range
///
/// The four extrema are independent reductions: every note updates each of them.
pub fn derive_ranges(notes: &[Note]) -> Result<(TimeRange, FrequencyRange), SequenceError> {
    let mut start = f64::INFINITY;
    let mut end = f64::NEG_INFINITY;
    let mut min_freq = f64::INFINITY;
    let mut max_freq = f64::NEG_INFINITY;

    for note in notes {
        start = start.min(note.start());
        end = end.max(note.end());
        min_freq = min_freq.min(note.frequency());
        max_freq = max_freq.max(note.frequency());
    }

    if notes.is_empty() || !start.is_finite() || !end.is_finite() {
        return Err(SequenceError::EmptySequence);
    }

    Ok((
        TimeRange { start, end },
        FrequencyRange {
            min: min_freq,
            max: max_freq,
        },
    ))
}

// Note representation for the sequencer
// A note is a pitched event bounded by a start and an (exclusive) end, in beats

use crate::sequencer::SequenceError;

/// A timed pitch event
///
/// Times are expressed in beat units. The end is exclusive: the note is live up to,
/// but not including, the instant it is released.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    frequency: f64,
    label: String,
    start: f64,
    end: f64,
}

impl Note {
    /// Creates a new note, rejecting non-positive frequencies and empty intervals
    pub fn new(
        frequency: f64,
        label: impl Into<String>,
        start: f64,
        end: f64,
    ) -> Result<Self, SequenceError> {
        let label = label.into();

        let reason = if !frequency.is_finite() || !start.is_finite() || !end.is_finite() {
            Some(format!(
                "values must be finite (frequency {frequency}, start {start}, end {end})"
            ))
        } else if frequency <= 0.0 {
            Some(format!("frequency must be > 0, got {frequency}"))
        } else if start >= end {
            Some(format!("start ({start}) must be before end ({end})"))
        } else {
            None
        };

        if let Some(reason) = reason {
            return Err(SequenceError::InvalidNote { label, reason });
        }

        Ok(Self {
            frequency,
            label,
            start,
            end,
        })
    }

    /// Frequency in cycles per beat unit
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Display name (e.g. "E2"); opaque to synthesis
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Check if this note is live at time `t` (half-open interval)
    pub fn contains(&self, t: f64) -> bool {
        t >= self.start && t < self.end
    }

    /// Whether the frequency is a whole cycle count
    pub fn is_whole_frequency(&self) -> bool {
        self.frequency.fract() == 0.0
    }
}

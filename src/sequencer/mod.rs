// Sequencer module
// Notes, derived ranges, beat buckets and the sequence that ties them together

pub mod bucket;
pub mod note;
pub mod range;
pub mod sequence;
pub mod timeline;

pub use bucket::{Bucket, BucketMap, build_buckets};
pub use note::Note;
pub use range::{FrequencyRange, TimeRange, derive_ranges};
pub use sequence::{Sequence, SequenceState, SequenceSummary};
pub use timeline::{Tempo, TimeSignature};

use thiserror::Error;

/// Errors raised while building or synthesizing a sequence
#[derive(Debug, Error)]
pub enum SequenceError {
    #[error("Invalid note '{label}': {reason}")]
    InvalidNote { label: String, reason: String },

    #[error("Sequence contains no notes")]
    EmptySequence,

    #[error("Note '{label}' has non-integer frequency {frequency}")]
    NonIntegerFrequency { label: String, frequency: f64 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Sequence has not been synthesized yet")]
    NotSynthesized,
}

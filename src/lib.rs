// riffwave - Library exports for the CLI, tests and benchmarks

pub mod score;
pub mod sequencer;
pub mod synth;
pub mod ui;

// Re-export commonly used types for convenience
pub use score::{ScoreError, load_score, notes_from_json};
pub use sequencer::{
    Bucket, BucketMap, FrequencyRange, Note, Sequence, SequenceError, SequenceState,
    SequenceSummary, Tempo, TimeRange, TimeSignature, build_buckets, derive_ranges,
};
pub use synth::{SynthesisConfig, WaveformSynthesizer, sample_count, time_to_index};

// Synthesis module
// Resolution settings and the sine superposition engine

pub mod config;
pub mod waveform;

pub use config::SynthesisConfig;
pub use waveform::{WaveformSynthesizer, sample_count, time_to_index};

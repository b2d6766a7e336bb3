// Sequence - owns a note set and everything derived from it

use std::fmt;

use crate::sequencer::SequenceError;
use crate::sequencer::bucket::{BucketMap, build_buckets};
use crate::sequencer::note::Note;
use crate::sequencer::range::{FrequencyRange, TimeRange, derive_ranges};
use crate::synth::config::SynthesisConfig;
use crate::synth::waveform::{WaveformSynthesizer, sample_time};

/// Lifecycle of a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceState {
    /// Ranges and buckets computed, no samples yet
    Constructed,
    /// Sample array present
    Synthesized,
}

/// A set of notes with its derived ranges, bucket map and (once synthesized) waveform
#[derive(Debug, Clone)]
pub struct Sequence {
    notes: Vec<Note>,
    config: SynthesisConfig,
    time_range: TimeRange,
    frequency_range: FrequencyRange,
    buckets: BucketMap,
    samples: Option<Vec<f64>>,
    /// Start of every empty bucket warned about by the last `synthesize()` call
    reported_empty_beats: Vec<f64>,
}

impl Sequence {
    /// Build a sequence with the default resolution
    pub fn new(notes: Vec<Note>) -> Result<Self, SequenceError> {
        Self::with_config(notes, SynthesisConfig::default())
    }

    /// Build a sequence with a custom bucket/sample resolution
    pub fn with_config(notes: Vec<Note>, config: SynthesisConfig) -> Result<Self, SequenceError> {
        config.validate()?;
        let (time_range, frequency_range) = derive_ranges(&notes)?;
        let buckets = build_buckets(&notes, &time_range, config.bucket_step)?;

        log::info!(
            "Sequence of {} notes over {} beats {} ({} Hz)",
            notes.len(),
            time_range.length(),
            time_range,
            frequency_range
        );

        Ok(Self {
            notes,
            config,
            time_range,
            frequency_range,
            buckets,
            samples: None,
            reported_empty_beats: Vec::new(),
        })
    }

    /// Compute the combined waveform
    ///
    /// Empty buckets are reported as warnings and do not stop synthesis. Calling this
    /// again recomputes the same array from the same notes.
    pub fn synthesize(&mut self) -> Result<&[f64], SequenceError> {
        self.reported_empty_beats.clear();
        for bucket in self.buckets.empty_buckets() {
            log::warn!("Beat {} of the sequence has no notes attached to it", bucket.start);
            self.reported_empty_beats.push(bucket.start);
        }

        let samples =
            WaveformSynthesizer::new(self.config)?.synthesize(&self.notes, &self.time_range)?;

        log::info!("Synthesized {} samples", samples.len());

        Ok(self.samples.insert(samples).as_slice())
    }

    pub fn state(&self) -> SequenceState {
        if self.samples.is_some() {
            SequenceState::Synthesized
        } else {
            SequenceState::Constructed
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    pub fn time_range(&self) -> TimeRange {
        self.time_range
    }

    pub fn frequency_range(&self) -> FrequencyRange {
        self.frequency_range
    }

    pub fn buckets(&self) -> &BucketMap {
        &self.buckets
    }

    /// Empty buckets reported by the last `synthesize()` call, by start beat
    pub fn reported_empty_beats(&self) -> &[f64] {
        &self.reported_empty_beats
    }

    /// The waveform, once synthesized
    pub fn samples(&self) -> Option<&[f64]> {
        self.samples.as_deref()
    }

    /// Absolute time (in beats) of every sample, once synthesized
    pub fn sample_times(&self) -> Option<Vec<f64>> {
        let samples = self.samples.as_ref()?;
        Some(
            (0..samples.len())
                .map(|i| sample_time(i, self.time_range.start, self.config.sample_step))
                .collect(),
        )
    }

    pub fn summary(&self) -> SequenceSummary {
        SequenceSummary {
            note_count: self.notes.len(),
            time_range: self.time_range,
            frequency_range: self.frequency_range,
            bucket_count: self.buckets.len(),
            empty_bucket_count: self.buckets.empty_buckets().count(),
            sample_count: self.samples.as_ref().map(Vec::len),
            peak_amplitude: self
                .samples
                .as_ref()
                .map(|s| s.iter().fold(0.0_f64, |peak, v| peak.max(v.abs()))),
        }
    }
}

/// Human-readable overview of a sequence
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceSummary {
    pub note_count: usize,
    pub time_range: TimeRange,
    pub frequency_range: FrequencyRange,
    pub bucket_count: usize,
    pub empty_bucket_count: usize,
    pub sample_count: Option<usize>,
    pub peak_amplitude: Option<f64>,
}

impl fmt::Display for SequenceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Notes:       {}", self.note_count)?;
        writeln!(f, "Time range:  {} beats", self.time_range)?;
        writeln!(f, "Frequencies: {}", self.frequency_range)?;
        writeln!(
            f,
            "Buckets:     {} ({} empty)",
            self.bucket_count, self.empty_bucket_count
        )?;
        match (self.sample_count, self.peak_amplitude) {
            (Some(count), Some(peak)) => write!(f, "Samples:     {} (peak {:.3})", count, peak),
            _ => write!(f, "Samples:     not synthesized"),
        }
    }
}

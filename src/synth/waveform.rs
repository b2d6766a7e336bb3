// Waveform synthesis - superposition of per-note sine segments
//
// Every sample array is indexed through `time_to_index`, both when sizing the output
// and when placing a note's contribution, so the two can never disagree. Sample `i`
// sits at `origin + i * step` and belongs to `[start, end)` iff `start <= t < end`.

use std::ops::Range;

use crate::sequencer::SequenceError;
use crate::sequencer::note::Note;
use crate::sequencer::range::TimeRange;
use crate::synth::config::{BOUNDARY_EPSILON, SynthesisConfig, grid_len};

/// Number of samples in `range`: the grid points `range.start + i * sample_step` before `range.end`
pub fn sample_count(range: &TimeRange, sample_step: f64) -> Result<usize, SequenceError> {
    grid_len(range.length(), sample_step)
}

/// Index of the first sample at or after `t`, clamped to `[0, len]`
///
/// Used for both ends of a half-open span, so `[a, b)` maps to `time_to_index(a)..time_to_index(b)`.
#[inline]
pub fn time_to_index(t: f64, origin: f64, sample_step: f64, len: usize) -> usize {
    let index = ((t - origin) / sample_step - BOUNDARY_EPSILON).ceil();
    if index <= 0.0 {
        0
    } else {
        (index as usize).min(len)
    }
}

/// Absolute time of sample `index`
#[inline]
pub fn sample_time(index: usize, origin: f64, sample_step: f64) -> f64 {
    origin + index as f64 * sample_step
}

/// `sin(frequency * t)`, frequency in cycles per beat unit
#[inline]
pub fn sine_wave(frequency: f64, t: f64) -> f64 {
    (frequency * t).sin()
}

/// In-place mix: `dst[i] += src[i]`
#[inline]
pub fn mix_in_place(dst: &mut [f64], src: &[f64]) {
    for (d, s) in dst.iter_mut().zip(src.iter()) {
        *d += *s;
    }
}

/// Split a note's `[start, end)` span into consecutive segments at most `bucket_step` wide
///
/// `bucket_step` must already have passed `SynthesisConfig::validate`.
fn note_segments(note: &Note, bucket_step: f64) -> impl Iterator<Item = (f64, f64)> + '_ {
    let count = (note.duration() / bucket_step - BOUNDARY_EPSILON)
        .ceil()
        .max(1.0) as usize;

    (0..count).map(move |k| {
        let start = note.start() + k as f64 * bucket_step;
        (start, (start + bucket_step).min(note.end()))
    })
}

/// Generates the combined waveform of a note set
#[derive(Debug, Clone, Copy)]
pub struct WaveformSynthesizer {
    config: SynthesisConfig,
}

impl WaveformSynthesizer {
    pub fn new(config: SynthesisConfig) -> Result<Self, SequenceError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    /// Render one segment: the sine values at the absolute time of each sample in `indices`
    fn render_segment(&self, frequency: f64, indices: Range<usize>, origin: f64) -> Vec<f64> {
        indices
            .map(|i| sine_wave(frequency, sample_time(i, origin, self.config.sample_step)))
            .collect()
    }

    /// Sum every note's sine contribution over `range`
    ///
    /// Overlapping notes add up; the result is neither normalized nor clipped.
    /// Fails if any note has a non-integer frequency.
    pub fn synthesize(&self, notes: &[Note], range: &TimeRange) -> Result<Vec<f64>, SequenceError> {
        if let Some(note) = notes.iter().find(|note| !note.is_whole_frequency()) {
            return Err(SequenceError::NonIntegerFrequency {
                label: note.label().to_string(),
                frequency: note.frequency(),
            });
        }

        let step = self.config.sample_step;
        let len = sample_count(range, step)?;
        let mut output = vec![0.0; len];

        for note in notes {
            for (segment_start, segment_end) in note_segments(note, self.config.bucket_step) {
                let from = time_to_index(segment_start, range.start, step, len);
                let to = time_to_index(segment_end, range.start, step, len);
                if from >= to {
                    continue;
                }

                let segment = self.render_segment(note.frequency(), from..to, range.start);
                mix_in_place(&mut output[from..to], &segment);
            }
        }

        log::debug!("Synthesized {} notes into {} samples", notes.len(), len);

        Ok(output)
    }
}

impl Default for WaveformSynthesizer {
    fn default() -> Self {
        Self {
            config: SynthesisConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn note(freq: f64, start: f64, end: f64) -> Note {
        Note::new(freq, "n", start, end).unwrap()
    }

    #[test]
    fn test_time_to_index() {
        assert_eq!(time_to_index(0.0, 0.0, 0.001, 1000), 0);
        assert_eq!(time_to_index(0.5, 0.0, 0.001, 1000), 500);
        assert_eq!(time_to_index(1.0, 0.0, 0.001, 1000), 1000);
        // Clamped on both sides
        assert_eq!(time_to_index(-1.0, 0.0, 0.001, 1000), 0);
        assert_eq!(time_to_index(5.0, 0.0, 0.001, 1000), 1000);
        // Non-zero origin
        assert_eq!(time_to_index(2.25, 2.0, 0.001, 1000), 250);
        // Between two samples: the next one, never the one before
        assert_eq!(time_to_index(0.2004, 0.0, 0.001, 1000), 201);
        assert_eq!(time_to_index(0.2, 0.0, 0.001, 1000), 200);
    }

    #[test]
    fn test_sample_count() {
        let range = TimeRange { start: 0.0, end: 1.0 };
        assert_eq!(sample_count(&range, 0.001).unwrap(), 1000);

        let range = TimeRange { start: 1.5, end: 4.0 };
        assert_eq!(sample_count(&range, 0.001).unwrap(), 2500);

        // Last partial step still gets a sample
        let range = TimeRange { start: 0.0, end: 1.0005 };
        assert_eq!(sample_count(&range, 0.001).unwrap(), 1001);
    }

    #[test]
    fn test_sample_count_rejects_unusable_steps() {
        let range = TimeRange { start: 0.0, end: 1.0 };
        for step in [0.0, -0.0, 1e-320, f64::NAN] {
            assert!(
                matches!(sample_count(&range, step), Err(SequenceError::InvalidConfig(_))),
                "step {step} accepted"
            );
        }
    }

    #[test]
    fn test_new_validates_config() {
        let zero_samples = SynthesisConfig {
            bucket_step: 0.5,
            sample_step: 0.0,
        };
        assert!(matches!(
            WaveformSynthesizer::new(zero_samples),
            Err(SequenceError::InvalidConfig(_))
        ));

        let zero_buckets = SynthesisConfig {
            bucket_step: 0.0,
            sample_step: 0.0,
        };
        assert!(WaveformSynthesizer::new(zero_buckets).is_err());
        assert!(WaveformSynthesizer::new(SynthesisConfig::default()).is_ok());
    }

    #[test]
    fn test_unaligned_start_skips_earlier_sample() {
        // Sample 200 (t = 0.2) lies before the 4 Hz note starting at 0.2004
        let notes = [note(4.0, 0.2004, 1.0), note(1.0, 0.0, 1.0)];
        let range = TimeRange { start: 0.0, end: 1.0 };
        let output = WaveformSynthesizer::default().synthesize(&notes, &range).unwrap();

        assert_eq!(output.len(), 1000);
        assert!((output[200] - 0.2_f64.sin()).abs() < EPSILON);

        let t: f64 = 0.201;
        assert!((output[201] - ((4.0 * t).sin() + t.sin())).abs() < EPSILON);
    }

    #[test]
    fn test_note_segments_cover_whole_span() {
        let n = note(1.0, 1.0, 2.25);
        let segments: Vec<_> = note_segments(&n, 0.5).collect();

        assert_eq!(segments, vec![(1.0, 1.5), (1.5, 2.0), (2.0, 2.25)]);
    }

    #[test]
    fn test_superposition() {
        let notes = [note(2.0, 0.0, 0.5), note(3.0, 0.0, 0.5)];
        let range = TimeRange { start: 0.0, end: 0.5 };
        let output = WaveformSynthesizer::default().synthesize(&notes, &range).unwrap();

        assert_eq!(output.len(), 500);
        for (i, value) in output.iter().enumerate() {
            let t = i as f64 * 0.001;
            let expected = (2.0 * t).sin() + (3.0 * t).sin();
            assert!((value - expected).abs() < EPSILON, "t={} got {}", t, value);
        }
    }

    #[test]
    fn test_full_span_is_synthesized() {
        // A note longer than one bucket keeps sounding past its first segment
        let notes = [note(4.0, 0.0, 2.0)];
        let range = TimeRange { start: 0.0, end: 2.0 };
        let output = WaveformSynthesizer::default().synthesize(&notes, &range).unwrap();

        assert_eq!(output.len(), 2000);
        let t: f64 = 1.7;
        assert!((output[1700] - (4.0 * t).sin()).abs() < EPSILON);
    }

    #[test]
    fn test_silence_outside_notes() {
        let notes = [note(3.0, 0.0, 0.5), note(5.0, 1.5, 2.0)];
        let range = TimeRange { start: 0.0, end: 2.0 };
        let output = WaveformSynthesizer::default().synthesize(&notes, &range).unwrap();

        assert!(output[500..1500].iter().all(|&v| v == 0.0));
        assert!(output[1500..].iter().any(|&v| v != 0.0));
    }

    #[test]
    fn test_non_integer_frequency() {
        let notes = [note(4.0, 0.0, 1.0), note(4.5, 0.0, 1.0)];
        let range = TimeRange { start: 0.0, end: 1.0 };
        let err = WaveformSynthesizer::default()
            .synthesize(&notes, &range)
            .unwrap_err();

        match err {
            SequenceError::NonIntegerFrequency { frequency, .. } => assert_eq!(frequency, 4.5),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_mix_in_place() {
        let mut dst = [1.0, 2.0, 3.0];
        mix_in_place(&mut dst, &[0.5, 0.5, 0.5]);
        assert_eq!(dst, [1.5, 2.5, 3.5]);
    }
}

//! Behavioural properties of range derivation, bucketing and synthesis
//!
//! These exercise the public API end to end, the way the CLI drives it.

use riffwave::{
    Note, Sequence, SequenceError, SequenceState, SynthesisConfig, TimeRange, build_buckets,
    derive_ranges, sample_count, time_to_index,
};

const EPSILON: f64 = 1e-9;

fn note(freq: f64, start: f64, end: f64) -> Note {
    Note::new(freq, format!("{freq}"), start, end).unwrap()
}

/// Ranges are exact extrema for arbitrary orderings
#[test]
fn test_ranges_are_exact_extrema() {
    let notes = vec![
        note(5.0, 3.0, 4.0),
        note(9.0, -1.5, 0.0),
        note(2.0, 0.25, 7.75),
        note(11.0, 2.0, 2.5),
    ];

    let (time, freq) = derive_ranges(&notes).unwrap();
    assert_eq!(time.start, -1.5);
    assert_eq!(time.end, 7.75);
    assert!(time.start.is_finite() && time.end.is_finite());
    assert_eq!(freq.min, 2.0);
    assert_eq!(freq.max, 11.0);
}

#[test]
fn test_empty_input_fails() {
    assert!(matches!(derive_ranges(&[]), Err(SequenceError::EmptySequence)));
    assert!(matches!(Sequence::new(Vec::new()), Err(SequenceError::EmptySequence)));
}

#[test]
fn test_single_note_buckets() {
    let notes = [note(4.0, 0.0, 1.0)];
    let map = build_buckets(&notes, &TimeRange { start: 0.0, end: 1.0 }, 0.5).unwrap();

    let keys: Vec<f64> = map.keys().collect();
    assert_eq!(keys, vec![0.0, 0.5]);
    for bucket in map.iter() {
        assert_eq!(bucket.frequencies(), &[4.0]);
    }
    assert!(map.get(1.0).is_none());
}

/// A note ending on a bucket boundary does not leak into that bucket
#[test]
fn test_exclusive_end_on_boundary() {
    let sequence = Sequence::new(vec![note(2.0, 0.0, 1.5), note(3.0, 1.0, 2.0)]).unwrap();
    let buckets = sequence.buckets();

    assert!(buckets.get(1.0).unwrap().contains(2.0));
    assert!(!buckets.get(1.5).unwrap().contains(2.0));
    assert!(buckets.get(1.5).unwrap().contains(3.0));
}

#[test]
fn test_overlapping_notes_superpose() {
    let mut sequence = Sequence::new(vec![note(2.0, 0.0, 0.5), note(3.0, 0.0, 0.5)]).unwrap();
    let samples = sequence.synthesize().unwrap().to_vec();
    let times = sequence.sample_times().unwrap();

    for (t, value) in times.iter().zip(samples.iter()) {
        let expected = (2.0 * t).sin() + (3.0 * t).sin();
        assert!((value - expected).abs() < EPSILON, "t={t}");
    }
}

/// Only the overlapping part of two notes sums; elsewhere one note sounds alone
#[test]
fn test_partial_overlap() {
    let mut sequence = Sequence::new(vec![note(2.0, 0.0, 1.0), note(5.0, 0.5, 1.5)]).unwrap();
    let samples = sequence.synthesize().unwrap().to_vec();

    let at = |t: f64| samples[time_to_index(t, 0.0, 0.001, samples.len())];
    assert!((at(0.25) - (2.0_f64 * 0.25).sin()).abs() < 1e-6);
    assert!((at(0.75) - ((2.0_f64 * 0.75).sin() + (5.0_f64 * 0.75).sin())).abs() < 1e-6);
    assert!((at(1.25) - (5.0_f64 * 1.25).sin()).abs() < 1e-6);
}

#[test]
fn test_synthesize_twice_is_identical() {
    let notes = vec![note(4.0, 0.0, 1.0), note(6.0, 0.5, 2.5), note(1.0, 2.0, 3.0)];
    let mut sequence = Sequence::new(notes.clone()).unwrap();

    let first = sequence.synthesize().unwrap().to_vec();
    let second = sequence.synthesize().unwrap().to_vec();

    assert_eq!(first, second);
    assert_eq!(sequence.notes(), notes.as_slice());
    assert_eq!(sequence.state(), SequenceState::Synthesized);
}

#[test]
fn test_non_integer_frequency_rejected() {
    let mut sequence = Sequence::new(vec![note(4.5, 0.0, 1.0)]).unwrap();
    assert!(matches!(
        sequence.synthesize(),
        Err(SequenceError::NonIntegerFrequency { frequency, .. }) if frequency == 4.5
    ));
}

/// Empty buckets are a diagnostic, never an error
#[test]
fn test_gap_between_notes_still_synthesizes() {
    let mut sequence = Sequence::new(vec![note(3.0, 0.0, 0.5), note(3.0, 2.0, 2.5)]).unwrap();
    assert_eq!(sequence.buckets().empty_buckets().count(), 3);

    let samples = sequence.synthesize().unwrap();
    assert_eq!(samples.len(), 2500);
    assert!(samples[500..2000].iter().all(|&v| v == 0.0));
    assert_eq!(sequence.reported_empty_beats(), &[0.5, 1.0, 1.5]);
}

#[test]
fn test_degenerate_steps_are_config_errors() {
    for step in [0.0, -0.0, 1e-320] {
        let config = SynthesisConfig {
            bucket_step: step,
            sample_step: step,
        };
        assert!(matches!(
            Sequence::with_config(vec![note(4.0, 0.0, 1.0)], config),
            Err(SequenceError::InvalidConfig(_))
        ));
    }
}

#[test]
fn test_custom_resolution() {
    let config = SynthesisConfig::new(0.25, 0.01).unwrap();
    let mut sequence = Sequence::with_config(vec![note(4.0, 1.0, 2.0)], config).unwrap();

    assert_eq!(sequence.buckets().len(), 4);
    let samples = sequence.synthesize().unwrap();
    assert_eq!(samples.len(), 100);
    assert_eq!(
        samples.len(),
        sample_count(&TimeRange { start: 1.0, end: 2.0 }, 0.01).unwrap()
    );
}

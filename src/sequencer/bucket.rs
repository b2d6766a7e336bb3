// Beat bucketing - coarse sub-beat view of which frequencies are live when
//
// Bucket keys are always `origin + index * step`, computed from the common base,
// so a note's buckets line up exactly with the global ones.

use crate::sequencer::SequenceError;
use crate::sequencer::note::Note;
use crate::sequencer::range::TimeRange;
use crate::synth::config::{BOUNDARY_EPSILON, check_step, grid_len};

/// One sub-beat slice and the frequencies live inside it
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    /// Bucket start time in beats
    pub start: f64,
    frequencies: Vec<f64>,
}

impl Bucket {
    fn new(start: f64) -> Self {
        Self {
            start,
            frequencies: Vec::new(),
        }
    }

    /// Frequencies in first-insertion order, without duplicates
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    pub fn contains(&self, frequency: f64) -> bool {
        self.frequencies.contains(&frequency)
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    fn insert(&mut self, frequency: f64) {
        if !self.contains(frequency) {
            self.frequencies.push(frequency);
        }
    }
}

/// Ordered mapping from bucket start time to the set of live frequencies
#[derive(Debug, Clone, PartialEq)]
pub struct BucketMap {
    origin: f64,
    step: f64,
    buckets: Vec<Bucket>,
}

impl BucketMap {
    /// Bucket width in beats
    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Buckets in ascending time order
    pub fn iter(&self) -> impl Iterator<Item = &Bucket> {
        self.buckets.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = f64> + '_ {
        self.buckets.iter().map(|bucket| bucket.start)
    }

    /// Index of the bucket whose key is `key` (within floating-point tolerance)
    pub fn index_of(&self, key: f64) -> Option<usize> {
        let position = (key - self.origin) / self.step;
        let index = position.round();
        if index < 0.0 || (position - index).abs() > BOUNDARY_EPSILON {
            return None;
        }
        let index = index as usize;
        (index < self.buckets.len()).then_some(index)
    }

    /// Look up a bucket by its start time
    pub fn get(&self, key: f64) -> Option<&Bucket> {
        self.index_of(key).map(|index| &self.buckets[index])
    }

    /// Buckets no note overlaps
    pub fn empty_buckets(&self) -> impl Iterator<Item = &Bucket> {
        self.buckets.iter().filter(|bucket| bucket.is_empty())
    }

    /// Range of bucket indices overlapped by `[start, end)`
    fn overlapping(&self, start: f64, end: f64) -> std::ops::Range<usize> {
        let count = self.buckets.len() as f64;
        let first = ((start - self.origin) / self.step + BOUNDARY_EPSILON)
            .floor()
            .clamp(0.0, count);
        let last = ((end - self.origin) / self.step - BOUNDARY_EPSILON)
            .ceil()
            .clamp(0.0, count);
        (first as usize)..(last as usize).max(first as usize)
    }
}

/// Number of `step`-wide buckets needed to cover `range`
pub fn bucket_count(range: &TimeRange, step: f64) -> Result<usize, SequenceError> {
    grid_len(range.length(), step)
}

/// Partition `range` into buckets of width `step` and record which notes overlap each
///
/// Every bucket in `[range.start, range.end)` is present even if empty. A note's end is
/// exclusive, so the bucket starting exactly at `note.end()` never receives it.
/// Fails with `InvalidConfig` when `step` is not a usable bucket width.
pub fn build_buckets(
    notes: &[Note],
    range: &TimeRange,
    step: f64,
) -> Result<BucketMap, SequenceError> {
    check_step("bucket_step", step)?;

    let buckets = (0..bucket_count(range, step)?)
        .map(|index| Bucket::new(range.start + index as f64 * step))
        .collect();

    let mut map = BucketMap {
        origin: range.start,
        step,
        buckets,
    };

    for note in notes {
        for index in map.overlapping(note.start(), note.end()) {
            map.buckets[index].insert(note.frequency());
        }
    }

    log::debug!(
        "Built {} buckets of {} beats over {}",
        map.len(),
        step,
        range
    );

    Ok(map)
}

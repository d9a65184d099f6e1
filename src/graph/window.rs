//! src/graph/window.rs
//!
//! Fixed-capacity sliding window of samples for one series.
//!
//! The window is pre-filled with its first sample so that it always holds
//! exactly `capacity` logical slots once created. Pushing evicts the oldest
//! slot. At end of stream the prefill prefix can be dropped with `compact`.

use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct SampleWindow {
    /// samples in arrival order (oldest at front)
    samples: VecDeque<f64>,

    /// number of slots kept while streaming
    capacity: usize,
}

impl SampleWindow {
    /// Create a window of `capacity` slots, every slot holding `first`.
    pub fn prefilled(capacity: usize, first: f64) -> Self {
        let samples: VecDeque<f64> = std::iter::repeat_n(first, capacity).collect();
        Self { samples, capacity }
    }

    /// Push a sample, dropping the oldest one.
    ///
    /// Maintains invariant: samples.len() == capacity (until compacted).
    pub fn push(&mut self, sample: f64) {
        if self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    /// Most recent sample.
    pub fn last(&self) -> Option<f64> {
        self.samples.back().copied()
    }

    /// Keep only the trailing `keep` samples. No-op if `keep >= capacity`.
    pub fn compact(&mut self, keep: usize) {
        if keep >= self.capacity {
            return;
        }
        let excess = self.samples.len().saturating_sub(keep);
        self.samples.drain(..excess);
    }

    /// (min, max) over the window. `None` when empty.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        let mut mn = f64::INFINITY;
        let mut mx = f64::NEG_INFINITY;
        for &y in &self.samples {
            if y < mn {
                mn = y;
            }
            if y > mx {
                mx = y;
            }
        }
        if self.samples.is_empty() {
            None
        } else {
            Some((mn, mx))
        }
    }

    /// Owned copy of the window, oldest first, for handing to a renderer.
    pub fn snapshot(&self) -> Vec<f64> {
        self.samples.iter().copied().collect()
    }
}

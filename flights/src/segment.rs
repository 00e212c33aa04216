//! Cut one aircraft's records into flights.
//!
//! Records are sorted by time (stable, so simultaneous records keep their arrival order) then a
//! new flight starts every time two consecutive records are more than `threshold` apart.  Runs
//! are produced lazily and never empty; put back together they give the sorted input.
//!

use std::iter::{FusedIterator, Peekable};
use std::vec;

use chrono::Duration;

use tarmac_formats::PositionRecord;

#[derive(Clone, Copy, Debug)]
pub struct Segmenter {
    threshold: Duration,
}

impl Segmenter {
    pub fn new(threshold: Duration) -> Self {
        Segmenter { threshold }
    }

    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    /// Sort `records` and return the iterator over its runs.
    ///
    pub fn split(&self, mut records: Vec<PositionRecord>) -> Runs {
        records.sort_by_key(|r| r.timestamp);
        Runs {
            threshold: self.threshold,
            inner: records.into_iter().peekable(),
        }
    }
}

/// Lazy sequence of runs from [`Segmenter::split`].
///
#[derive(Debug)]
pub struct Runs {
    threshold: Duration,
    inner: Peekable<vec::IntoIter<PositionRecord>>,
}

impl Iterator for Runs {
    type Item = Vec<PositionRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let threshold = self.threshold;

        let first = self.inner.next()?;
        let mut last = first.timestamp;
        let mut run = vec![first];

        while let Some(r) = self.inner.next_if(|r| r.timestamp - last <= threshold) {
            last = r.timestamp;
            run.push(r);
        }
        Some(run)
    }
}

impl FusedIterator for Runs {}

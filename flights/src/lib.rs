//! The flight engine.
//!
//! Raw ADS-B records are grouped per aircraft, each group is cut into flights wherever the
//! aircraft has not been heard for longer than a threshold, and each flight is then classified
//! as a landing or a takeoff from its altitude and vertical rate.
//!
//! ```text
//! RecordStore -> Grouper -> Segmenter -> FlightEpisode -> Classifier -> Projector / Exporter
//! ```
//!
//! Everything is synchronous and in-memory, a [`FlightCollection`] can be traversed as many times
//! as needed.
//!

use chrono::Duration;

pub use classify::*;
pub use collection::*;
pub use episode::*;
pub use error::*;
pub use export::*;
pub use group::*;
pub use project::*;
pub use segment::*;
pub use stats::*;

mod classify;
mod collection;
mod episode;
mod error;
mod export;
mod group;
mod project;
mod segment;
mod stats;

/// Reference gap between two flights of the same aircraft, in seconds.
///
pub const DEFAULT_GAP_THRESHOLD: i64 = 20_000;

/// Everything the engine needs to know besides the records.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineConfig {
    /// Maximum silence inside one flight, in seconds
    pub gap_threshold: i64,
    /// Landing/takeoff heuristics
    pub classifier: Classifier,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            gap_threshold: DEFAULT_GAP_THRESHOLD,
            classifier: Classifier::default(),
        }
    }
}

impl EngineConfig {
    /// The threshold as a `Duration`, `None` if not positive or too large to be represented.
    ///
    pub fn try_gap(&self) -> Option<Duration> {
        Duration::try_seconds(self.gap_threshold).filter(|gap| *gap > Duration::zero())
    }

    /// Unchecked callers get the largest gap possible, meaning one flight per group.
    ///
    pub fn gap(&self) -> Duration {
        self.try_gap().unwrap_or_else(Duration::max_value)
    }

    pub fn segmenter(&self) -> Segmenter {
        Segmenter::new(self.gap())
    }
}

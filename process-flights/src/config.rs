//! Configuration file for `process-flights`.
//!
//! ```hcl
//! version = 1
//!
//! data {
//!   search = ["adsb25/orly.jsonl.gz", "../TP_FINAL/adsb25/orly.jsonl.gz"]
//! }
//!
//! segmentation {
//!   gap = 20000
//! }
//!
//! landing {
//!   altitude     = 100
//!   descent_rate = -1500
//! }
//!
//! takeoff {
//!   altitude   = 100
//!   climb_rate = 3000
//! }
//!
//! region {
//!   center_x   = 650000
//!   center_y   = 6860000
//!   half_width = 100000
//! }
//! ```
//!
//! Every block is optional, missing values take the defaults shown above.
//!
//! Version History:
//!
//! - v1 is the initial version
//!

use serde::Deserialize;

use tarmac_common::Versioned;
use tarmac_flights::{
    Classifier, EngineConfig, LandingThresholds, TakeoffThresholds, Window, DEFAULT_GAP_THRESHOLD,
};
use tarmac_formats::DEFAULT_SEARCH;

/// Config filename
pub const CONFIG: &str = "process-flights.hcl";

/// Current version
pub const CVERSION: usize = 1;

/// Configuration for the CLI tool
///
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FlightsConfig {
    pub version: usize,
    pub data: DataConfig,
    pub segmentation: SegmentationConfig,
    pub landing: LandingThresholds,
    pub takeoff: TakeoffThresholds,
    pub region: Window,
}

impl Default for FlightsConfig {
    fn default() -> Self {
        FlightsConfig {
            version: CVERSION,
            data: DataConfig::default(),
            segmentation: SegmentationConfig::default(),
            landing: LandingThresholds::default(),
            takeoff: TakeoffThresholds::default(),
            region: Window::default(),
        }
    }
}

impl Versioned for FlightsConfig {
    fn version(&self) -> usize {
        self.version
    }
}

impl FlightsConfig {
    /// Engine parameters, `gap` overrides the configured one.
    ///
    pub fn engine(&self, gap: Option<i64>) -> EngineConfig {
        EngineConfig {
            gap_threshold: gap.unwrap_or(self.segmentation.gap),
            classifier: Classifier::new(self.landing, self.takeoff),
        }
    }
}

/// Where to look for the data file.
///
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub search: Vec<String>,
}

impl Default for DataConfig {
    fn default() -> Self {
        DataConfig {
            search: DEFAULT_SEARCH.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SegmentationConfig {
    /// Seconds
    pub gap: i64,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        SegmentationConfig {
            gap: DEFAULT_GAP_THRESHOLD,
        }
    }
}

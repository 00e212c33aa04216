//! One flight: a time-ordered run of records from one aircraft.
//!
//! All summaries are computed from the records, the episode itself never changes once built.  The
//! trajectory is computed on first use and kept.
//!

use std::sync::OnceLock;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use tarmac_formats::PositionRecord;

use crate::{FlightError, LandingThresholds, TakeoffThresholds};

/// A record with a full 3D position.
///
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TrajectoryPoint {
    pub timestamp: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub vertical_rate: Option<f64>,
    pub ground_speed: Option<f64>,
}

impl TrajectoryPoint {
    fn from_record(r: &PositionRecord) -> Option<Self> {
        Some(TrajectoryPoint {
            timestamp: r.timestamp,
            latitude: r.latitude?,
            longitude: r.longitude?,
            altitude: r.altitude?,
            vertical_rate: r.vertical_rate,
            ground_speed: r.ground_speed,
        })
    }
}

#[derive(Clone, Debug)]
pub struct FlightEpisode {
    records: Vec<PositionRecord>,
    trajectory: OnceLock<Vec<TrajectoryPoint>>,
}

impl FlightEpisode {
    /// Build an episode, records are (stable) sorted by time.
    ///
    pub fn new(mut records: Vec<PositionRecord>) -> Result<Self, FlightError> {
        if records.is_empty() {
            return Err(FlightError::EmptyEpisode);
        }
        records.sort_by_key(|r| r.timestamp);
        Ok(FlightEpisode {
            records,
            trajectory: OnceLock::new(),
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[PositionRecord] {
        &self.records
    }

    pub fn icao24(&self) -> &str {
        &self.records[0].icao24
    }

    /// First callsign seen during the flight.
    ///
    pub fn callsign(&self) -> Option<&str> {
        self.records.iter().find_map(|r| r.callsign.as_deref())
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.records[0].timestamp
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.records[self.records.len() - 1].timestamp
    }

    pub fn time_range(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        (self.start(), self.end())
    }

    pub fn duration(&self) -> Duration {
        self.end() - self.start()
    }

    /// Identifier used by exports, `icao24_callsign_YYYYmmdd_HHMMSS`.
    ///
    pub fn flight_id(&self) -> String {
        format!(
            "{}_{}_{}",
            self.icao24(),
            self.callsign().unwrap_or_default(),
            self.start().format("%Y%m%d_%H%M%S")
        )
    }

    /// Lowest and highest altitude, ignoring records without one.
    ///
    pub fn altitude_range(&self) -> Option<(f64, f64)> {
        min_max(self.records.iter().filter_map(|r| r.altitude))
    }

    /// Lowest and highest vertical rate, ignoring records without one.
    ///
    pub fn vertical_rate_range(&self) -> Option<(f64, f64)> {
        min_max(self.records.iter().filter_map(|r| r.vertical_rate))
    }

    /// Points with latitude, longitude and altitude, in time order.  May be empty.
    ///
    pub fn trajectory(&self) -> &[TrajectoryPoint] {
        self.trajectory.get_or_init(|| {
            self.records
                .iter()
                .filter_map(TrajectoryPoint::from_record)
                .collect()
        })
    }

    /// A single point is not a trajectory.
    ///
    pub fn has_valid_trajectory(&self) -> bool {
        self.trajectory().len() > 1
    }

    pub fn is_landing(&self, thresholds: &LandingThresholds) -> bool {
        thresholds.matches(self)
    }

    pub fn is_takeoff(&self, thresholds: &TakeoffThresholds) -> bool {
        thresholds.matches(self)
    }
}

fn min_max(mut it: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let first = it.next()?;
    Some(it.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
}

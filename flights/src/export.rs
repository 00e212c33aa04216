//! Export boundary.
//!
//! Flights are handed to a [`FlightSink`] one by one: first the trajectory, then a
//! [`FlightSummary`].  Only flights with a usable trajectory are exported, and a sink failing on
//! one flight does not stop the others.  [`CsvSink`] is the sink shipped with the engine, anything
//! else (databases, dashboards) implements the trait outside.
//!

use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::Write;
use std::ops::Add;
use std::path::Path;
use std::thread::sleep;
use std::time::Duration;

use chrono::{DateTime, Utc};
use csv::Writer;
use serde::Serialize;
use tracing::{debug, info, trace, warn};

use crate::{Classifier, FlightEpisode, FlightError, TrajectoryPoint};

/// Name of the trajectory file in the output directory.
pub const TRAJECTORY_FILE: &str = "trajectories.csv";
/// Name of the summary file in the output directory.
pub const SUMMARY_FILE: &str = "summaries.csv";

/// Metadata describing one exported flight.
///
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FlightSummary {
    pub flight_id: String,
    pub icao24: String,
    pub callsign: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_minutes: f64,
    /// Number of trajectory points, not records
    pub total_points: usize,
    pub altitude_min: Option<f64>,
    pub altitude_max: Option<f64>,
    pub vertical_rate_min: Option<f64>,
    pub vertical_rate_max: Option<f64>,
    pub is_landing: bool,
    pub is_takeoff: bool,
    pub start_lat: Option<f64>,
    pub start_lon: Option<f64>,
    pub end_lat: Option<f64>,
    pub end_lon: Option<f64>,
}

impl FlightSummary {
    pub fn new(episode: &FlightEpisode, classifier: &Classifier) -> Self {
        let traj = episode.trajectory();
        let alt = episode.altitude_range();
        let vr = episode.vertical_rate_range();

        FlightSummary {
            flight_id: episode.flight_id(),
            icao24: episode.icao24().to_string(),
            callsign: episode.callsign().map(String::from),
            start_time: episode.start(),
            end_time: episode.end(),
            duration_minutes: episode.duration().num_milliseconds() as f64 / 60_000.,
            total_points: traj.len(),
            altitude_min: alt.map(|(lo, _)| lo),
            altitude_max: alt.map(|(_, hi)| hi),
            vertical_rate_min: vr.map(|(lo, _)| lo),
            vertical_rate_max: vr.map(|(_, hi)| hi),
            is_landing: classifier.is_landing(episode),
            is_takeoff: classifier.is_takeoff(episode),
            start_lat: traj.first().map(|p| p.latitude),
            start_lon: traj.first().map(|p| p.longitude),
            end_lat: traj.last().map(|p| p.latitude),
            end_lon: traj.last().map(|p| p.longitude),
        }
    }
}

/// Somewhere to put flights.
///
pub trait FlightSink {
    /// Write some (or all) points of a flight trajectory.
    fn write_trajectory(
        &mut self,
        flight_id: &str,
        icao24: &str,
        callsign: Option<&str>,
        points: &[TrajectoryPoint],
    ) -> Result<(), FlightError>;

    fn write_summary(&mut self, summary: &FlightSummary) -> Result<(), FlightError>;

    fn flush(&mut self) -> Result<(), FlightError> {
        Ok(())
    }
}

/// Outcome of an export run.
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ExportStats {
    pub exported: usize,
    pub failed: usize,
    /// Flights without a usable trajectory
    pub skipped: usize,
}

impl Add for ExportStats {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        ExportStats {
            exported: self.exported + rhs.exported,
            failed: self.failed + rhs.failed,
            skipped: self.skipped + rhs.skipped,
        }
    }
}

impl Display for ExportStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} exported, {} failed, {} skipped",
            self.exported, self.failed, self.skipped
        )
    }
}

/// Progress is logged every that many flights.
const PROGRESS: usize = 10;

#[derive(Clone, Copy, Debug, Default)]
pub struct Exporter {
    classifier: Classifier,
}

impl Exporter {
    pub fn new(classifier: Classifier) -> Self {
        Exporter { classifier }
    }

    /// Write the whole trajectory then the summary of one flight.
    ///
    pub fn export_one<S>(&self, episode: &FlightEpisode, sink: &mut S) -> Result<(), FlightError>
    where
        S: FlightSink + ?Sized,
    {
        sink.write_trajectory(
            &episode.flight_id(),
            episode.icao24(),
            episode.callsign(),
            episode.trajectory(),
        )?;
        sink.write_summary(&FlightSummary::new(episode, &self.classifier))
    }

    /// Write the trajectory point by point, spreading them over `pace`, then the summary.
    ///
    pub fn stream<S>(
        &self,
        episode: &FlightEpisode,
        sink: &mut S,
        pace: Duration,
    ) -> Result<(), FlightError>
    where
        S: FlightSink + ?Sized,
    {
        let id = episode.flight_id();
        let traj = episode.trajectory();
        let delay = pace / (traj.len().max(1) as u32);
        debug!("streaming {id}, {} points every {delay:?}", traj.len());

        for p in traj {
            let point = std::slice::from_ref(p);
            sink.write_trajectory(&id, episode.icao24(), episode.callsign(), point)?;
            if !delay.is_zero() {
                sleep(delay);
            }
        }
        sink.write_summary(&FlightSummary::new(episode, &self.classifier))
    }

    /// Export at most `max` flights.
    ///
    #[tracing::instrument(skip(self, episodes, sink))]
    pub fn export_all<I, S>(&self, episodes: I, sink: &mut S, max: Option<usize>) -> ExportStats
    where
        I: IntoIterator<Item = FlightEpisode>,
        S: FlightSink + ?Sized,
    {
        self.run(episodes, sink, max, |ep, sink| self.export_one(ep, sink))
    }

    /// Same as [`Exporter::export_all`] but with [`Exporter::stream`].
    ///
    #[tracing::instrument(skip(self, episodes, sink))]
    pub fn stream_all<I, S>(
        &self,
        episodes: I,
        sink: &mut S,
        max: Option<usize>,
        pace: Duration,
    ) -> ExportStats
    where
        I: IntoIterator<Item = FlightEpisode>,
        S: FlightSink + ?Sized,
    {
        self.run(episodes, sink, max, |ep, sink| self.stream(ep, sink, pace))
    }

    fn run<I, S, F>(&self, episodes: I, sink: &mut S, max: Option<usize>, f: F) -> ExportStats
    where
        I: IntoIterator<Item = FlightEpisode>,
        S: FlightSink + ?Sized,
        F: Fn(&FlightEpisode, &mut S) -> Result<(), FlightError>,
    {
        let mut stats = ExportStats::default();

        for (i, ep) in episodes.into_iter().take(max.unwrap_or(usize::MAX)).enumerate() {
            if !ep.has_valid_trajectory() {
                trace!("skipping {}", ep.flight_id());
                stats.skipped += 1;
            } else {
                match f(&ep, sink) {
                    Ok(()) => stats.exported += 1,
                    Err(e) => {
                        warn!("Error exporting flight {}: {e}", ep.flight_id());
                        stats.failed += 1;
                    }
                }
            }

            if (i + 1) % PROGRESS == 0 {
                info!("Processed {} flights", i + 1);
            }
        }

        if let Err(e) = sink.flush() {
            warn!("Error flushing output: {e}");
        }
        info!("Export complete: {stats}");
        stats
    }
}

/// One line of the trajectory file.
///
#[derive(Debug, Serialize)]
struct TrajectoryRow<'a> {
    timestamp: String,
    latitude: f64,
    longitude: f64,
    altitude: f64,
    vertical_rate: Option<f64>,
    ground_speed: Option<f64>,
    flight_id: &'a str,
    icao24: &'a str,
    callsign: Option<&'a str>,
}

/// Write trajectories and summaries as two CSV streams.
///
#[derive(Debug)]
pub struct CsvSink<W: Write> {
    trajectories: Writer<W>,
    summaries: Writer<W>,
}

impl<W: Write> CsvSink<W> {
    pub fn new(trajectories: W, summaries: W) -> Self {
        CsvSink {
            trajectories: Writer::from_writer(trajectories),
            summaries: Writer::from_writer(summaries),
        }
    }

    /// Flush everything and give back both writers.
    ///
    pub fn into_inner(self) -> Result<(W, W), FlightError> {
        let traj = self
            .trajectories
            .into_inner()
            .map_err(|e| FlightError::Sink(e.error().to_string()))?;
        let summ = self
            .summaries
            .into_inner()
            .map_err(|e| FlightError::Sink(e.error().to_string()))?;
        Ok((traj, summ))
    }
}

impl CsvSink<File> {
    /// Create [`TRAJECTORY_FILE`] and [`SUMMARY_FILE`] in `dir`.
    ///
    #[tracing::instrument]
    pub fn create(dir: &Path) -> Result<Self, FlightError> {
        let traj = File::create(dir.join(TRAJECTORY_FILE))?;
        let summ = File::create(dir.join(SUMMARY_FILE))?;
        Ok(CsvSink::new(traj, summ))
    }
}

impl<W: Write> FlightSink for CsvSink<W> {
    fn write_trajectory(
        &mut self,
        flight_id: &str,
        icao24: &str,
        callsign: Option<&str>,
        points: &[TrajectoryPoint],
    ) -> Result<(), FlightError> {
        for p in points {
            self.trajectories.serialize(TrajectoryRow {
                timestamp: p.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
                latitude: p.latitude,
                longitude: p.longitude,
                altitude: p.altitude,
                vertical_rate: p.vertical_rate,
                ground_speed: p.ground_speed,
                flight_id,
                icao24,
                callsign,
            })?;
        }
        Ok(())
    }

    fn write_summary(&mut self, summary: &FlightSummary) -> Result<(), FlightError> {
        Ok(self.summaries.serialize(summary)?)
    }

    fn flush(&mut self) -> Result<(), FlightError> {
        self.trajectories.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}

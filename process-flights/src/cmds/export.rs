//! `export` command.
//!
//! Flights (grouped per icao24, optionally only landings or takeoffs) are written as two CSV
//! files in the output directory, one with every trajectory point, one with a summary line per
//! flight.  With `--pace`, points are written one at a time to simulate a live feed.
//!

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use eyre::Result;
use tracing::{info, trace};

use tarmac_flights::{CsvSink, ExportStats, Exporter, FlightCollection, FlightEpisode};

use crate::cmds::ListKind;
use crate::error::Status;
use crate::runtime::Context;

#[derive(Debug, Parser)]
pub struct ExportOpts {
    /// Which flights to export (all, landings, takeoffs).
    #[clap(default_value = "all")]
    pub kind: ListKind,
    /// Output directory, created if needed.
    #[clap(short = 'o', long)]
    pub output: PathBuf,
    /// Only consider that many flights.
    #[clap(short = 'm', long)]
    pub max: Option<usize>,
    /// Spread each flight's points over that many seconds.
    #[clap(short = 'p', long)]
    pub pace: Option<u64>,
}

#[tracing::instrument(skip(ctx, fc))]
pub fn export_cmd(ctx: &Context, fc: &FlightCollection, opts: &ExportOpts) -> Result<ExportStats> {
    if opts.output.exists() && !opts.output.is_dir() {
        return Err(Status::BadOutput(opts.output.to_string_lossy().to_string()).into());
    }
    fs::create_dir_all(&opts.output)?;

    let mut sink = CsvSink::create(&opts.output)?;
    let exporter = Exporter::new(ctx.engine.classifier);

    let flights: Vec<FlightEpisode> = match opts.kind {
        ListKind::All => fc.filter_by_icao24_only().collect(),
        ListKind::Landings => fc.filter_landings(),
        ListKind::Takeoffs => fc.filter_takeoffs(),
    };
    trace!("{} {} flights to export", flights.len(), opts.kind);

    let stats = match opts.pace {
        Some(pace) => {
            info!("Streaming, {pace}s per flight");
            exporter.stream_all(flights, &mut sink, opts.max, Duration::from_secs(pace))
        }
        None => exporter.export_all(flights, &mut sink, opts.max),
    };
    Ok(stats)
}

//! `list` command.
//!

use clap::Parser;
use strum::EnumString;
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::trace;

use tarmac_flights::{FlightCollection, FlightEpisode, Lambert93};

use crate::runtime::Context;

#[derive(Clone, Copy, Debug, Default, EnumString, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ListKind {
    /// Every flight
    #[default]
    All,
    /// Landings with a usable trajectory
    Landings,
    /// Takeoffs with a usable trajectory
    Takeoffs,
}

#[derive(Debug, Parser)]
pub struct ListOpts {
    /// Which flights to list (all, landings, takeoffs).
    #[clap(default_value = "all")]
    pub kind: ListKind,
}

#[tracing::instrument(skip(ctx, fc))]
pub fn list_cmd(ctx: &Context, fc: &FlightCollection, opts: &ListOpts) -> String {
    let flights = match opts.kind {
        ListKind::All => fc.filter_by_icao24_only().collect(),
        ListKind::Landings => fc.filter_landings(),
        ListKind::Takeoffs => fc.filter_takeoffs(),
    };
    trace!("{} flights", flights.len());

    flights_table(ctx, &flights)
}

/// One line per flight, with the number of points around the airport.
///
pub fn flights_table(ctx: &Context, flights: &[FlightEpisode]) -> String {
    let transform = Lambert93::default();
    let classifier = ctx.engine.classifier;

    let mut builder = Builder::default();
    builder.push_record([
        "Flight", "Callsign", "Start", "Minutes", "Records", "Points", "In region", "Label",
    ]);

    flights.iter().for_each(|ep| {
        let in_region = ctx
            .projector
            .project(ep, &transform)
            .map(|p| p.points.len())
            .unwrap_or(0);

        let row = vec![
            ep.flight_id(),
            ep.callsign().unwrap_or_default().to_string(),
            ep.start().format("%Y-%m-%d %H:%M:%S").to_string(),
            format!("{:.1}", ep.duration().num_seconds() as f64 / 60.),
            ep.len().to_string(),
            ep.trajectory().len().to_string(),
            in_region.to_string(),
            classifier.classify(ep).to_string(),
        ];
        builder.push_record(row);
    });

    let table = builder.build().with(Style::modern()).to_string();
    format!("{table}\n{} flights", flights.len())
}

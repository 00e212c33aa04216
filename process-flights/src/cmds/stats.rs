//! `stats` command.
//!

use tabled::builder::Builder;
use tabled::settings::Style;

use tarmac_flights::FlightCollection;

/// Tally everything.  Plottable means with a trajectory of more than one point.
///
#[tracing::instrument(skip(fc))]
pub fn stats_cmd(fc: &FlightCollection) -> String {
    let stats = fc.statistics();

    let rows = [
        ("Records", fc.store().len()),
        ("Flights (icao24 + callsign)", fc.len()),
        ("Flights (icao24)", stats.total),
        ("Landings", stats.landings),
        ("Takeoffs", stats.takeoffs),
        ("Plottable landings", fc.filter_landings().len()),
        ("Plottable takeoffs", fc.filter_takeoffs().len()),
    ];

    let mut builder = Builder::default();
    builder.push_record(["Item", "Count"]);
    rows.iter().for_each(|(name, n)| {
        builder.push_record([name.to_string(), n.to_string()]);
    });

    builder.build().with(Style::modern()).to_string()
}

//! `lookup` command.
//!

use clap::{ArgGroup, Parser};
use eyre::{eyre, Result};
use tabled::builder::Builder;
use tabled::settings::Style;

use tarmac_common::parse_day;
use tarmac_flights::{FlightCollection, FlightSummary, Lookup, LookupKey};

use crate::cmds::flights_table;
use crate::runtime::Context;

#[derive(Debug, Parser)]
#[clap(group(ArgGroup::new("select").required(true).args(["key", "day"])))]
pub struct LookupOpts {
    /// Callsign or icao24.
    #[clap(short = 'k', long)]
    pub key: Option<String>,
    /// Any date, flights are taken within the 24h following its beginning.
    #[clap(short = 'd', long)]
    pub day: Option<String>,
}

#[tracing::instrument(skip(ctx, fc))]
pub fn lookup_cmd(ctx: &Context, fc: &FlightCollection, opts: &LookupOpts) -> Result<String> {
    let key = match (&opts.key, &opts.day) {
        (Some(key), _) => LookupKey::Ident(key.clone()),
        (None, Some(day)) => LookupKey::Day(parse_day(day)?),
        (None, None) => return Err(eyre!("one of --key or --day is needed")),
    };

    let res = match fc.lookup(key) {
        Lookup::One(ep) => {
            let summary = FlightSummary::new(&ep, &ctx.engine.classifier);
            format!("One flight found.\n{}", summary_table(&summary))
        }
        Lookup::Many(sub) => {
            let flights: Vec<_> = sub.iter().collect();
            format!("{sub}\n{}", flights_table(ctx, &flights))
        }
    };
    Ok(res)
}

fn opt(v: Option<f64>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}

/// Vertical table for a single flight.
///
fn summary_table(s: &FlightSummary) -> String {
    let rows = [
        ("Flight", s.flight_id.clone()),
        ("icao24", s.icao24.clone()),
        ("Callsign", s.callsign.clone().unwrap_or_default()),
        ("Start", s.start_time.to_string()),
        ("End", s.end_time.to_string()),
        ("Minutes", format!("{:.1}", s.duration_minutes)),
        ("Points", s.total_points.to_string()),
        ("Altitude min", opt(s.altitude_min)),
        ("Altitude max", opt(s.altitude_max)),
        ("Vertical rate min", opt(s.vertical_rate_min)),
        ("Vertical rate max", opt(s.vertical_rate_max)),
        ("Landing", s.is_landing.to_string()),
        ("Takeoff", s.is_takeoff.to_string()),
    ];

    let mut builder = Builder::default();
    rows.into_iter().for_each(|(name, val)| {
        builder.push_record([name.to_string(), val]);
    });
    builder.build().with(Style::modern()).to_string()
}

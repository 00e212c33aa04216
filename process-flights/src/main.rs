//! `process-flights` reads ADS-B recordings made around an airport, splits them into flights and
//! finds which ones are landings or takeoffs.  Results are printed as tables or exported as CSV.
//!
//! The data file is either given with `-f` or searched in the usual places (see
//! `process-flights.hcl`).
//!

use clap::{crate_version, Parser};
use eyre::Result;
use tracing::trace;

use crate::cli::Opts;
use crate::cmds::handle_cmds;
use crate::runtime::{finish_runtime, init_runtime};

mod cli;
mod cmds;
mod config;
mod error;
mod runtime;

/// Binary name, using a different binary name
pub const NAME: &str = env!("CARGO_BIN_NAME");
/// Binary version
pub const VERSION: &str = crate_version!();

fn main() -> Result<()> {
    let opts = Opts::parse();

    let ctx = init_runtime(&opts)?;

    trace!("Execute commands.");
    let res = handle_cmds(&ctx, &opts);

    // Finish
    //
    finish_runtime(ctx)?;
    res
}

use std::path::PathBuf;

use clap::{crate_authors, crate_description, crate_name, crate_version, Parser};

use crate::cmds::{ExportOpts, ListOpts, LookupOpts};

#[derive(Debug, Parser)]
#[command(disable_version_flag = true)]
#[clap(name = crate_name!(), about = crate_description!())]
#[clap(version = crate_version!(), author = crate_authors!())]
pub struct Opts {
    /// Configuration file.
    #[clap(short = 'c', long)]
    pub config: Option<PathBuf>,
    /// ADS-B data file, JSON lines, can be gzip'ed (default is to search for it).
    #[clap(short = 'f', long)]
    pub file: Option<PathBuf>,
    /// Maximum silence within one flight, in seconds.
    #[clap(short = 'g', long)]
    pub gap: Option<i64>,
    /// Use hierarchical output for traces.
    #[clap(long)]
    pub use_tree: bool,
    /// Also write traces in rolling files in this directory.
    #[clap(long)]
    pub use_file: Option<String>,
    /// Sub-commands (see below).
    #[clap(subcommand)]
    pub subcmd: SubCommand,
}

#[derive(Debug, Parser)]
pub enum SubCommand {
    /// Count flights, landings and takeoffs.
    Stats,
    /// List flights.
    List(ListOpts),
    /// Find flights by callsign, icao24 or day.
    Lookup(LookupOpts),
    /// Export trajectories and flight summaries as CSV.
    Export(ExportOpts),
    /// List all package versions.
    Version,
}

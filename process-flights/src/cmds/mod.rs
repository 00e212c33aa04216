//! This is the main driver module for all the different commands.
//!

use tracing::info;

pub use export::*;
pub use list::*;
pub use lookup::*;
pub use stats::*;

use crate::cli::{Opts, SubCommand};
use crate::runtime::Context;
use crate::{NAME, VERSION};

mod export;
mod list;
mod lookup;
mod stats;

#[tracing::instrument(skip(ctx))]
pub fn handle_cmds(ctx: &Context, opts: &Opts) -> eyre::Result<()> {
    match &opts.subcmd {
        SubCommand::Stats => {
            let fc = ctx.load()?;
            println!("Flight statistics.\n");

            println!("{}", stats_cmd(&fc));
        }
        SubCommand::List(lopts) => {
            let fc = ctx.load()?;
            println!("Listing {} flights.\n", lopts.kind);

            println!("{}", list_cmd(ctx, &fc, lopts));
        }
        SubCommand::Lookup(lopts) => {
            let fc = ctx.load()?;
            println!("Looking up flights.\n");

            println!("{}", lookup_cmd(ctx, &fc, lopts)?);
        }
        SubCommand::Export(eopts) => {
            let fc = ctx.load()?;
            println!("Exporting flights to {:?}.\n", eopts.output);

            let stats = export_cmd(ctx, &fc, eopts)?;
            println!("Export complete: {stats}");
        }
        SubCommand::Version => {
            println!("{} v{} ({})", NAME, VERSION, tarmac_common::version());
            match &ctx.source {
                Some(source) => println!("Configuration from {}", source.display()),
                None => println!("Default configuration"),
            }
        }
    }
    info!("Done.");
    Ok(())
}

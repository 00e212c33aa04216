//! Runtime setup and teardown.
//!
//! We start logging, load the configuration file and check its version.  The data itself is only
//! loaded by the commands needing it.
//!

use std::path::{Path, PathBuf};

use eyre::Result;
use tracing::{debug, info, trace};

use tarmac_common::{close_logging, init_logging, ConfigFile, LogGuard, Versioned};
use tarmac_flights::{EngineConfig, FlightCollection, Projector};
use tarmac_formats::{find_data_file, FormatError, RecordStore};

use crate::cli::Opts;
use crate::config::{FlightsConfig, CONFIG, CVERSION};
use crate::error::Status;
use crate::NAME;

/// Tag for our configuration directory
const TAG: &str = "tarmac";

/// This holds our context, meaning common stuff
///
#[derive(Debug)]
pub struct Context {
    /// Configuration, defaults if no file
    pub config: FlightsConfig,
    /// File the configuration came from
    pub source: Option<PathBuf>,
    /// Engine parameters after CLI overrides
    pub engine: EngineConfig,
    /// Area of interest
    pub projector: Projector,
    /// Explicit data file
    file: Option<PathBuf>,
    log: LogGuard,
}

impl Context {
    /// Where the data is, explicit file or first match in the search list.
    ///
    #[tracing::instrument(skip(self))]
    pub fn data_file(&self) -> Result<PathBuf> {
        match &self.file {
            Some(file) => {
                if !file.exists() {
                    return Err(FormatError::DataFileNotFound(vec![file.clone()]).into());
                }
                Ok(file.clone())
            }
            None => Ok(find_data_file(self.config.data.search.as_slice())?),
        }
    }

    /// Read the data and build the flight collection.
    ///
    #[tracing::instrument(skip(self))]
    pub fn load(&self) -> Result<FlightCollection> {
        let fname = self.data_file()?;
        self.load_from(&fname)
    }

    fn load_from(&self, fname: &Path) -> Result<FlightCollection> {
        info!("Loading {fname:?}");

        let (store, stats) = RecordStore::load(fname)?;
        if store.is_empty() {
            return Err(Status::NoRecords(fname.to_string_lossy().to_string()).into());
        }
        if stats.skipped != 0 {
            info!("{} bad lines skipped", stats.skipped);
        }
        Ok(FlightCollection::new(store, self.engine))
    }
}

/// Start logging and load the configuration.
///
#[tracing::instrument]
pub fn init_runtime(opts: &Opts) -> Result<Context> {
    // Initialise logging early
    //
    let log = init_logging(NAME, opts.use_tree, opts.use_file.clone())?;
    trace!("Logging initialised.");

    let cfile = ConfigFile::<FlightsConfig>::load(TAG, CONFIG, opts.config.as_deref())?;
    let source = cfile.source().map(Path::to_path_buf);
    debug!("config from {source:?}");

    let config = cfile.into_inner();
    if config.version() != CVERSION {
        return Err(Status::BadFileVersion(config.version(), CVERSION).into());
    }

    // CLI overrides the config file
    //
    let engine = config.engine(opts.gap);
    if engine.try_gap().is_none() {
        return Err(Status::BadGap(engine.gap_threshold).into());
    }
    let projector = Projector::new(config.region);

    Ok(Context {
        config,
        source,
        engine,
        projector,
        file: opts.file.clone(),
        log,
    })
}

/// Finish everything.
///
#[tracing::instrument(skip(ctx))]
pub fn finish_runtime(ctx: Context) -> Result<()> {
    close_logging(ctx.log);
    Ok(())
}

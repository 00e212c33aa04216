//! This is the `ConfigFile` struct.
//!
//! This is for finding the right default locations for the configuration files of the
//! various `tarmac` tools.  This is a configuration file/struct neutral loading engine, storing
//! only the base directory and with `load()` read the proper file or the default one.
//!
//! This encapsulates the configuration file, available with `.inner()` or `.inner_mut()`.
//!

use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::{env, fs};

use directories::BaseDirs;
use eyre::{eyre, Result};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::makepath;

/// Every configuration file carries a version number we check against.
///
pub trait Versioned {
    fn version(&self) -> usize;
}

/// Generic configuration file holder.
///
#[derive(Debug)]
pub struct ConfigFile<T: Debug + Default + DeserializeOwned + Versioned> {
    /// Tag is the project name.
    tag: String,
    /// This is the base directory for all files.
    basedir: PathBuf,
    /// File we actually loaded, if any.
    source: Option<PathBuf>,
    inner: T,
}

impl<T> ConfigFile<T>
where
    T: Debug + Default + DeserializeOwned + Versioned,
{
    #[tracing::instrument]
    fn new(tag: &str) -> Self {
        let basedir: PathBuf = match BaseDirs::new() {
            Some(base) => {
                #[cfg(unix)]
                let base = base.home_dir().join(".config");

                #[cfg(windows)]
                let base = base.data_local_dir().to_path_buf();

                debug!("base = {base:?}");
                makepath!(base, tag)
            }
            None => {
                // No home directory at all, look into the current one.
                //
                let homedir = env::var("HOME").unwrap_or(String::from("."));
                debug!("base = {homedir}");

                makepath!(homedir, ".config", tag)
            }
        };
        ConfigFile {
            tag: String::from(tag),
            basedir,
            source: None,
            inner: T::default(),
        }
    }

    /// Returns the project tag
    ///
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns the path of the default config directory
    ///
    pub fn config_path(&self) -> PathBuf {
        self.basedir.clone()
    }

    /// Returns the path of the default config file called `name`.
    ///
    pub fn default_file(&self, name: &str) -> PathBuf {
        let cfg = self.config_path().join(name);
        debug!("default = {cfg:?}");
        cfg
    }

    /// Load the file and return a struct T in the right format.
    ///
    /// Use the following search path:
    /// - file specified on CLI, which must exist
    /// - default file `name` in the tag directory (base on $HOME or $LOCALAPPDATA)
    ///
    /// If neither is there, we use the default values of `T`.
    ///
    #[tracing::instrument]
    pub fn load(tag: &str, name: &str, fname: Option<&Path>) -> Result<ConfigFile<T>> {
        let mut cfg = ConfigFile::<T>::new(tag);

        let fname = match fname {
            Some(fname) => {
                if !fname.exists() {
                    return Err(eyre!("Unknown config file {:?}", fname));
                }
                fname.to_path_buf()
            }
            None => {
                let def = cfg.default_file(name);
                if !def.exists() {
                    debug!("No config file in {:?}, using defaults", def);
                    return Ok(cfg);
                }
                def
            }
        };

        trace!("Loading config file {fname:?} from {:?}", cfg.config_path());

        let data = fs::read_to_string(&fname)?;
        debug!("string data = {data}");

        let data: T = hcl::from_str(&data)?;
        debug!("struct data = {data:?}");

        cfg.inner = data;
        cfg.source = Some(fname);
        Ok(cfg)
    }

    /// Return the file we loaded, `None` if we are running on defaults.
    ///
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Return the inner configuration file
    ///
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Return the inner configuration file as putable
    ///
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the holder and return the configuration itself
    ///
    pub fn into_inner(self) -> T {
        self.inner
    }
}

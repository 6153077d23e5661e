//! Settings persistence
//!
//! [`codec`] defines the record format. [`ConfigFile`] binds it to a path:
//! the strict `load_into`/`save` return errors, while `restore`/`persist` are
//! what the menu calls and never fail. A missing or unwritable file just means
//! the defaults stand.

pub mod codec;

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::errors::{MenuError, Result};
use crate::menu::forest::Forest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    path: PathBuf,
}

impl ConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ConfigFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file and apply its records. Returns the number of options
    /// that received a saved value.
    pub fn load_into(&self, forest: &mut Forest) -> Result<usize> {
        let bytes = fs::read(&self.path).map_err(|source| MenuError::Read {
            path: self.path.clone(),
            source,
        })?;
        let records = codec::decode(&bytes);
        Ok(codec::apply(forest, &records))
    }

    /// Write every persisted option, replacing the file
    pub fn save(&self, forest: &Forest) -> Result<()> {
        let bytes = codec::encode(forest)?;
        let write_err = |source: std::io::Error| MenuError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(write_err)?;
        }
        fs::write(&self.path, bytes).map_err(write_err)
    }

    /// Load saved values, keeping defaults on any failure
    pub fn restore(&self, forest: &mut Forest) {
        match self.load_into(forest) {
            Ok(applied) => info!("restored {} options from {}", applied, self.path.display()),
            Err(e) if e.is_not_found() => debug!("no saved config at {}", self.path.display()),
            Err(e) => warn!("{}", e),
        }
    }

    /// Save values, logging and dropping any failure
    pub fn persist(&self, forest: &Forest) {
        match self.save(forest) {
            Ok(()) => info!("saved config to {}", self.path.display()),
            Err(e) => warn!("config not saved: {}", e),
        }
    }
}

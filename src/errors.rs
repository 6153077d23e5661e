//! Error types for the options menu
//!
//! This module defines [`MenuError`], the single error type returned by the
//! fallible parts of the crate (file loading and config persistence).
//!
//! Nothing in the menu is fatal. Loading and persistence entry points that
//! face the game ([`crate::config::ConfigFile::restore`],
//! [`crate::parser::loader::load_directory`], ...) log and swallow these
//! errors so the menu always comes up with its defaults.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading declarations or persisting settings
#[derive(Debug, Error)]
pub enum MenuError {
    /// A declaration file or the config file could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The config file could not be created or written
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A config key does not fit the one-byte length prefix of a record
    #[error("config key '{key}' is {len} bytes, records hold at most 255")]
    KeyTooLong { key: String, len: usize },

    /// A record starts with a kind byte the codec does not know
    #[error("unknown record kind byte {0:#04x}")]
    UnknownRecordKind(u8),

    /// In-memory encoding failed
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

impl MenuError {
    /// True when the error only means "the file is not there"
    pub fn is_not_found(&self) -> bool {
        match self {
            MenuError::Read { source, .. } | MenuError::Write { source, .. } => {
                source.kind() == io::ErrorKind::NotFound
            }
            MenuError::Io(e) => e.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, MenuError>;

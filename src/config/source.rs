//! Raw access to config text and to the files it references.

use crate::constants::TLS_CONFIG_FILE_ENV;
use crate::error::{Result, TlsConfigError};
use crate::prelude::debug;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Read access to the filesystem holding the config file and the PEM files it names.
///
/// Reads are blocking and are not retried; a single failure is surfaced to the caller.
pub trait FileSource {
    /// Returns the whole content of the file at `path` as text.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// [`FileSource`] backed by the local filesystem. Relative paths are resolved
/// against the process working directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSource;

impl FileSource for LocalFileSource {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }
}

impl<S: FileSource + ?Sized> FileSource for &S {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        (**self).read_to_string(path)
    }
}

/// Reads the TLS config file at `path`.
///
/// # Errors
///
/// Any I/O failure (missing file, permission denied, ...) is returned as
/// [`TlsConfigError::ConfigFileUnreadable`].
pub fn load_from_path<S: FileSource>(files: &S, path: &Path) -> Result<String> {
    let text = files
        .read_to_string(path)
        .map_err(|source| TlsConfigError::ConfigFileUnreadable {
            path: path.display().to_string(),
            source,
        })?;
    debug!("Read TLS config file '{}'", path.display());
    Ok(text)
}

/// Returns in-memory config text unchanged.
pub fn load_from_string(text: &str) -> &str {
    text
}

/// Gets the TLS config file path from the environment variable `TLS_CONFIG_FILE`.
///
/// An unset or empty variable yields `None`.
pub fn get_default_config_path() -> Option<PathBuf> {
    match env::var_os(TLS_CONFIG_FILE_ENV) {
        Some(path) if !path.is_empty() => Some(PathBuf::from(path)),
        _ => None,
    }
}

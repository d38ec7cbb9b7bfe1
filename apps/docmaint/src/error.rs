//! Error taxonomy shared by the scanner and the fix passes.
//!
//! Only `NotFound` is fatal. The remaining variants describe per-item
//! failures; passes convert them into report issues and keep going.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MaintError {
    #[error("docs root not found or not a directory: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("cannot decode {} as UTF-8 text: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("rename target already exists: {} -> {}", from.display(), to.display())]
    RenameConflict { from: PathBuf, to: PathBuf },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MaintError {
    /// Classify a read failure: invalid UTF-8 becomes `Decode`, anything else `Io`.
    pub fn from_read(path: PathBuf, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::InvalidData {
            MaintError::Decode { path, source }
        } else {
            MaintError::Io { path, source }
        }
    }

    /// Short machine-friendly kind used in reports.
    pub fn kind(&self) -> &'static str {
        match self {
            MaintError::NotFound { .. } => "not-found",
            MaintError::Decode { .. } => "decode",
            MaintError::RenameConflict { .. } => "rename-conflict",
            MaintError::Io { .. } => "io",
        }
    }
}

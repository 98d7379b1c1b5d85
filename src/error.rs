//! Error types shared by all hooks.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fatal hook error. Lint findings are not errors; they are reported as
/// issues and only affect the exit code.
#[derive(Error, Debug)]
pub enum HookError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    #[error("cannot parse {}:{line}: {message}", .path.display())]
    Gitmodules {
        path: PathBuf,
        line: usize,
        message: String,
    },
}

impl HookError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        HookError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, HookError>;

//! Error taxonomy for resolution and installation.
//!
//! Every variant is fatal: callers propagate it to the root and the run
//! aborts. Conditions that are *not* errors (locale-filtered packages,
//! skipped optional edges, ledger hits, reboot-required exits) never
//! produce an `InstallError`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InstallError {
    #[error("Could not find an applicable package in the manifest: {id}")]
    Resolution { id: String },

    #[error("Hash mismatch for {file}:\n  expected {expected}\n  actual   {actual}")]
    HashMismatch {
        file: String,
        expected: String,
        actual: String,
    },

    #[error("Size mismatch for {file}: expected {expected} bytes, got {actual}")]
    SizeMismatch {
        file: String,
        expected: u64,
        actual: u64,
    },

    #[error("Invalid digest declared for {file}: {reason}")]
    MalformedDigest { file: String, reason: String },

    #[error("Request for {url} failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("Failed to decode {what}: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    Configuration(String),

    #[error("{program} exited with {}", describe_exit(.code))]
    Subprocess { program: String, code: Option<i32> },

    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error at {}: {source}", .path.display())]
    Path {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
}

/// The failure category a given [`InstallError`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Resolution,
    Integrity,
    Transport,
    Decode,
    Configuration,
    Subprocess,
    Filesystem,
}

impl InstallError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn transport(url: &str, reason: impl std::fmt::Display) -> Self {
        Self::Transport {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Attach a path to an IO error.
    pub fn at(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Path { path, source }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Resolution { .. } => ErrorKind::Resolution,
            Self::HashMismatch { .. } | Self::SizeMismatch { .. } | Self::MalformedDigest { .. } => {
                ErrorKind::Integrity
            }
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::Subprocess { .. } | Self::Spawn { .. } => ErrorKind::Subprocess,
            Self::Path { .. } | Self::Io(_) | Self::Archive(_) => ErrorKind::Filesystem,
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

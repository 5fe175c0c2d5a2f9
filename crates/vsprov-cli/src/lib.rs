//! vsprov - Visual Studio Build Tools provisioner
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
//!
//! Installs the C++ build toolchain (and anything else the manifest offers)
//! on a Windows machine without the interactive installer.
//!
//! # Overview
//!
//! The channel URL points at the current release manifest. `vsprov` fetches
//! the channel, verifies and decodes the manifest, then installs each root
//! package depth-first: dependencies first, each package at most once,
//! every payload checked against its SHA-256 before anything runs.
//!
//! # Configuration
//!
//! ```text
//! defaults  <  --config FILE (TOML)  <  flags / VSPROV_* environment
//! ```

pub mod cmd;
pub mod config;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub use vsprov_core::USER_AGENT;

#[derive(Debug, Parser)]
#[command(name = "vsprov")]
#[command(author, version, about = "vsprov - provision Visual Studio Build Tools from a channel manifest")]
pub struct Cli {
    /// Settings file (TOML)
    #[arg(long, global = true, env = "VSPROV_CONFIG")]
    pub config: Option<PathBuf>,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(flatten)]
    pub overrides: Overrides,

    #[command(subcommand)]
    pub command: Commands,
}

/// Settings that can be given on the command line or in the environment.
#[derive(Debug, Default, Args)]
pub struct Overrides {
    /// Channel document URL
    #[arg(long, global = true, env = "VSPROV_CHANNEL_URL")]
    pub channel_url: Option<String>,

    /// Directory extension archives are unpacked into
    #[arg(long, global = true, env = "VSPROV_INSTALL_ROOT")]
    pub install_root: Option<PathBuf>,

    /// Parent directory for per-package download directories
    #[arg(long, global = true, env = "VSPROV_SCRATCH_DIR")]
    pub scratch_dir: Option<PathBuf>,

    /// Default target architecture (e.g. x64)
    #[arg(long, global = true, env = "VSPROV_ARCH")]
    pub arch: Option<String>,

    /// Accepted language-pack locale (e.g. en-us)
    #[arg(long, global = true, env = "VSPROV_LOCALE")]
    pub locale: Option<String>,

    /// Use the manifest even if it does not match the channel's digest
    #[arg(long, global = true)]
    pub allow_unverified_manifest: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Install packages and their dependencies
    Install {
        /// Root package ids (defaults to the configured set)
        packages: Vec<String>,
        /// Resolve and report without downloading or running anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Show what `install` would do, in installation order
    Plan {
        /// Root package ids (defaults to the configured set)
        packages: Vec<String>,
    },
    /// Compute SHA256 hash of files (for manifest authoring)
    Hash {
        /// Files to hash
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

pub mod dispatch;
pub mod error;
pub mod filter;
pub mod io;
pub mod ledger;
pub mod process;
pub mod provision;
pub mod resolver;
pub mod settings;
pub mod transport;

#[cfg(test)]
mod testing;

pub use error::{ErrorKind, InstallError};
pub use ledger::Ledger;
pub use process::{Launcher, SystemLauncher};
pub use provision::{load_manifest, provision};
pub use resolver::{InstallRecord, Mode, Outcome, Report, Session};
pub use settings::{ManifestTrust, Settings};
pub use transport::{HttpTransport, Transport};

/// User Agent string for channel, manifest and payload requests
pub const USER_AGENT: &str = concat!("vsprov/", env!("CARGO_PKG_VERSION"));

//! Recursive dependency resolution and installation.
//!
//! A [`Session`] walks the dependency graph depth-first from each root
//! package. Every dependency is fully installed before the package that
//! needs it, and every package id is installed at most once per session.

use futures::FutureExt;
use futures::future::BoxFuture;
use std::path::PathBuf;

use vsprov_schema::{DependencyConstraint, Manifest, ManifestPackage, PackageId, PackageType};

use crate::dispatch::dispatch;
use crate::error::InstallError;
use crate::filter::{Target, select};
use crate::io::download::fetch_payload;
use crate::io::scratch::ScratchDir;
use crate::ledger::Ledger;
use crate::process::{ExitOutcome, Launcher};
use crate::settings::Settings;
use crate::transport::Transport;

/// Whether payloads are actually fetched and installed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Install,
    /// Walk the graph and record what would be installed.
    DryRun,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Installed,
    RebootRequired,
    Planned,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Installed => "installed",
            Self::RebootRequired => "reboot required",
            Self::Planned => "planned",
        }
    }
}

/// One package that reached the payload stage.
#[derive(Debug, Clone)]
pub struct InstallRecord {
    pub id: PackageId,
    pub version: String,
    pub kind: PackageType,
    pub payloads: usize,
    pub declared_bytes: u64,
    pub outcome: Outcome,
}

/// Packages handled by a session, in installation order.
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub records: Vec<InstallRecord>,
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn reboot_required(&self) -> bool {
        self.records
            .iter()
            .any(|r| r.outcome == Outcome::RebootRequired)
    }

    pub fn declared_bytes(&self) -> u64 {
        self.records.iter().map(|r| r.declared_bytes).sum()
    }
}

/// State for one provisioning run.
pub struct Session<'a> {
    manifest: &'a Manifest,
    settings: &'a Settings,
    target: Target,
    transport: &'a dyn Transport,
    launcher: &'a dyn Launcher,
    ledger: Ledger,
    mode: Mode,
    records: Vec<InstallRecord>,
}

impl<'a> Session<'a> {
    /// A session whose ledger starts with `settings.preinstalled`.
    pub fn new(
        manifest: &'a Manifest,
        settings: &'a Settings,
        transport: &'a dyn Transport,
        launcher: &'a dyn Launcher,
        mode: Mode,
    ) -> Self {
        Self {
            manifest,
            settings,
            target: Target::new(&settings.arch, &settings.locale),
            transport,
            launcher,
            ledger: Ledger::seeded(settings.preinstalled.iter().map(String::as_str)),
            mode,
            records: Vec::new(),
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Install `id` and everything it depends on.
    ///
    /// `constraint` is the edge `id` was reached through, `None` for a root.
    pub fn install<'s>(
        &'s mut self,
        id: &'s str,
        constraint: Option<&'s DependencyConstraint>,
    ) -> BoxFuture<'s, Result<(), InstallError>> {
        async move {
            if !self.ledger.mark(id) {
                tracing::debug!("Skipping already-installed package: {id}");
                return Ok(());
            }

            let manifest = self.manifest;
            let Some(pkg) = select(manifest, id, constraint, &self.target)? else {
                tracing::info!("Ignoring lack of applicable package: {id}");
                return Ok(());
            };

            for (dep_id, dep) in &pkg.dependencies {
                if dep.is_typed() {
                    tracing::debug!(
                        "Skipping {} dependency {dep_id} of {id}",
                        dep.kind.as_deref().unwrap_or_default()
                    );
                    continue;
                }
                if !dep.applies_to(&self.settings.product_id) {
                    tracing::debug!(
                        "Skipping dependency {dep_id} of {id}: not applicable to {}",
                        self.settings.product_id
                    );
                    continue;
                }
                self.install(dep_id.as_str(), Some(dep)).await?;
            }

            if pkg.payloads.is_empty() {
                tracing::info!("Package {id} has no payloads");
                return Ok(());
            }

            let outcome = match self.mode {
                Mode::DryRun => {
                    tracing::info!("Would install {} {} ({})", pkg.id, pkg.version, pkg.kind);
                    Outcome::Planned
                }
                Mode::Install => self.materialize(pkg).await?,
            };

            self.records.push(InstallRecord {
                id: pkg.id.clone(),
                version: pkg.version.clone(),
                kind: pkg.kind.clone(),
                payloads: pkg.payloads.len(),
                declared_bytes: pkg.declared_size(),
                outcome,
            });
            Ok(())
        }
        .boxed()
    }

    /// Fetch every payload into a fresh scratch directory and install.
    async fn materialize(&self, pkg: &ManifestPackage) -> Result<Outcome, InstallError> {
        let scratch = ScratchDir::new(self.settings.scratch_dir.as_deref(), pkg.id.as_str())?;

        let mut paths: Vec<PathBuf> = Vec::with_capacity(pkg.payloads.len());
        for payload in &pkg.payloads {
            let path = fetch_payload(
                self.transport,
                scratch.path(),
                payload,
                self.settings.enforce_payload_size,
            )
            .await?;
            paths.push(path);
        }

        let exit = dispatch(
            self.launcher,
            &self.settings.install_root,
            scratch.path(),
            pkg,
            &paths,
        )
        .await?;

        Ok(match exit {
            ExitOutcome::RebootRequired => Outcome::RebootRequired,
            ExitOutcome::Success | ExitOutcome::Failed => Outcome::Installed,
        })
    }

    pub fn finish(self) -> Report {
        Report {
            records: self.records,
        }
    }
}

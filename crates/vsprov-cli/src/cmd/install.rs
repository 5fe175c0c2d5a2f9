use anyhow::{Context, Result};

use vsprov_core::{HttpTransport, Mode, Report, Settings, SystemLauncher, provision};

/// Provision `settings.packages` from the configured channel.
pub async fn install(settings: &Settings, dry_run: bool) -> Result<()> {
    let report = run(settings, if dry_run { Mode::DryRun } else { Mode::Install }).await?;

    if dry_run {
        println!("{}", crate::cmd::plan::render(&report));
        return Ok(());
    }

    println!(
        "Installed {} package(s) into {}",
        report.records.len(),
        settings.install_root.display()
    );
    if report.reboot_required() {
        println!("A restart is required to finish installation.");
    }
    Ok(())
}

pub(crate) async fn run(settings: &Settings, mode: Mode) -> Result<Report> {
    let transport = HttpTransport::new().context("Failed to create HTTP client")?;
    provision(settings, &transport, &SystemLauncher, mode)
        .await
        .with_context(|| format!("Provisioning from {} failed", settings.channel_url))
}

use anyhow::Result;
use std::fmt::Write;

use vsprov_core::{Mode, Report, Settings};

/// Resolve `settings.packages` without side effects and print the order.
pub async fn plan(settings: &Settings) -> Result<()> {
    let report = crate::cmd::install::run(settings, Mode::DryRun).await?;
    println!("{}", render(&report));
    Ok(())
}

/// Format a report as an aligned table, one row per package.
pub fn render(report: &Report) -> String {
    if report.is_empty() {
        return "Nothing to install.".to_string();
    }

    let width = report
        .records
        .iter()
        .map(|r| r.id.as_str().len())
        .max()
        .unwrap_or(0)
        .max("PACKAGE".len());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<width$}  {:<16}  {:<6}  {:>8}  {:>12}",
        "PACKAGE", "VERSION", "TYPE", "PAYLOADS", "SIZE"
    );
    for r in &report.records {
        let _ = writeln!(
            out,
            "{:<width$}  {:<16}  {:<6}  {:>8}  {:>12}",
            r.id.as_str(),
            r.version,
            r.kind.as_str(),
            r.payloads,
            human_size(r.declared_bytes)
        );
    }
    let _ = write!(
        out,
        "{} package(s), {} declared",
        report.records.len(),
        human_size(report.declared_bytes())
    );
    out
}

fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{size:.1} {}", UNITS[unit])
    }
}

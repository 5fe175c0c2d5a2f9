//! Installation dispatch by package type.
//!
//! | type | mechanism |
//! |------|-----------|
//! | `Exe`  | run the primary payload with its templated parameters |
//! | `Msi`  | `msiexec.exe /i <payload> KEY=value...` |
//! | `Msu`  | `wusa.exe <payload> /quiet /norestart` |
//! | `Vsix` | unpack `Contents/` into the install root |

use std::path::{Path, PathBuf};

use vsprov_schema::{ManifestPackage, PackageType};

use crate::error::InstallError;
use crate::io::extract::extract_vsix_blocking;
use crate::process::{ExitOutcome, Launcher, run_installer};

/// `installParams.fileName` value meaning "run the payload itself".
pub const PAYLOAD_SENTINEL: &str = "[Payload]";

pub const MSI_RUNNER: &str = "msiexec.exe";
pub const MSU_RUNNER: &str = "wusa.exe";

/// Fill the placeholders this tool knows how to answer.
///
/// Any `[` left afterwards is an unresolved placeholder and is refused
/// rather than handed to an installer verbatim.
pub fn replace_placeholders(source: &str) -> Result<String, InstallError> {
    let replaced = source
        .replace("[CEIPConsent]", "/CEIPConsent")
        .replace("\"[LogFile]\"", "con");

    if replaced.contains('[') {
        return Err(InstallError::config(format!(
            "placeholder present: {replaced}"
        )));
    }
    Ok(replaced)
}

/// Split an argument string on whitespace. Quoted arguments are refused.
pub fn split_parameters(arguments: &str) -> Result<Vec<String>, InstallError> {
    if arguments.contains('"') {
        return Err(InstallError::config(format!(
            "arguments include quotes: {arguments}"
        )));
    }
    Ok(arguments.split_whitespace().map(str::to_string).collect())
}

/// Install `pkg` from its verified `payloads`, which live in `dir`.
pub async fn dispatch(
    launcher: &dyn Launcher,
    install_root: &Path,
    dir: &Path,
    pkg: &ManifestPackage,
    payloads: &[PathBuf],
) -> Result<ExitOutcome, InstallError> {
    let primary = payloads.first().ok_or_else(|| {
        InstallError::config(format!("Package {} has no payloads to install", pkg.id))
    })?;

    match &pkg.kind {
        PackageType::Exe => {
            let params = pkg.install_params.as_ref().ok_or_else(|| {
                InstallError::config(format!("Package {} has no install parameters", pkg.id))
            })?;
            if params.file_name != PAYLOAD_SENTINEL {
                return Err(InstallError::config(format!(
                    "unexpected EXE install filename for {}: '{}'",
                    pkg.id, params.file_name
                )));
            }
            let args = split_parameters(&replace_placeholders(&params.parameters)?)?;
            run_installer(launcher, dir, &primary.to_string_lossy(), &args).await
        }
        PackageType::Msi => {
            let mut args = vec!["/i".to_string(), relative(dir, primary)];
            for (key, value) in &pkg.msi_properties {
                args.push(format!("{key}={}", replace_placeholders(value)?));
            }
            run_installer(launcher, dir, MSI_RUNNER, &args).await
        }
        PackageType::Msu => {
            let args = vec![
                relative(dir, primary),
                "/quiet".to_string(),
                "/norestart".to_string(),
            ];
            run_installer(launcher, dir, MSU_RUNNER, &args).await
        }
        PackageType::Vsix => {
            extract_vsix_blocking(primary.clone(), install_root.to_path_buf()).await?;
            Ok(ExitOutcome::Success)
        }
        other => Err(InstallError::config(format!(
            "Don't know how to install package type: '{other}' ({})",
            pkg.id
        ))),
    }
}

fn relative(dir: &Path, path: &Path) -> String {
    path.strip_prefix(dir)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}

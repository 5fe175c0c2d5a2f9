//! Installer process execution and exit-status policy.

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;

use crate::error::InstallError;

/// Exit status installers use for "succeeded, restart required".
pub const REBOOT_REQUIRED: i32 = 3010;

#[async_trait]
pub trait Launcher: Send + Sync {
    /// Run `program` with `args` in `dir` and wait for it.
    ///
    /// Returns the exit code, or `None` if the process was terminated
    /// without one.
    async fn launch(
        &self,
        dir: &Path,
        program: &str,
        args: &[String],
    ) -> Result<Option<i32>, InstallError>;
}

/// Runs installers as child processes with inherited stdio.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

#[async_trait]
impl Launcher for SystemLauncher {
    async fn launch(
        &self,
        dir: &Path,
        program: &str,
        args: &[String],
    ) -> Result<Option<i32>, InstallError> {
        let status = tokio::process::Command::new(program)
            .args(args)
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|source| InstallError::Spawn {
                program: program.to_string(),
                source,
            })?;
        Ok(status.code())
    }
}

/// How an installer's exit status is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    Success,
    RebootRequired,
    Failed,
}

impl ExitOutcome {
    pub fn from_code(code: Option<i32>) -> Self {
        match code {
            Some(0) => Self::Success,
            Some(REBOOT_REQUIRED) => Self::RebootRequired,
            _ => Self::Failed,
        }
    }
}

/// Launch an installer and apply the exit-status policy.
pub async fn run_installer(
    launcher: &dyn Launcher,
    dir: &Path,
    program: &str,
    args: &[String],
) -> Result<ExitOutcome, InstallError> {
    tracing::info!("Executing program {program} with arguments {args:?}");

    let code = launcher.launch(dir, program, args).await?;
    match ExitOutcome::from_code(code) {
        ExitOutcome::Success => Ok(ExitOutcome::Success),
        ExitOutcome::RebootRequired => {
            tracing::warn!("Ignoring exit code {REBOOT_REQUIRED}: restart requested by {program}");
            Ok(ExitOutcome::RebootRequired)
        }
        ExitOutcome::Failed => Err(InstallError::Subprocess {
            program: program.to_string(),
            code,
        }),
    }
}

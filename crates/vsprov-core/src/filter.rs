//! Applicability filtering: choosing which definition of a package id
//! applies to the target architecture and locale.

use vsprov_schema::{DependencyConstraint, Manifest, ManifestPackage, NEUTRAL};

use crate::error::InstallError;

/// Target environment a package variant must be valid for.
#[derive(Debug, Clone)]
pub struct Target {
    /// Architecture assumed when an edge does not override it (e.g. `x64`).
    pub arch: String,
    /// Locale whose language packs are accepted (e.g. `en-us`).
    pub locale: String,
}

impl Target {
    pub fn new(arch: impl Into<String>, locale: impl Into<String>) -> Self {
        Self {
            arch: arch.into(),
            locale: locale.into(),
        }
    }

    fn language_ok(&self, language: Option<&str>) -> bool {
        match language.filter(|l| !l.is_empty()) {
            None => true,
            Some(l) => l.eq_ignore_ascii_case(NEUTRAL) || l.eq_ignore_ascii_case(&self.locale),
        }
    }

    /// Without an edge chip, chipless and neutral packages fit any target.
    /// An edge chip must be matched exactly, with only `neutral` exempt.
    fn chip_ok(&self, chip: Option<&str>, wanted: Option<&str>) -> bool {
        let chip = chip.unwrap_or_default();
        if chip.eq_ignore_ascii_case(NEUTRAL) {
            return true;
        }
        match wanted {
            Some(wanted) => chip.eq_ignore_ascii_case(wanted),
            None => chip.is_empty() || chip.eq_ignore_ascii_case(&self.arch),
        }
    }
}

/// Select the first definition of `id` applicable to `target`.
///
/// Returns `Ok(None)` when omission is acceptable: the inbound edge allows
/// ignoring applicability failures, or every definition was rejected for
/// its language alone.
pub fn select<'m>(
    manifest: &'m Manifest,
    id: &str,
    constraint: Option<&DependencyConstraint>,
    target: &Target,
) -> Result<Option<&'m ManifestPackage>, InstallError> {
    tracing::info!("Searching the manifest for package: {id}");

    let wanted_chip = constraint.and_then(DependencyConstraint::chip);
    let mut any_wrong_language = false;
    let mut all_wrong_language = true;

    for pkg in manifest.variants(id) {
        if !target.language_ok(pkg.language.as_deref()) {
            any_wrong_language = true;
            tracing::debug!(
                "Skipping {} version {} as it has language: {}",
                pkg.kind,
                pkg.version,
                pkg.language.as_deref().unwrap_or_default()
            );
            continue;
        }
        all_wrong_language = false;

        if !target.chip_ok(pkg.chip.as_deref(), wanted_chip) {
            tracing::debug!(
                "Skipping {} version {} as it has chip type {} and {} was expected",
                pkg.kind,
                pkg.version,
                pkg.chip.as_deref().unwrap_or_default(),
                wanted_chip.unwrap_or(&target.arch)
            );
            continue;
        }

        tracing::info!("Found {} version {}", pkg.kind, pkg.version);
        return Ok(Some(pkg));
    }

    if constraint.is_some_and(DependencyConstraint::ignores_applicability_failures) {
        return Ok(None);
    }
    if any_wrong_language && all_wrong_language {
        return Ok(None);
    }

    Err(InstallError::Resolution { id: id.to_string() })
}

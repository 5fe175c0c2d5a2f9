//! End-to-end provisioning: channel, manifest, then the root packages.

use vsprov_schema::{Channel, Manifest};

use crate::error::InstallError;
use crate::io::download::verify_bytes;
use crate::process::Launcher;
use crate::resolver::{Mode, Report, Session};
use crate::settings::{ManifestTrust, Settings};
use crate::transport::Transport;

/// Fetch the channel and the manifest it points at.
pub async fn load_manifest(
    settings: &Settings,
    transport: &dyn Transport,
) -> Result<Manifest, InstallError> {
    let raw = transport.get(&settings.channel_url).await?;
    let channel =
        Channel::from_slice(&raw).map_err(|source| InstallError::Decode {
            what: "channel",
            source,
        })?;

    tracing::info!("Searching the channel for item: {}", settings.manifest_id);
    let item = channel
        .find_item(&settings.manifest_id)
        .ok_or_else(|| InstallError::Resolution {
            id: settings.manifest_id.clone(),
        })?;
    let payload = item.payloads.first().ok_or_else(|| {
        InstallError::config(format!("Channel item {} has no payloads", item.id))
    })?;
    tracing::info!("Found manifest version {} at {}", item.version, payload.url);

    let raw = transport.get(&payload.url).await?;
    match settings.manifest_trust {
        ManifestTrust::ChannelDigest => {
            verify_bytes(&raw, payload, settings.enforce_payload_size)?;
        }
        ManifestTrust::Unverified => {
            tracing::warn!("Using manifest from {} without verifying its digest", payload.url);
        }
    }

    Manifest::from_slice(&raw).map_err(|source| InstallError::Decode {
        what: "manifest",
        source,
    })
}

/// Install (or plan) every root package in `settings.packages`, in order.
pub async fn provision(
    settings: &Settings,
    transport: &dyn Transport,
    launcher: &dyn Launcher,
    mode: Mode,
) -> Result<Report, InstallError> {
    let manifest = load_manifest(settings, transport).await?;
    tracing::info!("Manifest lists {} packages", manifest.packages.len());

    let mut session = Session::new(&manifest, settings, transport, launcher, mode);
    for root in &settings.packages {
        session.install(root, None).await?;
    }

    tracing::info!("Done");
    Ok(session.finish())
}

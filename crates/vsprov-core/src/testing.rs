//! In-memory collaborators for exercising the engine without network or
//! real installers.

use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use vsprov_schema::{InstallParams, ManifestPackage, PackageId, PackageType, Payload};

use crate::error::InstallError;
use crate::process::Launcher;
use crate::transport::{ByteStream, Transport};

pub(crate) fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Serves fixed bodies by URL and records every request.
#[derive(Default)]
pub(crate) struct MemoryTransport {
    bodies: HashMap<String, Vec<u8>>,
    pub(crate) requests: Mutex<Vec<String>>,
}

impl MemoryTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn serve(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.bodies.insert(url.to_string(), body.into());
        self
    }

    pub(crate) fn requested(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn lookup(&self, url: &str) -> Result<Vec<u8>, InstallError> {
        self.requests.lock().unwrap().push(url.to_string());
        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| InstallError::transport(url, "404 Not Found"))
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn get(&self, url: &str) -> Result<Bytes, InstallError> {
        self.lookup(url).map(Bytes::from)
    }

    async fn stream(&self, url: &str) -> Result<ByteStream, InstallError> {
        let body = self.lookup(url)?;
        // Split into a few chunks so the fetcher sees a real stream.
        let chunks: Vec<Result<Bytes, InstallError>> = body
            .chunks(7)
            .map(|c| Ok(Bytes::copy_from_slice(c)))
            .collect();
        Ok(futures::stream::iter(chunks).boxed())
    }
}

/// One recorded installer launch.
#[derive(Debug, Clone)]
pub(crate) struct Invocation {
    pub(crate) program: String,
    pub(crate) args: Vec<String>,
    /// Files present in the working directory when the installer started.
    pub(crate) files: Vec<String>,
}

/// Records launches and answers with configurable exit codes.
#[derive(Default)]
pub(crate) struct RecordingLauncher {
    default_code: i32,
    overrides: Vec<(String, i32)>,
    pub(crate) calls: Mutex<Vec<Invocation>>,
}

impl RecordingLauncher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_code(code: i32) -> Self {
        Self {
            default_code: code,
            ..Self::default()
        }
    }

    /// Answer `code` for any program whose path contains `needle`.
    pub(crate) fn code_for(mut self, needle: &str, code: i32) -> Self {
        self.overrides.push((needle.to_string(), code));
        self
    }

    pub(crate) fn invocations(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Launcher for RecordingLauncher {
    async fn launch(
        &self,
        dir: &Path,
        program: &str,
        args: &[String],
    ) -> Result<Option<i32>, InstallError> {
        let mut files: Vec<String> = std::fs::read_dir(dir)?
            .filter_map(Result::ok)
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        files.sort();

        self.calls.lock().unwrap().push(Invocation {
            program: program.to_string(),
            args: args.to_vec(),
            files,
        });

        let code = self
            .overrides
            .iter()
            .find(|(needle, _)| program.contains(needle.as_str()))
            .map_or(self.default_code, |(_, code)| *code);
        Ok(Some(code))
    }
}

/// A package with no payloads and no dependencies.
pub(crate) fn meta(id: &str) -> ManifestPackage {
    ManifestPackage {
        id: PackageId::new(id),
        version: "1.0".to_string(),
        kind: PackageType::Other("Component".to_string()),
        ..ManifestPackage::default()
    }
}

/// An executable package whose single payload is served at `url`.
pub(crate) fn exe(id: &str, file: &str, url: &str, body: &[u8]) -> ManifestPackage {
    ManifestPackage {
        id: PackageId::new(id),
        version: "1.0".to_string(),
        kind: PackageType::Exe,
        payloads: vec![payload(file, url, body)],
        install_params: Some(InstallParams {
            file_name: "[Payload]".to_string(),
            parameters: String::new(),
        }),
        ..ManifestPackage::default()
    }
}

pub(crate) fn payload(file: &str, url: &str, body: &[u8]) -> Payload {
    Payload {
        file_name: file.to_string(),
        sha256: sha256_hex(body).into(),
        size: Some(body.len() as u64),
        url: url.to_string(),
    }
}

pub(crate) fn depends(mut pkg: ManifestPackage, deps: &[&str]) -> ManifestPackage {
    for dep in deps {
        pkg.dependencies
            .insert(PackageId::new(*dep), Default::default());
    }
    pkg
}

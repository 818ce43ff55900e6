//! Resolve, download, save and optionally rename one extension package.
//!
//! The sequence is fixed: resolve the ID, build the update URL, GET it, write
//! the body to disk and, when naming from the manifest, read the file back and
//! rename it. Manifest problems are recovered (ID-based name); network and
//! filesystem problems are returned as errors.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

use crate::checksum::Sha256Hex;
use crate::config::CrxdlConfig;
use crate::extension_id::{self, ExtensionId};
use crate::http::{self, HttpOptions};
use crate::manifest::{self, ManifestError};
use crate::naming;
use crate::request::DownloadRequest;

/// Where the package ends up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Exactly this path; never renamed.
    Explicit(PathBuf),
    /// `<ID>.crx` in the output directory.
    FromId,
    /// `<ID>.crx` first, then renamed to `<manifest name>.crx`.
    FromManifestName,
}

#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Extension ID or Web Store URL.
    pub id_or_url: String,
    pub target: OutputTarget,
    /// Directory for ID- and name-based files. Empty means the current directory.
    pub output_dir: PathBuf,
    /// Report the SHA-256 of the package.
    pub checksum: bool,
    /// Reject the package (and remove the written file) unless its SHA-256 matches.
    pub expected_sha256: Option<Sha256Hex>,
}

impl FetchOptions {
    pub fn new(id_or_url: impl Into<String>, target: OutputTarget) -> Self {
        Self {
            id_or_url: id_or_url.into(),
            target,
            output_dir: PathBuf::new(),
            checksum: false,
            expected_sha256: None,
        }
    }
}

/// How the final filename was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameSource {
    Explicit,
    Id,
    ManifestName,
    /// Naming from the manifest was requested but the name was unusable.
    IdFallback,
}

/// Progress notifications, in the order they happen.
#[derive(Debug)]
pub enum FetchEvent<'a> {
    Downloading { url: &'a Url, path: &'a Path },
    Saved { path: &'a Path, bytes: u64 },
    Renamed { path: &'a Path },
    /// The manifest could not be read; the file keeps its ID-based name.
    NameFallback { error: &'a ManifestError },
    Checksum { path: &'a Path, sha256: &'a Sha256Hex },
}

#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub id: ExtensionId,
    pub url: Url,
    pub path: PathBuf,
    pub bytes: u64,
    pub name_source: NameSource,
    pub sha256: Option<Sha256Hex>,
}

pub struct Fetcher {
    cfg: CrxdlConfig,
}

impl Fetcher {
    pub fn new(cfg: CrxdlConfig) -> Self {
        Self { cfg }
    }

    pub fn fetch<F>(&self, opts: &FetchOptions, mut on_event: F) -> Result<FetchOutcome>
    where
        F: FnMut(FetchEvent<'_>),
    {
        let id = extension_id::resolve(&opts.id_or_url);
        let url = DownloadRequest::new(&id, &self.cfg)
            .to_url(&self.cfg.update_url)
            .with_context(|| format!("invalid update URL {:?}", self.cfg.update_url))?;

        let mut path = match &opts.target {
            OutputTarget::Explicit(p) => p.clone(),
            OutputTarget::FromId | OutputTarget::FromManifestName => {
                opts.output_dir.join(naming::id_file_name(&id))
            }
        };

        tracing::info!("downloading {} (id={}) to {}", url, id, path.display());
        on_event(FetchEvent::Downloading {
            url: &url,
            path: &path,
        });

        let body = http::get(url.as_str(), &HttpOptions::from(&self.cfg))
            .with_context(|| format!("download extension {}", id))?;
        fs::write(&path, &body).with_context(|| format!("write {}", path.display()))?;
        let bytes = body.len() as u64;
        let digest = (opts.checksum || opts.expected_sha256.is_some())
            .then(|| Sha256Hex::of(&body));
        drop(body);
        on_event(FetchEvent::Saved { path: &path, bytes });

        if let (Some(expected), Some(actual)) = (&opts.expected_sha256, &digest) {
            if expected != actual {
                fs::remove_file(&path)
                    .with_context(|| format!("remove mismatched {}", path.display()))?;
                bail!(
                    "SHA-256 mismatch for extension {}: expected {}, got {}",
                    id,
                    expected,
                    actual
                );
            }
            tracing::debug!("sha256 of {} matches {}", path.display(), expected);
        }

        let name_source = match &opts.target {
            OutputTarget::Explicit(_) => NameSource::Explicit,
            OutputTarget::FromId => NameSource::Id,
            OutputTarget::FromManifestName => {
                let (renamed, source) = rename_from_manifest(&path, &id, &mut on_event)?;
                path = renamed;
                source
            }
        };

        if let Some(sha256) = &digest {
            on_event(FetchEvent::Checksum {
                path: &path,
                sha256,
            });
        }

        tracing::info!("saved {} ({} bytes)", path.display(), bytes);
        Ok(FetchOutcome {
            id,
            url,
            path,
            bytes,
            name_source,
            sha256: digest,
        })
    }
}

/// Reads the saved package back and renames it after the manifest name,
/// or to `<ID>.crx` if the manifest cannot be read.
fn rename_from_manifest<F>(
    path: &Path,
    id: &ExtensionId,
    on_event: &mut F,
) -> Result<(PathBuf, NameSource)>
where
    F: FnMut(FetchEvent<'_>),
{
    let data = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let dir = path.parent().unwrap_or_else(|| Path::new(""));

    let (file_name, source, report_rename) = match manifest::inspect(&data) {
        Ok(m) => {
            let usable = m
                .name
                .as_deref()
                .is_some_and(|n| !naming::sanitize_extension_name(n).is_empty());
            let source = if usable {
                NameSource::ManifestName
            } else {
                NameSource::IdFallback
            };
            (
                naming::manifest_file_name(m.name.as_deref(), id),
                source,
                true,
            )
        }
        Err(error) => {
            tracing::warn!("could not read manifest of {}: {}", path.display(), error);
            on_event(FetchEvent::NameFallback { error: &error });
            (naming::id_file_name(id), NameSource::IdFallback, false)
        }
    };

    let final_path = dir.join(file_name);
    if final_path != path {
        fs::rename(path, &final_path).with_context(|| {
            format!("rename {} to {}", path.display(), final_path.display())
        })?;
        tracing::debug!("renamed {} to {}", path.display(), final_path.display());
    }
    if report_rename {
        on_event(FetchEvent::Renamed { path: &final_path });
    }
    Ok((final_path, source))
}

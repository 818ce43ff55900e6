//! Reading `manifest.json` out of a downloaded CRX package.

use serde::Deserialize;
use std::collections::HashMap;
use std::io::{Cursor, Read};
use thiserror::Error;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::crx::{self, CrxError};

const MANIFEST_ENTRY: &str = "manifest.json";
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
/// Upper bound for any JSON entry read out of a package.
const MAX_ENTRY_BYTES: u64 = 4 * 1024 * 1024;

/// Why the extension name could not be read. All variants are recoverable:
/// the caller falls back to the ID-based filename.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error(transparent)]
    Crx(#[from] CrxError),
    #[error("not a valid zip archive: {0}")]
    Zip(#[from] ZipError),
    #[error("there is no item named '{}' in the archive", MANIFEST_ENTRY)]
    Missing,
    #[error("'{name}' is too large ({size} bytes)")]
    TooLarge { name: String, size: u64 },
    #[error("invalid manifest.json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Fields of `manifest.json` used for naming and logging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Manifest {
    pub name: Option<String>,
    pub version: Option<String>,
    pub default_locale: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LocaleMessage {
    message: String,
}

/// Parses the manifest of a CRX (or plain zip) held in memory.
///
/// A `__MSG_key__` name is replaced by the message from the default locale
/// when one can be found; otherwise the raw name is kept.
pub fn inspect(data: &[u8]) -> Result<Manifest, ManifestError> {
    let payload = crx::zip_payload(data)?;
    let mut archive = ZipArchive::new(Cursor::new(payload))?;

    let raw = read_entry(&mut archive, MANIFEST_ENTRY)?.ok_or(ManifestError::Missing)?;
    let mut manifest: Manifest = serde_json::from_slice(strip_bom(&raw))?;

    if let Some(key) = manifest.name.as_deref().and_then(message_key).map(str::to_owned) {
        match localized_message(&mut archive, manifest.default_locale.as_deref(), &key) {
            Some(message) => manifest.name = Some(message),
            None => tracing::debug!("no locale message for {:?}, keeping raw name", key),
        }
    }

    tracing::debug!(
        "manifest: name={:?} version={:?}",
        manifest.name,
        manifest.version
    );
    Ok(manifest)
}

/// Reads a whole entry, refusing anything over `MAX_ENTRY_BYTES` whether the
/// archive declares it or the decompressed stream turns out that long.
fn read_entry(
    archive: &mut ZipArchive<Cursor<&[u8]>>,
    name: &str,
) -> Result<Option<Vec<u8>>, ManifestError> {
    let mut file = match archive.by_name(name) {
        Ok(f) => f,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let too_large = |size| ManifestError::TooLarge {
        name: name.to_string(),
        size,
    };
    if file.size() > MAX_ENTRY_BYTES {
        return Err(too_large(file.size()));
    }
    let mut buf = Vec::new();
    file.by_ref()
        .take(MAX_ENTRY_BYTES + 1)
        .read_to_end(&mut buf)
        .map_err(ZipError::from)?;
    if buf.len() as u64 > MAX_ENTRY_BYTES {
        return Err(too_large(buf.len() as u64));
    }
    Ok(Some(buf))
}

fn strip_bom(data: &[u8]) -> &[u8] {
    data.strip_prefix(UTF8_BOM).unwrap_or(data)
}

/// `__MSG_appName__` -> `appName`.
fn message_key(name: &str) -> Option<&str> {
    name.strip_prefix("__MSG_")?
        .strip_suffix("__")
        .filter(|k| !k.is_empty())
}

fn localized_message(
    archive: &mut ZipArchive<Cursor<&[u8]>>,
    locale: Option<&str>,
    key: &str,
) -> Option<String> {
    let path = format!("_locales/{}/messages.json", locale?);
    let raw = read_entry(archive, &path).ok()??;
    let messages: HashMap<String, LocaleMessage> =
        serde_json::from_slice(strip_bom(&raw)).ok()?;
    messages
        .into_iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, m)| m.message)
}

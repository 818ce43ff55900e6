//! Fixture packages: zip archives with optional CRX3 header.

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;

/// Builds a zip archive holding `entries` (name, UTF-8 contents).
pub fn zip_with(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut w = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let opts = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    for (name, body) in entries {
        w.start_file(*name, opts).unwrap();
        w.write_all(body.as_bytes()).unwrap();
    }
    w.finish().unwrap().into_inner()
}

/// Wraps a zip payload in a CRX3 container with a dummy signing header.
pub fn crx3(zip: &[u8]) -> Vec<u8> {
    let header = [0x12u8, 0x04, 0xde, 0xad, 0xbe, 0xef];
    let mut out = b"Cr24".to_vec();
    out.extend_from_slice(&3u32.to_le_bytes());
    out.extend_from_slice(&(header.len() as u32).to_le_bytes());
    out.extend_from_slice(&header);
    out.extend_from_slice(zip);
    out
}

/// A CRX3 package whose manifest is `manifest_json`.
pub fn crx_with_manifest(manifest_json: &str) -> Vec<u8> {
    crx3(&zip_with(&[
        ("manifest.json", manifest_json),
        ("background.js", "chrome.runtime.onInstalled.addListener(() => {});"),
    ]))
}

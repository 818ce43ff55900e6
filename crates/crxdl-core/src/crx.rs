//! CRX container header.
//!
//! ```text
//! CRX2: "Cr24" | version=2 (u32 LE) | key_len (u32 LE) | sig_len (u32 LE) | key | sig | zip
//! CRX3: "Cr24" | version=3 (u32 LE) | header_len (u32 LE) | header (protobuf) | zip
//! ```
//!
//! The signing header is skipped, never verified.

use thiserror::Error;

pub const MAGIC: &[u8; 4] = b"Cr24";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CrxError {
    #[error("CRX header is truncated ({len} bytes, need {needed})")]
    Truncated { len: usize, needed: usize },
    #[error("unsupported CRX version {0}")]
    UnsupportedVersion(u32),
}

/// Returns the zip payload of a CRX package.
///
/// Data without the `Cr24` magic is returned unchanged so a plain zip also works.
pub fn zip_payload(data: &[u8]) -> Result<&[u8], CrxError> {
    if !data.starts_with(MAGIC) {
        return Ok(data);
    }
    let version = read_u32(data, 4)?;
    let header_end = match version {
        2 => {
            let key_len = read_u32(data, 8)? as usize;
            let sig_len = read_u32(data, 12)? as usize;
            16usize.saturating_add(key_len).saturating_add(sig_len)
        }
        3 => 12usize.saturating_add(read_u32(data, 8)? as usize),
        v => return Err(CrxError::UnsupportedVersion(v)),
    };
    if header_end > data.len() {
        return Err(CrxError::Truncated {
            len: data.len(),
            needed: header_end,
        });
    }
    tracing::debug!("CRX{} header: {} bytes", version, header_end);
    Ok(&data[header_end..])
}

fn read_u32(data: &[u8], at: usize) -> Result<u32, CrxError> {
    let needed = at + 4;
    let bytes = data.get(at..needed).ok_or(CrxError::Truncated {
        len: data.len(),
        needed,
    })?;
    Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

//! Output filename derivation.

use crate::extension_id::ExtensionId;

pub const CRX_EXTENSION: &str = "crx";

/// Keeps alphanumerics, spaces, `-` and `_`, drops everything else, then
/// trims trailing whitespace. Leading spaces are kept.
///
/// "Alphanumeric" is Unicode `Alphabetic` or `Numeric`, so spacing vowel
/// signs such as Devanagari `ि` (U+093F, `Other_Alphabetic`) survive. A
/// general-category `L*`/`N*` test would drop them and turn `कि` into `क`;
/// keeping them leaves Indic names readable and is still filename-safe.
pub fn sanitize_extension_name(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|&c| c.is_alphanumeric() || c == ' ' || c == '-' || c == '_')
        .collect();
    kept.trim_end().to_string()
}

/// `<ID>.crx`
pub fn id_file_name(id: &ExtensionId) -> String {
    format!("{}.{}", id, CRX_EXTENSION)
}

/// `<sanitized name>.crx`, or `<ID>.crx` when the name is missing or
/// sanitizes to nothing.
pub fn manifest_file_name(name: Option<&str>, id: &ExtensionId) -> String {
    let stem = name.map(sanitize_extension_name).unwrap_or_default();
    if stem.is_empty() {
        return id_file_name(id);
    }
    format!("{}.{}", stem, CRX_EXTENSION)
}

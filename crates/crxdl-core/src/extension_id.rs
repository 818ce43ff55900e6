//! Extension ID resolution from a bare ID or a Web Store URL.

use std::fmt;

/// Length of a canonical Chrome extension ID.
const CANONICAL_ID_LEN: usize = 32;

/// A Chrome Web Store extension ID as resolved from user input.
///
/// Not validated: anything the user passes that is not a URL is used as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExtensionId(String);

impl ExtensionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the ID has the canonical shape: 32 characters in `a`..=`p`.
    pub fn is_canonical(&self) -> bool {
        self.0.len() == CANONICAL_ID_LEN && self.0.bytes().all(|b| (b'a'..=b'p').contains(&b))
    }
}

impl fmt::Display for ExtensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolves user input to an extension ID.
///
/// The ID is the last non-empty path segment, ignoring query and fragment.
/// Absolute URLs are parsed with `url`; anything else (a bare ID, or a
/// schemeless `chromewebstore.google.com/detail/name/<ID>`) is split on `/`
/// as a relative path. If no usable segment is left, the raw input is the ID.
pub fn resolve(input: &str) -> ExtensionId {
    let id = last_path_segment(input).unwrap_or_else(|| input.to_string());
    let id = ExtensionId(id);
    if !id.is_canonical() {
        tracing::debug!("extension id {:?} is not a canonical Web Store id", id.as_str());
    }
    id
}

fn last_path_segment(input: &str) -> Option<String> {
    let segment = match url::Url::parse(input) {
        Ok(parsed) => last_segment(parsed.path())?.to_string(),
        Err(_) => last_segment(input.split(['?', '#']).next().unwrap_or(input))?.to_string(),
    };
    Some(segment)
}

fn last_segment(path: &str) -> Option<&str> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .last()
        .filter(|s| *s != "." && *s != "..")
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "cjpalhdlnbpafiamejdnhcphjbkeiagm";

    #[test]
    fn bare_id_is_unchanged() {
        assert_eq!(resolve(ID).as_str(), ID);
        assert_eq!(resolve("not a url at all").as_str(), "not a url at all");
    }

    #[test]
    fn store_url_takes_last_segment() {
        let legacy = format!("https://chrome.google.com/webstore/detail/ublock-origin/{ID}");
        assert_eq!(resolve(&legacy).as_str(), ID);
        let current = format!("https://chromewebstore.google.com/detail/ublock-origin/{ID}");
        assert_eq!(resolve(&current).as_str(), ID);
    }

    #[test]
    fn query_fragment_and_trailing_slash_ignored() {
        let url = format!("https://chromewebstore.google.com/detail/x/{ID}/?hl=en#reviews");
        assert_eq!(resolve(&url).as_str(), ID);
    }

    #[test]
    fn url_without_segment_falls_back_to_input() {
        assert_eq!(
            resolve("https://chromewebstore.google.com/").as_str(),
            "https://chromewebstore.google.com/"
        );
    }

    #[test]
    fn schemeless_store_path_takes_last_segment() {
        let input = format!("chromewebstore.google.com/detail/ublock-origin/{ID}");
        assert_eq!(resolve(&input).as_str(), ID);
        let with_query = format!("chrome.google.com/webstore/detail/x/{ID}/?hl=en");
        assert_eq!(resolve(&with_query).as_str(), ID);
    }

    #[test]
    fn bare_id_with_query_drops_query() {
        assert_eq!(resolve(&format!("{ID}?hl=en")).as_str(), ID);
    }

    #[test]
    fn relative_path_without_segment_falls_back_to_input() {
        assert_eq!(resolve("/").as_str(), "/");
        assert_eq!(resolve("../").as_str(), "../");
    }

    #[test]
    fn canonical_shape() {
        assert!(ExtensionId(ID.to_string()).is_canonical());
        assert!(!ExtensionId("abc".to_string()).is_canonical());
        assert!(!ExtensionId("z".repeat(32)).is_canonical());
    }
}

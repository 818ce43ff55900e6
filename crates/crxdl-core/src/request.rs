//! Download URL construction for the Web Store update endpoint.

use url::Url;

use crate::config::CrxdlConfig;
use crate::extension_id::ExtensionId;

/// Update service that answers `response=redirect` with a 302 to the CRX binary.
pub const DEFAULT_UPDATE_URL: &str = "https://clients2.google.com/service/update2/crx";
/// Chrome version reported to the update service.
pub const DEFAULT_PROD_VERSION: &str = "133.0";
/// Package formats the client accepts.
pub const DEFAULT_ACCEPT_FORMAT: &str = "crx2,crx3";

/// Parameters of the single update request for one extension.
#[derive(Debug, Clone)]
pub struct DownloadRequest<'a> {
    pub id: &'a ExtensionId,
    pub prod_version: &'a str,
    pub accept_format: &'a str,
}

impl<'a> DownloadRequest<'a> {
    pub fn new(id: &'a ExtensionId, cfg: &'a CrxdlConfig) -> Self {
        Self {
            id,
            prod_version: &cfg.prod_version,
            accept_format: &cfg.accept_format,
        }
    }

    /// Builds the request URL on top of `base`.
    ///
    /// Parameters are appended in a fixed order and form-urlencoded one value
    /// at a time, so `x=id=<ID>&uc` goes out as `x=id%3D<ID>%26uc`.
    pub fn to_url(&self, base: &str) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(base)?;
        url.query_pairs_mut()
            .append_pair("response", "redirect")
            .append_pair("prodversion", self.prod_version)
            .append_pair("acceptformat", self.accept_format)
            .append_pair("x", &format!("id={}&uc", self.id));
        Ok(url)
    }
}

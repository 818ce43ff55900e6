//! Single blocking HTTP GET that returns the whole response body.

use anyhow::{Context, Result};
use std::time::Duration;

use crate::config::CrxdlConfig;

/// Transfer settings taken from config.
#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub max_redirections: u32,
    pub connect_timeout: Option<Duration>,
    pub timeout: Option<Duration>,
    pub user_agent: Option<String>,
}

impl From<&CrxdlConfig> for HttpOptions {
    fn from(cfg: &CrxdlConfig) -> Self {
        Self {
            max_redirections: cfg.max_redirections,
            connect_timeout: cfg.connect_timeout_secs.map(Duration::from_secs),
            timeout: cfg.timeout_secs.map(Duration::from_secs),
            user_agent: cfg.user_agent.clone(),
        }
    }
}

/// Performs a GET on `url`, following redirects, and returns the body.
///
/// Runs in the current thread. Fails on transport errors and on a final
/// status outside 2xx.
pub fn get(url: &str, opts: &HttpOptions) -> Result<Vec<u8>> {
    let mut body = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url).context("invalid URL")?;
    easy.follow_location(true)?;
    easy.max_redirections(opts.max_redirections)?;
    if let Some(t) = opts.connect_timeout {
        easy.connect_timeout(t)?;
    }
    if let Some(t) = opts.timeout {
        easy.timeout(t)?;
    }
    if let Some(ua) = &opts.user_agent {
        easy.useragent(ua)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform().context("GET request failed")?;
    }

    let code = easy.response_code().context("no response code")?;
    if !(200..300).contains(&code) {
        anyhow::bail!("GET {} returned HTTP {}", url, code);
    }
    if let Ok(Some(effective)) = easy.effective_url() {
        if effective != url {
            tracing::debug!("redirected to {}", effective);
        }
    }

    tracing::debug!("GET {} -> HTTP {} ({} bytes)", url, code, body.len());
    Ok(body)
}

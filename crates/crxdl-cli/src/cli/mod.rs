//! CLI for the crxdl Chrome extension downloader.

mod report;

use anyhow::Result;
use clap::builder::NonEmptyStringValueParser;
use clap::Parser;
use crxdl_core::checksum::Sha256Hex;
use crxdl_core::config;
use crxdl_core::{FetchOptions, Fetcher, OutputTarget};
use std::path::PathBuf;

use report::Console;

/// Download a Chrome extension package (.crx) from the Chrome Web Store.
#[derive(Debug, Parser)]
#[command(name = "crxdl", version)]
#[command(about = "Chrome extension downloader", long_about = None)]
pub struct Cli {
    /// ID or full URL of the extension in Chrome Web Store.
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    pub id_or_url: String,

    /// Suppress all messages.
    #[arg(short, long)]
    pub quiet: bool,

    /// Where to save the .crx file.
    #[arg(short, long, value_name = "PATH", conflicts_with = "use_name")]
    pub output_file: Option<PathBuf>,

    /// Save the .crx file using the extension name from its manifest.
    #[arg(short = 'n', long)]
    pub use_name: bool,

    /// Print the SHA-256 of the saved file.
    #[arg(short, long)]
    pub checksum: bool,

    /// Fail and delete the download unless its SHA-256 matches HEX.
    #[arg(long, value_name = "HEX")]
    pub expect_sha256: Option<Sha256Hex>,

    /// Chrome version reported to the update service (overrides config).
    #[arg(long, value_name = "VERSION")]
    pub prod_version: Option<String>,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        Cli::parse().run()
    }

    pub fn target(&self) -> OutputTarget {
        match (&self.output_file, self.use_name) {
            (Some(path), _) => OutputTarget::Explicit(path.clone()),
            (None, true) => OutputTarget::FromManifestName,
            (None, false) => OutputTarget::FromId,
        }
    }

    pub fn run(self) -> Result<()> {
        let mut cfg = config::load()?;
        if let Some(version) = &self.prod_version {
            cfg.prod_version = version.clone();
        }
        tracing::debug!("config: {:?}", cfg);

        let opts = FetchOptions {
            checksum: self.checksum,
            expected_sha256: self.expect_sha256.clone(),
            ..FetchOptions::new(self.id_or_url.as_str(), self.target())
        };
        let mut console = Console::new(self.quiet);

        Fetcher::new(cfg).fetch(&opts, |event| console.event(&event))?;
        console.success();
        Ok(())
    }
}

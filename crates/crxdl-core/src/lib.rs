pub mod config;
pub mod logging;

pub mod checksum;
pub mod crx;
pub mod extension_id;
pub mod fetcher;
pub mod http;
pub mod manifest;
pub mod naming;
pub mod request;

pub use extension_id::ExtensionId;
pub use fetcher::{FetchEvent, FetchOptions, FetchOutcome, Fetcher, NameSource, OutputTarget};

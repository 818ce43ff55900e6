//! Console messages for a fetch. Everything goes to stdout and nothing is
//! printed in quiet mode.

use crxdl_core::FetchEvent;
use std::io::{self, Write};

pub struct Console<W: Write = io::Stdout> {
    quiet: bool,
    out: W,
}

impl Console {
    pub fn new(quiet: bool) -> Self {
        Self::with_writer(quiet, io::stdout())
    }
}

impl<W: Write> Console<W> {
    pub fn with_writer(quiet: bool, out: W) -> Self {
        Self { quiet, out }
    }

    pub fn event(&mut self, event: &FetchEvent<'_>) {
        if let Some(line) = message(event) {
            self.print(&line);
        }
    }

    pub fn success(&mut self) {
        self.print("Success!");
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }

    fn print(&mut self, line: &str) {
        if self.quiet {
            return;
        }
        if let Err(e) = writeln!(self.out, "{}", line) {
            tracing::warn!("could not write to console: {}", e);
        }
    }
}

/// The user-facing line for an event, if it has one.
pub fn message(event: &FetchEvent<'_>) -> Option<String> {
    match event {
        FetchEvent::Downloading { url, path } => {
            Some(format!("Downloading {} to {} ...", url, path.display()))
        }
        FetchEvent::Saved { .. } => None,
        FetchEvent::Renamed { path } => Some(format!("Renamed to: {}", path.display())),
        FetchEvent::NameFallback { error } => Some(format!(
            "Warning: Could not extract extension name from manifest: {}. Using ID instead.",
            error
        )),
        FetchEvent::Checksum { sha256, .. } => Some(format!("SHA-256: {}", sha256)),
    }
}

//! Showing a plate's image-search page

use std::io::Write;

use bcsort_types::{Error, Result};

/// Something that can display a search page to the operator.
///
/// One instance is created per run and reused for every plate.
pub trait Browser {
    fn show(&mut self, url: &str) -> Result<()>;
}

/// Opens pages in the system's default web browser
#[derive(Debug, Default)]
pub struct SystemBrowser;

impl Browser for SystemBrowser {
    fn show(&mut self, url: &str) -> Result<()> {
        webbrowser::open(url).map_err(|e| Error::Browser(format!("failed to open {}: {}", url, e)))
    }
}

/// Prints the URL instead of opening it, for headless sessions
pub struct ConsoleBrowser<W> {
    out: W,
}

impl<W: Write> ConsoleBrowser<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl ConsoleBrowser<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> Browser for ConsoleBrowser<W> {
    fn show(&mut self, url: &str) -> Result<()> {
        writeln!(self.out, "{}", url)?;
        Ok(())
    }
}

/// Search URL for `plate`, with the plate percent-encoded
pub fn search_url(base: &str, plate: &str) -> String {
    format!("{}{}", base, urlencoding::encode(plate.trim()))
}

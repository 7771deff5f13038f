// ABOUTME: Public entry point: a reusable reader that opens a fresh ParseSession per feed.
// ABOUTME: Holds only immutable options, so one reader can be shared across threads.

use std::io::BufRead;

use crate::error::ReaderError;
use crate::models::Channel;
use crate::options::{ReaderBuilder, ReaderOptions};
use crate::session::ParseSession;

/// Reads podcast RSS feeds into [`Channel`] values.
#[derive(Debug, Clone, Default)]
pub struct PodcastReader {
    options: ReaderOptions,
}

impl PodcastReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> ReaderBuilder {
        ReaderBuilder::new()
    }

    pub fn with_options(options: ReaderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// Reads the feed at `uri`: a local path, a `file://` URL, or an `http(s)://` URL.
    pub fn read(&self, uri: &str) -> Result<Channel, ReaderError> {
        ParseSession::new(&self.options).parse(uri)
    }

    /// Reads a feed from an already opened stream. `label` is reported in errors.
    pub fn read_from<R: BufRead>(&self, source: R, label: &str) -> Result<Channel, ReaderError> {
        ParseSession::new(&self.options).parse_reader(source, label)
    }

    /// Reads a feed held in memory.
    pub fn read_bytes(&self, data: &[u8], label: &str) -> Result<Channel, ReaderError> {
        self.read_from(data, label)
    }
}

// ABOUTME: Streaming RSS 2.0 podcast reader with iTunes extension support.
// ABOUTME: Turns one forward pass of XML events into an immutable Channel graph.

pub mod accumulator;
pub mod builders;
pub mod catalog;
pub mod dispatcher;
pub mod duration_parse;
pub mod error;
pub mod models;
pub mod navigation;
pub mod options;
pub mod reader;
pub mod session;
pub mod source;
pub mod time_parse;

pub use catalog::{canonical_key, Element, Tag};
pub use duration_parse::parse_duration_seconds;
pub use error::{FailureKind, IoFailure, ReaderError, SemanticValidationError, StructuralError};
pub use models::{
    is_explicit, Channel, Enclosure, Image, Item, ItunesCategory, ItunesChannelData,
    ItunesItemData, ItunesOwner,
};
pub use options::{ReaderBuilder, ReaderOptions};
pub use reader::PodcastReader;
pub use session::ParseSession;
pub use time_parse::parse_rss_date;

/// Reads the feed at `uri` with default options.
pub fn read_feed(uri: &str) -> Result<Channel, ReaderError> {
    PodcastReader::new().read(uri)
}

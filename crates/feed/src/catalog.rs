// ABOUTME: Closed catalog of the RSS 2.0 and iTunes tags the reader understands.
// ABOUTME: Maps canonical "prefix:local" keys to Element tokens; everything else is Unrecognized.

use std::fmt;

/// Separator between a namespace prefix and a local name in a canonical key.
pub const PREFIX_SEPARATOR: char = ':';

/// A recognized tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    Rss,
    Channel,
    Title,
    Description,
    Link,
    PubDate,
    LastBuildDate,
    Language,
    Copyright,
    Generator,
    Image,
    Item,
    Url,
    Guid,
    Author,
    Category,
    Enclosure,
    ItunesImage,
    ItunesCategory,
    ItunesExplicit,
    ItunesAuthor,
    ItunesOwner,
    ItunesName,
    ItunesEmail,
    ItunesTitle,
    ItunesType,
    ItunesNewFeedUrl,
    ItunesBlock,
    ItunesComplete,
    ItunesEpisode,
    ItunesSeason,
    ItunesEpisodeType,
    ItunesDuration,
}

impl Element {
    pub const ALL: [Element; 33] = [
        Element::Rss,
        Element::Channel,
        Element::Title,
        Element::Description,
        Element::Link,
        Element::PubDate,
        Element::LastBuildDate,
        Element::Language,
        Element::Copyright,
        Element::Generator,
        Element::Image,
        Element::Item,
        Element::Url,
        Element::Guid,
        Element::Author,
        Element::Category,
        Element::Enclosure,
        Element::ItunesImage,
        Element::ItunesCategory,
        Element::ItunesExplicit,
        Element::ItunesAuthor,
        Element::ItunesOwner,
        Element::ItunesName,
        Element::ItunesEmail,
        Element::ItunesTitle,
        Element::ItunesType,
        Element::ItunesNewFeedUrl,
        Element::ItunesBlock,
        Element::ItunesComplete,
        Element::ItunesEpisode,
        Element::ItunesSeason,
        Element::ItunesEpisodeType,
        Element::ItunesDuration,
    ];

    /// The tag name as it is written in feeds.
    pub fn name(self) -> &'static str {
        match self {
            Element::Rss => "rss",
            Element::Channel => "channel",
            Element::Title => "title",
            Element::Description => "description",
            Element::Link => "link",
            Element::PubDate => "pubDate",
            Element::LastBuildDate => "lastBuildDate",
            Element::Language => "language",
            Element::Copyright => "copyright",
            Element::Generator => "generator",
            Element::Image => "image",
            Element::Item => "item",
            Element::Url => "url",
            Element::Guid => "guid",
            Element::Author => "author",
            Element::Category => "category",
            Element::Enclosure => "enclosure",
            Element::ItunesImage => "itunes:image",
            Element::ItunesCategory => "itunes:category",
            Element::ItunesExplicit => "itunes:explicit",
            Element::ItunesAuthor => "itunes:author",
            Element::ItunesOwner => "itunes:owner",
            Element::ItunesName => "itunes:name",
            Element::ItunesEmail => "itunes:email",
            Element::ItunesTitle => "itunes:title",
            Element::ItunesType => "itunes:type",
            Element::ItunesNewFeedUrl => "itunes:new-feed-url",
            Element::ItunesBlock => "itunes:block",
            Element::ItunesComplete => "itunes:complete",
            Element::ItunesEpisode => "itunes:episode",
            Element::ItunesSeason => "itunes:season",
            Element::ItunesEpisodeType => "itunes:episodeType",
            Element::ItunesDuration => "itunes:duration",
        }
    }

    /// The canonical lookup key: the lowercased name.
    pub fn key(self) -> String {
        self.name().to_ascii_lowercase()
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The result of looking a tag up in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Known(Element),
    Unrecognized,
}

impl Tag {
    /// Looks up a canonical key as produced by [`canonical_key`].
    /// Keys that are not yet lowercase are folded first.
    pub fn lookup(key: &str) -> Tag {
        let key = key.to_ascii_lowercase();
        Element::ALL
            .iter()
            .copied()
            .find(|element| element.key() == key)
            .map_or(Tag::Unrecognized, Tag::Known)
    }

    pub fn is(self, element: Element) -> bool {
        self == Tag::Known(element)
    }
}

/// Builds the catalog key for a tag: lowercase, then `prefix:local`.
pub fn canonical_key(prefix: Option<&str>, local: &str) -> String {
    let local = local.to_lowercase();
    match prefix {
        Some(prefix) if !prefix.is_empty() => {
            format!("{}{}{}", prefix.to_lowercase(), PREFIX_SEPARATOR, local)
        }
        _ => local,
    }
}

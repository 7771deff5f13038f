// ABOUTME: Immutable records produced by a successful podcast feed read.
// ABOUTME: Channel owns its image, items and iTunes data; items own enclosure and iTunes data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::duration_parse::parse_duration_seconds;
use crate::time_parse::parse_rss_date;

/// The podcast itself: channel metadata plus its episodes in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub title: Option<String>,
    pub link: Option<String>,
    pub description: Option<String>,
    pub pub_date: Option<String>,
    pub last_build_date: Option<String>,
    pub language: Option<String>,
    pub copyright: Option<String>,
    pub generator: Option<String>,
    pub image: Option<Image>,
    pub items: Vec<Item>,
    pub itunes_channel_data: ItunesChannelData,
}

impl Channel {
    /// `pubDate` parsed as a UTC timestamp.
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.pub_date.as_deref().and_then(parse_rss_date)
    }

    /// `lastBuildDate` parsed as a UTC timestamp.
    pub fn last_built_at(&self) -> Option<DateTime<Utc>> {
        self.last_build_date.as_deref().and_then(parse_rss_date)
    }
}

/// Channel artwork from the RSS `<image>` element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub url: Option<String>,
    pub title: Option<String>,
    pub link: Option<String>,
}

/// A single episode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub guid: Option<String>,
    pub title: Option<String>,
    pub pub_date: Option<String>,
    pub link: Option<String>,
    pub description: Option<String>,
    pub categories: Vec<String>,
    pub enclosure: Option<Enclosure>,
    pub itunes_item_data: ItunesItemData,
}

impl Item {
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.pub_date.as_deref().and_then(parse_rss_date)
    }
}

/// The episode's media file, read from the `<enclosure>` attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Enclosure {
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub mime_type: Option<String>,
    pub length: Option<u64>,
}

/// Channel-level iTunes extension data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItunesChannelData {
    pub author: Option<String>,
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub show_type: Option<String>,
    pub block: Option<String>,
    pub complete: Option<String>,
    pub explicit: Option<String>,
    /// `href` of `<itunes:image>`.
    pub image: Option<String>,
    pub new_feed_url: Option<String>,
    pub category: Option<ItunesCategory>,
    pub owner: Option<ItunesOwner>,
}

impl ItunesChannelData {
    pub fn is_explicit(&self) -> bool {
        is_explicit(self.explicit.as_deref())
    }

    pub fn is_blocked(&self) -> bool {
        is_yes(self.block.as_deref())
    }

    pub fn is_complete(&self) -> bool {
        is_yes(self.complete.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItunesCategory {
    pub category: Option<String>,
    pub sub_categories: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItunesOwner {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Item-level iTunes extension data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItunesItemData {
    pub episode: Option<String>,
    pub season: Option<String>,
    pub episode_type: Option<String>,
    pub title: Option<String>,
    /// Raw `<itunes:duration>` text; see [`ItunesItemData::duration_seconds`].
    pub duration: Option<String>,
    pub explicit: Option<String>,
    pub block: Option<String>,
    /// `href` of `<itunes:image>`.
    pub image: Option<String>,
}

impl ItunesItemData {
    pub fn duration_seconds(&self) -> Option<u32> {
        self.duration.as_deref().and_then(parse_duration_seconds)
    }

    pub fn episode_number(&self) -> Option<u32> {
        self.episode.as_deref().and_then(|v| v.trim().parse().ok())
    }

    pub fn season_number(&self) -> Option<u32> {
        self.season.as_deref().and_then(|v| v.trim().parse().ok())
    }

    pub fn is_explicit(&self) -> bool {
        is_explicit(self.explicit.as_deref())
    }

    pub fn is_blocked(&self) -> bool {
        is_yes(self.block.as_deref())
    }
}

/// Returns true for case-insensitive "yes", "true" or "explicit".
pub fn is_explicit(value: Option<&str>) -> bool {
    value
        .map(|v| {
            let lower = v.trim().to_lowercase();
            lower == "yes" || lower == "true" || lower == "explicit"
        })
        .unwrap_or(false)
}

fn is_yes(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.trim().eq_ignore_ascii_case("yes"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_is_explicit() {
        assert!(is_explicit(Some("yes")));
        assert!(is_explicit(Some("True")));
        assert!(is_explicit(Some("EXPLICIT")));
        assert!(!is_explicit(Some("False")));
        assert!(!is_explicit(Some("clean")));
        assert!(!is_explicit(None));
    }

    #[test]
    fn test_itunes_channel_flags() {
        let data = ItunesChannelData {
            block: Some("No".to_string()),
            complete: Some("Yes".to_string()),
            explicit: Some("false".to_string()),
            ..Default::default()
        };
        assert!(!data.is_blocked());
        assert!(data.is_complete());
        assert!(!data.is_explicit());
    }

    #[test]
    fn test_item_numbers_and_duration() {
        let data = ItunesItemData {
            episode: Some("4".to_string()),
            season: Some(" 1 ".to_string()),
            duration: Some("17:59".to_string()),
            ..Default::default()
        };
        assert_eq!(data.episode_number(), Some(4));
        assert_eq!(data.season_number(), Some(1));
        assert_eq!(data.duration_seconds(), Some(1079));
    }

    #[test]
    fn test_oversized_duration_is_none() {
        let data = ItunesItemData {
            duration: Some("18446744073709551615:00:00".to_string()),
            ..Default::default()
        };
        assert_eq!(data.duration_seconds(), None);
    }

    #[test]
    fn test_non_numeric_episode_is_none() {
        let data = ItunesItemData {
            episode: Some("bonus".to_string()),
            ..Default::default()
        };
        assert_eq!(data.episode_number(), None);
    }

    #[test]
    fn test_published_at() {
        let item = Item {
            pub_date: Some("Thu, 21 Nov 2019 09:00:00 -0000".to_string()),
            ..Default::default()
        };
        assert_eq!(
            item.published_at(),
            Some(Utc.with_ymd_and_hms(2019, 11, 21, 9, 0, 0).unwrap())
        );
        assert_eq!(Item::default().published_at(), None);
    }
}

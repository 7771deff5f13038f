// ABOUTME: Integration tests for reading complete podcast feeds through PodcastReader.
// ABOUTME: Covers channel/item fields, iTunes data, structural and semantic failures.

use std::path::PathBuf;

use podcatcher_feed::{
    FailureKind, ItunesCategory, ItunesOwner, PodcastReader, SemanticValidationError,
    StructuralError,
};

fn fixture(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
        .to_string_lossy()
        .into_owned()
}

mod channel_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_channel_metadata() {
        let channel = PodcastReader::new()
            .read(&fixture("simple_podcast.xml"))
            .unwrap();

        assert_eq!(channel.title.as_deref(), Some("Raw Data"));
        assert_eq!(channel.link.as_deref(), Some("http://www.rawdatapodcast.com"));
        assert_eq!(channel.description.as_deref(), Some("We’ve entered a new era."));
        assert_eq!(
            channel.pub_date.as_deref(),
            Some("Thu, 21 Nov 2019 09:00:00 -0000")
        );
        assert_eq!(
            channel.last_build_date.as_deref(),
            Some("Wed, 17 Mar 2021 19:22:02 -0000")
        );
        assert_eq!(channel.language.as_deref(), Some("en"));
        assert_eq!(channel.copyright.as_deref(), Some("All rights reserved"));
        assert_eq!(channel.generator.as_deref(), Some("PRX Feeder v1.0.0"));

        let image = channel.image.expect("channel image");
        assert_eq!(
            image.url.as_deref(),
            Some("https://f.prxu.org/190/images/RawData_ForWeb_RGB.png")
        );
        assert_eq!(image.title.as_deref(), Some("Raw Data"));
        assert_eq!(image.link.as_deref(), Some("http://www.rawdatapodcast.com"));
    }

    #[test]
    fn test_episode_data() {
        let channel = PodcastReader::new()
            .read(&fixture("simple_podcast.xml"))
            .unwrap();
        assert_eq!(channel.items.len(), 2, "the feed has two items");

        let first = &channel.items[0];
        assert_eq!(first.guid.as_deref(), Some("b970-9f45620b0fd1"));
        assert_eq!(first.title.as_deref(), Some("Technically Sweet"));
        assert_eq!(
            first.pub_date.as_deref(),
            Some("Thu, 21 Nov 2019 09:00:00 -0000")
        );
        assert_eq!(
            first.link.as_deref(),
            Some("https://beta.prx.org/stories/295275")
        );
        assert_eq!(
            first.description.as_deref(),
            Some("<p>We look at blockchain and the future of charity.</p>")
        );
        assert_eq!(first.categories, vec!["Blockchain", "Charity ryerson"]);

        let enclosure = first.enclosure.as_ref().expect("enclosure");
        assert_eq!(
            enclosure.url.as_deref(),
            Some("https://dts.podtrac.com/Technically_Sweet_P1_Raw_Data.mp3")
        );
        assert_eq!(enclosure.mime_type.as_deref(), Some("audio/mpeg"));
        assert_eq!(enclosure.length, Some(39374396));

        // Missing length attribute is absent, not a failure.
        let second = &channel.items[1];
        assert_eq!(second.guid.as_deref(), Some("a811-4c2e0f71d3aa"));
        assert_eq!(second.enclosure.as_ref().unwrap().length, None);
        assert!(second.categories.is_empty());
    }

    #[test]
    fn test_dates_parse() {
        let channel = PodcastReader::new()
            .read(&fixture("simple_podcast.xml"))
            .unwrap();
        assert!(channel.published_at().is_some());
        assert!(channel.last_built_at().unwrap() > channel.published_at().unwrap());
        assert!(channel.items[1].published_at() > channel.items[0].published_at());
    }
}

mod itunes_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_itunes_channel_data() {
        let channel = PodcastReader::new()
            .read(&fixture("podcast_with_itunes.rss"))
            .unwrap();
        let itunes = &channel.itunes_channel_data;

        assert_eq!(itunes.author.as_deref(), Some("FeedForAll Mac OS Team"));
        assert_eq!(itunes.title.as_deref(), Some("RSS Feed Podcast"));
        assert_eq!(itunes.show_type.as_deref(), Some("serial"));
        assert_eq!(itunes.block.as_deref(), Some("No"));
        assert_eq!(itunes.complete.as_deref(), Some("No"));
        assert_eq!(itunes.explicit.as_deref(), Some("False"));
        assert_eq!(
            itunes.image.as_deref(),
            Some("https://applehosted.podcasts.apple.com/hiking_treks/artwork.png")
        );
        assert_eq!(
            itunes.new_feed_url.as_deref(),
            Some("https://newlocation.com/example.rss")
        );
        assert_eq!(
            itunes.category,
            Some(ItunesCategory {
                category: Some("Technology".to_string()),
                sub_categories: vec!["Information Technology".to_string()],
            })
        );
        assert_eq!(
            itunes.owner,
            Some(ItunesOwner {
                name: Some("FeedForAll Mac OS Team".to_string()),
                email: Some("macsupport@feedforall.com".to_string()),
            })
        );
        assert!(!itunes.is_explicit());
        assert!(!itunes.is_blocked());
        assert!(!itunes.is_complete());
    }

    #[test]
    fn test_itunes_episode_data() {
        let channel = PodcastReader::new()
            .read(&fixture("podcast_with_itunes.rss"))
            .unwrap();
        let itunes = &channel.items[0].itunes_item_data;

        assert_eq!(itunes.episode.as_deref(), Some("4"));
        assert_eq!(itunes.season.as_deref(), Some("1"));
        assert_eq!(itunes.episode_type.as_deref(), Some("trailer"));
        assert_eq!(itunes.title.as_deref(), Some("Hiking Treks Trailer"));
        assert_eq!(itunes.duration.as_deref(), Some("1079"));
        assert_eq!(itunes.explicit.as_deref(), Some("false"));
        assert_eq!(itunes.block.as_deref(), Some("No"));
        assert_eq!(
            itunes.image.as_deref(),
            Some("https://applehosted.podcasts.apple.com/hiking_treks/artwork2.png")
        );

        let second = &channel.items[1].itunes_item_data;
        assert_eq!(second.episode_number(), Some(5));
        assert_eq!(second.duration_seconds(), Some(1079));
        assert!(second.is_explicit());
        assert_eq!(second.image, None);
    }

    #[test]
    fn test_entities_in_text() {
        let channel = PodcastReader::new()
            .read(&fixture("podcast_with_itunes.rss"))
            .unwrap();
        assert_eq!(channel.copyright.as_deref(), Some("© 2020 John Appleseed"));
        assert!(channel
            .description
            .as_deref()
            .unwrap()
            .contains("nature's treasures"));
    }
}

mod failure_tests {
    use super::*;

    fn read(xml: &str) -> Result<podcatcher_feed::Channel, podcatcher_feed::ReaderError> {
        PodcastReader::new().read_bytes(xml.as_bytes(), "inline")
    }

    #[test]
    fn test_wrong_uri_is_io_failure() {
        let err = PodcastReader::new().read("WRONG_URI").unwrap_err();
        assert!(err.is_io());
        assert_eq!(err.uri, "WRONG_URI");
    }

    #[test]
    fn test_channel_outside_rss() {
        let err = read("<feed><channel><title>T</title></channel></feed>").unwrap_err();
        assert!(err.is_structural());
    }

    #[test]
    fn test_channel_nested_too_deep() {
        let err = read("<rss><wrapper><channel><title>T</title></channel></wrapper></rss>")
            .unwrap_err();
        match err.kind() {
            FailureKind::Structural(StructuralError::MisplacedContainer {
                element,
                expected,
                found,
            }) => {
                assert_eq!(*element, "channel");
                assert_eq!(*expected, "rss");
                assert_eq!(found.as_deref(), Some("wrapper"));
            }
            other => panic!("unexpected failure: {other:?}"),
        }
    }

    #[test]
    fn test_item_outside_channel() {
        let err = read("<rss><item><guid>g</guid></item></rss>").unwrap_err();
        assert!(err.is_structural());
    }

    #[test]
    fn test_two_channels() {
        let err = read(
            "<rss><channel><title>A</title></channel><channel><title>B</title></channel></rss>",
        )
        .unwrap_err();
        assert!(matches!(
            err.kind(),
            FailureKind::Structural(StructuralError::DuplicateChannel)
        ));
    }

    #[test]
    fn test_empty_title() {
        let err = read("<rss><channel><title></title><item/></channel></rss>").unwrap_err();
        assert!(matches!(
            err.kind(),
            FailureKind::Semantic(SemanticValidationError::EmptyTitle)
        ));
    }

    #[test]
    fn test_absent_title() {
        let err = read("<rss><channel><description>D</description></channel></rss>").unwrap_err();
        assert!(matches!(
            err.kind(),
            FailureKind::Semantic(SemanticValidationError::MissingTitle)
        ));
    }

    #[test]
    fn test_item_title_does_not_count_as_channel_title() {
        let err = read("<rss><channel><item><title>Episode</title></item></channel></rss>")
            .unwrap_err();
        assert!(err.is_semantic());
    }

    #[test]
    fn test_unsupported_tags_are_not_errors() {
        let channel = read(
            r#"<rss version="2.0" xmlns:podcast="https://podcastindex.org/namespace/1.0">
  <channel>
    <title>T</title>
    <podcast:locked>yes</podcast:locked>
    <category>Ignored at channel level</category>
    <ttl>60</ttl>
    <item>
      <guid>g1</guid>
      <copyright>not an item field</copyright>
      <podcast:transcript url="https://example.com/t.vtt" type="text/vtt"/>
    </item>
  </channel>
</rss>"#,
        )
        .unwrap();
        assert_eq!(channel.title.as_deref(), Some("T"));
        assert_eq!(channel.copyright, None);
        assert_eq!(channel.items.len(), 1);
        assert_eq!(channel.items[0].guid.as_deref(), Some("g1"));
    }
}

// ABOUTME: Mutable builders for every entity plus the slot arena that owns them during a parse.
// ABOUTME: A slot is spawned when its container opens and finalized into an immutable value when it closes.

use std::fmt;

use crate::error::StructuralError;
use crate::models::{
    Channel, Enclosure, Image, Item, ItunesCategory, ItunesChannelData, ItunesItemData, ItunesOwner,
};

/// Consumes a builder into its finished record.
pub trait Build {
    type Output;

    fn build(self) -> Self::Output;
}

/// The structural entities that get their own builder slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Channel,
    Image,
    Item,
    ItunesChannelData,
    ItunesCategory,
    ItunesOwner,
    ItunesItemData,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Entity::Channel => "channel",
            Entity::Image => "image",
            Entity::Item => "item",
            Entity::ItunesChannelData => "itunes channel data",
            Entity::ItunesCategory => "itunes:category",
            Entity::ItunesOwner => "itunes:owner",
            Entity::ItunesItemData => "itunes item data",
        };
        f.write_str(s)
    }
}

/// Exclusive home of one builder between its spawn and its finalization.
#[derive(Debug)]
pub struct Slot<B> {
    entity: Entity,
    builder: Option<B>,
}

impl<B: Build + Default> Slot<B> {
    pub fn new(entity: Entity) -> Self {
        Self {
            entity,
            builder: None,
        }
    }

    /// Installs a fresh builder and returns it.
    pub fn spawn(&mut self) -> &mut B {
        if self.builder.is_some() {
            log::debug!("discarding unfinished {} builder", self.entity);
        }
        self.builder.insert(B::default())
    }

    pub fn is_active(&self) -> bool {
        self.builder.is_some()
    }

    /// The live builder, or an error once it has been finalized.
    pub fn active(&mut self) -> Result<&mut B, StructuralError> {
        let entity = self.entity;
        self.builder
            .as_mut()
            .ok_or(StructuralError::InactiveBuilder { entity })
    }

    /// Moves the builder out of the slot and builds it. The slot is vacant afterwards.
    pub fn finalize(&mut self) -> Result<B::Output, StructuralError> {
        self.builder
            .take()
            .map(Build::build)
            .ok_or(StructuralError::InactiveBuilder {
                entity: self.entity,
            })
    }
}

/// All builder slots owned by one parse.
#[derive(Debug)]
pub struct BuilderSet {
    pub channel: Slot<ChannelBuilder>,
    pub image: Slot<ImageBuilder>,
    pub item: Slot<ItemBuilder>,
    pub itunes_channel: Slot<ItunesChannelDataBuilder>,
    pub itunes_category: Slot<ItunesCategoryBuilder>,
    pub itunes_owner: Slot<ItunesOwnerBuilder>,
    pub itunes_item: Slot<ItunesItemDataBuilder>,
    /// The channel once `</channel>` has been seen.
    pub finished: Option<Channel>,
}

impl Default for BuilderSet {
    fn default() -> Self {
        Self {
            channel: Slot::new(Entity::Channel),
            image: Slot::new(Entity::Image),
            item: Slot::new(Entity::Item),
            itunes_channel: Slot::new(Entity::ItunesChannelData),
            itunes_category: Slot::new(Entity::ItunesCategory),
            itunes_owner: Slot::new(Entity::ItunesOwner),
            itunes_item: Slot::new(Entity::ItunesItemData),
            finished: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct ChannelBuilder {
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
    pub itunes_channel_data: Option<ItunesChannelData>,
}

impl Build for ChannelBuilder {
    type Output = Channel;

    fn build(self) -> Channel {
        Channel {
            title: self.title,
            link: self.link,
            description: self.description,
            pub_date: self.pub_date,
            last_build_date: self.last_build_date,
            language: self.language,
            copyright: self.copyright,
            generator: self.generator,
            image: self.image,
            items: self.items,
            itunes_channel_data: self.itunes_channel_data.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default)]
pub struct ImageBuilder {
    pub url: Option<String>,
    pub title: Option<String>,
    pub link: Option<String>,
}

impl Build for ImageBuilder {
    type Output = Image;

    fn build(self) -> Image {
        Image {
            url: self.url,
            title: self.title,
            link: self.link,
        }
    }
}

#[derive(Debug, Default)]
pub struct ItemBuilder {
    pub guid: Option<String>,
    pub title: Option<String>,
    pub pub_date: Option<String>,
    pub link: Option<String>,
    pub description: Option<String>,
    pub categories: Vec<String>,
    pub enclosure: Option<Enclosure>,
    pub itunes_item_data: Option<ItunesItemData>,
}

impl Build for ItemBuilder {
    type Output = Item;

    fn build(self) -> Item {
        Item {
            guid: self.guid,
            title: self.title,
            pub_date: self.pub_date,
            link: self.link,
            description: self.description,
            categories: self.categories,
            enclosure: self.enclosure,
            itunes_item_data: self.itunes_item_data.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default)]
pub struct ItunesChannelDataBuilder {
    pub author: Option<String>,
    pub title: Option<String>,
    pub show_type: Option<String>,
    pub block: Option<String>,
    pub complete: Option<String>,
    pub explicit: Option<String>,
    pub image: Option<String>,
    pub new_feed_url: Option<String>,
    pub category: Option<ItunesCategory>,
    pub owner: Option<ItunesOwner>,
}

impl Build for ItunesChannelDataBuilder {
    type Output = ItunesChannelData;

    fn build(self) -> ItunesChannelData {
        ItunesChannelData {
            author: self.author,
            title: self.title,
            show_type: self.show_type,
            block: self.block,
            complete: self.complete,
            explicit: self.explicit,
            image: self.image,
            new_feed_url: self.new_feed_url,
            category: self.category,
            owner: self.owner,
        }
    }
}

#[derive(Debug, Default)]
pub struct ItunesCategoryBuilder {
    pub category: Option<String>,
    pub sub_categories: Vec<String>,
}

impl Build for ItunesCategoryBuilder {
    type Output = ItunesCategory;

    fn build(self) -> ItunesCategory {
        ItunesCategory {
            category: self.category,
            sub_categories: self.sub_categories,
        }
    }
}

#[derive(Debug, Default)]
pub struct ItunesOwnerBuilder {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl Build for ItunesOwnerBuilder {
    type Output = ItunesOwner;

    fn build(self) -> ItunesOwner {
        ItunesOwner {
            name: self.name,
            email: self.email,
        }
    }
}

#[derive(Debug, Default)]
pub struct ItunesItemDataBuilder {
    pub episode: Option<String>,
    pub season: Option<String>,
    pub episode_type: Option<String>,
    pub title: Option<String>,
    pub duration: Option<String>,
    pub explicit: Option<String>,
    pub block: Option<String>,
    pub image: Option<String>,
}

impl Build for ItunesItemDataBuilder {
    type Output = ItunesItemData;

    fn build(self) -> ItunesItemData {
        ItunesItemData {
            episode: self.episode,
            season: self.season,
            episode_type: self.episode_type,
            title: self.title,
            duration: self.duration,
            explicit: self.explicit,
            block: self.block,
            image: self.image,
        }
    }
}

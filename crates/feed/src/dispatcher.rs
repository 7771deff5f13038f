// ABOUTME: Event dispatcher that turns start/characters/end events into builder assignments.
// ABOUTME: Context comes from the navigation stack; each enclosing context has its own assignment table.

use log::{debug, trace};

use crate::accumulator::TextAccumulator;
use crate::builders::BuilderSet;
use crate::catalog::{Element, Tag};
use crate::error::StructuralError;
use crate::models::{Channel, Enclosure};
use crate::navigation::NavigationStack;

/// Attributes of a start tag, keyed by local name.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Attributes {
    pairs: Vec<(String, String)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((name.into(), value.into()));
    }

    /// Case-insensitive, like tag matching.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    fn owned(&self, name: &str) -> Option<String> {
        self.get(name).map(str::to_string)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attributes::new();
        for (name, value) in iter {
            attrs.push(name, value);
        }
        attrs
    }
}

/// Drives the builders from tokenizer events for a single document.
#[derive(Debug, Default)]
pub struct Dispatcher {
    stack: NavigationStack,
    text: TextAccumulator,
    builders: BuilderSet,
    root_seen: bool,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles a start tag. `key` must be a canonical catalog key.
    pub fn start_tag(&mut self, key: &str, attrs: &Attributes) -> Result<(), StructuralError> {
        let tag = Tag::lookup(key);
        trace!("start <{key}> at depth {}", self.stack.depth());
        self.check_root(key, tag)?;

        match tag {
            Tag::Known(element) => self.open(element, attrs)?,
            Tag::Unrecognized => debug!("element <{key}> is not supported, ignoring"),
        }

        self.stack.push(key, tag);
        Ok(())
    }

    /// Handles character data; dropped unless a leaf element is being read.
    pub fn characters(&mut self, text: &str) {
        self.text.append(text);
    }

    /// Handles an end tag. `key` must be a canonical catalog key.
    pub fn end_tag(&mut self, key: &str) -> Result<(), StructuralError> {
        if self.stack.pop().is_none() {
            return Err(StructuralError::UnbalancedEnd {
                name: key.to_string(),
            });
        }
        trace!("end </{key}> at depth {}", self.stack.depth());

        let Tag::Known(element) = Tag::lookup(key) else {
            return Ok(());
        };
        let Some(context) = self.stack.top().map(|frame| frame.tag) else {
            return Ok(());
        };

        let content = self.text.resolve();
        match context {
            Tag::Known(Element::Rss) => self.assign_root(element)?,
            Tag::Known(Element::Channel) => self.assign_channel(element, content)?,
            Tag::Known(Element::Image) => self.assign_image(element, content)?,
            Tag::Known(Element::Item) => self.assign_item(element, content)?,
            Tag::Known(Element::ItunesOwner) => self.assign_owner(element, content),
            Tag::Known(other) => trace!("no assignment for <{element}> inside <{other}>"),
            Tag::Unrecognized => trace!("no assignment for <{element}> inside an unsupported element"),
        }
        self.text.close();
        Ok(())
    }

    /// Ends the document and hands back the channel, if one was closed.
    pub fn finish(self) -> Result<Option<Channel>, StructuralError> {
        if !self.root_seen {
            return Err(StructuralError::MissingRoot);
        }
        if !self.stack.is_empty() {
            return Err(StructuralError::Unclosed {
                depth: self.stack.depth(),
            });
        }
        Ok(self.builders.finished)
    }

    fn check_root(&mut self, key: &str, tag: Tag) -> Result<(), StructuralError> {
        let is_rss = tag.is(Element::Rss);
        match self.stack.top() {
            None if self.root_seen => Err(StructuralError::MultipleRoots {
                found: key.to_string(),
            }),
            None if !is_rss => Err(StructuralError::UnexpectedRoot {
                found: key.to_string(),
            }),
            None => {
                self.root_seen = true;
                Ok(())
            }
            Some(parent) if is_rss => Err(StructuralError::NestedRoot {
                parent: parent.key.clone(),
            }),
            Some(_) => Ok(()),
        }
    }

    fn require_parent(&self, element: Element, expected: Element) -> Result<(), StructuralError> {
        if self.stack.immediate_parent_is(expected) {
            return Ok(());
        }
        Err(StructuralError::MisplacedContainer {
            element: element.name(),
            expected: expected.name(),
            found: self.stack.top().map(|frame| frame.key.clone()),
        })
    }

    fn open(&mut self, element: Element, attrs: &Attributes) -> Result<(), StructuralError> {
        match element {
            Element::Rss => {}
            Element::Channel => {
                self.require_parent(Element::Channel, Element::Rss)?;
                if self.builders.finished.is_some() || self.builders.channel.is_active() {
                    return Err(StructuralError::DuplicateChannel);
                }
                self.builders.channel.spawn();
                self.builders.itunes_channel.spawn();
            }
            Element::Image => {
                self.require_parent(Element::Image, Element::Channel)?;
                self.builders.image.spawn();
            }
            Element::Item => {
                self.require_parent(Element::Item, Element::Channel)?;
                self.builders.item.spawn();
                self.builders.itunes_item.spawn();
            }
            Element::ItunesOwner => {
                if self.stack.immediate_parent_is(Element::Channel) {
                    self.builders.itunes_owner.spawn();
                } else {
                    debug!("<{element}> outside <channel> is not supported, ignoring");
                }
            }
            Element::Enclosure => {
                if self.stack.immediate_parent_is(Element::Item) {
                    self.builders.item.active()?.enclosure = Some(enclosure_from(attrs));
                } else {
                    debug!("<{element}> outside <item> is not supported, ignoring");
                }
            }
            Element::ItunesImage => {
                let href = attrs.owned("href");
                if self.stack.immediate_parent_is(Element::Channel) {
                    self.builders.itunes_channel.active()?.image = href;
                } else if self.stack.immediate_parent_is(Element::Item) {
                    self.builders.itunes_item.active()?.image = href;
                } else {
                    debug!("<{element}> outside <channel> or <item> is not supported, ignoring");
                }
            }
            Element::ItunesCategory => {
                let text = attrs.owned("text");
                if self.stack.immediate_parent_is(Element::Channel) {
                    self.builders.itunes_category.spawn().category = text;
                } else if self.stack.immediate_parent_is(Element::ItunesCategory)
                    && self.stack.grandparent_is(Element::Channel)
                {
                    if let Some(text) = text {
                        self.builders.itunes_category.active()?.sub_categories.push(text);
                    }
                } else {
                    debug!("<{element}> is only supported at channel level, ignoring");
                }
            }
            _ => self.text.open(),
        }
        Ok(())
    }

    fn assign_root(&mut self, element: Element) -> Result<(), StructuralError> {
        match element {
            Element::Channel => {
                let itunes = self.builders.itunes_channel.finalize()?;
                let mut channel = self.builders.channel.finalize()?;
                channel.itunes_channel_data = itunes;
                debug!("channel closed with {} item(s)", channel.items.len());
                self.builders.finished = Some(channel);
            }
            other => debug!("<{other}> is not supported directly inside <rss>"),
        }
        Ok(())
    }

    fn assign_channel(&mut self, element: Element, content: Option<String>) -> Result<(), StructuralError> {
        let b = &mut self.builders;
        match element {
            Element::Title => b.channel.active()?.title = content,
            Element::Description => b.channel.active()?.description = content,
            Element::Link => b.channel.active()?.link = content,
            Element::Copyright => b.channel.active()?.copyright = content,
            Element::Language => b.channel.active()?.language = content,
            Element::Generator => b.channel.active()?.generator = content,
            Element::PubDate => b.channel.active()?.pub_date = content,
            Element::LastBuildDate => b.channel.active()?.last_build_date = content,
            Element::Image => {
                let image = b.image.finalize()?;
                b.channel.active()?.image = Some(image);
            }
            Element::Item => {
                let itunes = b.itunes_item.finalize()?;
                let mut item = b.item.finalize()?;
                item.itunes_item_data = itunes;
                b.channel.active()?.items.push(item);
            }
            Element::ItunesCategory => {
                let category = b.itunes_category.finalize()?;
                b.itunes_channel.active()?.category = Some(category);
            }
            Element::ItunesOwner => {
                let owner = b.itunes_owner.finalize()?;
                b.itunes_channel.active()?.owner = Some(owner);
            }
            Element::ItunesExplicit => b.itunes_channel.active()?.explicit = content,
            Element::ItunesAuthor => b.itunes_channel.active()?.author = content,
            Element::ItunesTitle => b.itunes_channel.active()?.title = content,
            Element::ItunesType => b.itunes_channel.active()?.show_type = content,
            Element::ItunesNewFeedUrl => b.itunes_channel.active()?.new_feed_url = content,
            Element::ItunesBlock => b.itunes_channel.active()?.block = content,
            Element::ItunesComplete => b.itunes_channel.active()?.complete = content,
            // Resolved from attributes when it opened.
            Element::ItunesImage => {}
            other => unsupported(other, content.as_deref(), Element::Channel),
        }
        Ok(())
    }

    fn assign_image(&mut self, element: Element, content: Option<String>) -> Result<(), StructuralError> {
        let image = self.builders.image.active()?;
        match element {
            Element::Url => image.url = content,
            Element::Title => image.title = content,
            Element::Link => image.link = content,
            other => unsupported(other, content.as_deref(), Element::Image),
        }
        Ok(())
    }

    fn assign_item(&mut self, element: Element, content: Option<String>) -> Result<(), StructuralError> {
        let b = &mut self.builders;
        match element {
            Element::Guid => b.item.active()?.guid = content,
            Element::Title => b.item.active()?.title = content,
            Element::PubDate => b.item.active()?.pub_date = content,
            Element::Link => b.item.active()?.link = content,
            Element::Description => b.item.active()?.description = content,
            Element::Category => {
                if let Some(category) = content {
                    b.item.active()?.categories.push(category);
                }
            }
            Element::ItunesEpisode => b.itunes_item.active()?.episode = content,
            Element::ItunesSeason => b.itunes_item.active()?.season = content,
            Element::ItunesEpisodeType => b.itunes_item.active()?.episode_type = content,
            Element::ItunesTitle => b.itunes_item.active()?.title = content,
            Element::ItunesDuration => b.itunes_item.active()?.duration = content,
            Element::ItunesExplicit => b.itunes_item.active()?.explicit = content,
            Element::ItunesBlock => b.itunes_item.active()?.block = content,
            // Resolved from attributes when they opened.
            Element::Enclosure | Element::ItunesImage => {}
            other => unsupported(other, content.as_deref(), Element::Item),
        }
        Ok(())
    }

    fn assign_owner(&mut self, element: Element, content: Option<String>) {
        let Ok(owner) = self.builders.itunes_owner.active() else {
            debug!("<{element}> belongs to an ignored <itunes:owner>");
            return;
        };
        match element {
            Element::ItunesName => owner.name = content,
            Element::ItunesEmail => owner.email = content,
            other => unsupported(other, content.as_deref(), Element::ItunesOwner),
        }
    }
}

fn unsupported(element: Element, content: Option<&str>, context: Element) {
    debug!(
        "<{element}> with value {:?} is not supported as <{context}> info",
        content.unwrap_or_default()
    );
}

fn enclosure_from(attrs: &Attributes) -> Enclosure {
    let length = attrs.get("length").and_then(|raw| {
        let parsed = raw.trim().parse::<u64>().ok();
        if parsed.is_none() {
            debug!("ignoring enclosure length {raw:?}");
        }
        parsed
    });
    Enclosure {
        url: attrs.owned("url"),
        mime_type: attrs.owned("type"),
        length,
    }
}

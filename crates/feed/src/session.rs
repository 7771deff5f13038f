// ABOUTME: A single-use parse of one feed document, driving quick-xml in streaming mode.
// ABOUTME: Feeds tokenizer events to the dispatcher, then checks structure and the channel title.

use std::io::BufRead;

use quick_xml::escape::{resolve_predefined_entity, unescape};
use quick_xml::events::{BytesRef, BytesStart, Event};
use quick_xml::name::QName;
use quick_xml::reader::Reader;

use crate::catalog::canonical_key;
use crate::dispatcher::{Attributes, Dispatcher};
use crate::error::{FailureKind, IoFailure, ReaderError, SemanticValidationError};
use crate::models::Channel;
use crate::options::ReaderOptions;
use crate::source;

/// One parse. Consumed by [`ParseSession::parse`] or [`ParseSession::parse_reader`].
#[derive(Debug)]
pub struct ParseSession<'a> {
    options: &'a ReaderOptions,
    dispatcher: Dispatcher,
}

impl<'a> ParseSession<'a> {
    pub fn new(options: &'a ReaderOptions) -> Self {
        Self {
            options,
            dispatcher: Dispatcher::new(),
        }
    }

    /// Opens `uri` and reads it to completion.
    pub fn parse(self, uri: &str) -> Result<Channel, ReaderError> {
        log::debug!("reading podcast feed {uri}");
        let source = source::open(uri, self.options).map_err(|err| ReaderError::new(uri, err))?;
        self.parse_reader(source, uri)
    }

    /// Reads an already opened document. `label` names it in errors.
    pub fn parse_reader<R: BufRead>(self, source: R, label: &str) -> Result<Channel, ReaderError> {
        self.run(source).map_err(|kind| ReaderError::new(label, kind))
    }

    fn run<R: BufRead>(mut self, source: R) -> Result<Channel, FailureKind> {
        let mut reader = Reader::from_reader(source);
        let config = reader.config_mut();
        config.expand_empty_elements = true;
        config.trim_text(false);

        let mut buf = Vec::new();
        loop {
            buf.clear();
            let event = match reader.read_event_into(&mut buf) {
                Ok(event) => event,
                Err(source) => {
                    return Err(IoFailure::Xml {
                        position: reader.buffer_position(),
                        source,
                    }
                    .into())
                }
            };

            match event {
                Event::Start(ref e) => {
                    let key = element_key(e.name());
                    let attrs = attributes_of(e);
                    self.dispatcher.start_tag(&key, &attrs)?;
                }
                Event::End(ref e) => {
                    let key = element_key(e.name());
                    self.dispatcher.end_tag(&key)?;
                }
                Event::Text(ref e) => match e.decode() {
                    Ok(text) => self.dispatcher.characters(&text),
                    Err(err) => log::debug!("dropping undecodable text: {err}"),
                },
                Event::CData(ref e) => {
                    self.dispatcher.characters(&String::from_utf8_lossy(e));
                }
                Event::GeneralRef(ref e) => match resolve_reference(e) {
                    Some(text) => self.dispatcher.characters(&text),
                    None => log::debug!(
                        "dropping unknown entity &{};",
                        String::from_utf8_lossy(e)
                    ),
                },
                Event::Eof => break,
                _ => {}
            }
        }

        let channel = self.dispatcher.finish()?;
        validate(channel).map_err(FailureKind::from)
    }
}

fn validate(channel: Option<Channel>) -> Result<Channel, SemanticValidationError> {
    let channel = channel.ok_or(SemanticValidationError::MissingTitle)?;
    match channel.title.as_deref() {
        None => Err(SemanticValidationError::MissingTitle),
        Some("") => Err(SemanticValidationError::EmptyTitle),
        Some(_) => {
            log::debug!("parsed channel with {} item(s)", channel.items.len());
            Ok(channel)
        }
    }
}

fn element_key(name: QName<'_>) -> String {
    let prefix = name
        .prefix()
        .map(|p| String::from_utf8_lossy(p.as_ref()).into_owned());
    let local = name.local_name();
    canonical_key(prefix.as_deref(), &String::from_utf8_lossy(local.as_ref()))
}

fn attributes_of(e: &BytesStart<'_>) -> Attributes {
    let mut attrs = Attributes::new();
    for attr in e.attributes() {
        let attr = match attr {
            Ok(attr) => attr,
            Err(err) => {
                log::debug!("dropping malformed attribute: {err}");
                continue;
            }
        };
        let name = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let raw = String::from_utf8_lossy(&attr.value);
        let value = unescape(&raw)
            .map(|value| value.into_owned())
            .unwrap_or_else(|_| raw.to_string());
        attrs.push(name, value);
    }
    attrs
}

fn resolve_reference(e: &BytesRef<'_>) -> Option<String> {
    if let Ok(Some(ch)) = e.resolve_char_ref() {
        return Some(ch.to_string());
    }
    let name = String::from_utf8_lossy(e);
    resolve_predefined_entity(&name).map(str::to_string)
}

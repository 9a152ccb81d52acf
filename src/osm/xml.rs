// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::io;
use std::str::from_utf8;

use log::warn;
use quick_xml::events::{BytesStart, Event};

use crate::Node;

/// Represents an [OSM way](https://wiki.openstreetmap.org/wiki/Way).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Way {
    pub id: i64,
    pub nodes: Vec<i64>,
    pub tags: HashMap<String, String>,
}

/// [OSM elements](https://wiki.openstreetmap.org/wiki/Elements) relevant for building
/// a road network. Relations are skipped.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Feature {
    Node(Node),
    Way(Way),
}

/// Reader streams [Features](Feature) from an
/// [OSM XML](https://wiki.openstreetmap.org/wiki/OSM_XML) document.
pub(super) struct Reader<R: io::BufRead> {
    parser: quick_xml::Reader<R>,
    buf: Vec<u8>,
    eof: bool,
}

impl<R: io::BufRead> Reader<R> {
    pub(super) fn new(reader: R) -> Self {
        Self {
            parser: quick_xml::Reader::from_reader(reader),
            buf: Vec::default(),
            eof: false,
        }
    }
}

impl<R: io::BufRead> Iterator for Reader<R> {
    type Item = Result<Feature, quick_xml::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut way: Option<Way> = None;

        while !self.eof {
            self.buf.clear();
            let event = match self.parser.read_event_into(&mut self.buf) {
                Ok(e) => e,
                Err(e) => return Some(Err(e)),
            };

            match event {
                Event::Start(start) => match start.local_name().as_ref() {
                    // Children of nodes (tags) are irrelevant
                    b"node" => {
                        if let Some(n) = parse_node(&start) {
                            return Some(Ok(Feature::Node(n)));
                        }
                    }
                    b"way" => way = parse_way(&start),
                    _ => {}
                },

                Event::Empty(start) => match start.local_name().as_ref() {
                    b"node" => {
                        if let Some(n) = parse_node(&start) {
                            return Some(Ok(Feature::Node(n)));
                        }
                    }
                    b"nd" => {
                        if let (Some(w), Some(ref_)) = (way.as_mut(), parse_nd(&start)) {
                            w.nodes.push(ref_);
                        }
                    }
                    b"tag" => {
                        if let (Some(w), Some((k, v))) = (way.as_mut(), parse_tag(&start)) {
                            w.tags.insert(k, v);
                        }
                    }
                    _ => {}
                },

                Event::End(end) if end.local_name().as_ref() == b"way" => {
                    if let Some(w) = way.take() {
                        return Some(Ok(Feature::Way(w)));
                    }
                }

                Event::Eof => self.eof = true,

                _ => {}
            }
        }

        None
    }
}

/// Returns the value of an attribute parsed with [str::parse],
/// or `None` if the attribute is missing or malformed.
fn attribute<T: std::str::FromStr>(start: &BytesStart<'_>, key: &[u8]) -> Option<T> {
    start
        .attributes()
        .filter_map(|attr| attr.ok())
        .find(|attr| attr.key.as_ref() == key)
        .and_then(|attr| from_utf8(&attr.value).ok()?.parse().ok())
}

fn parse_node(start: &BytesStart<'_>) -> Option<Node> {
    let id: i64 = attribute(start, b"id").unwrap_or(0);
    let lat: f32 = attribute(start, b"lat").unwrap_or(f32::NAN);
    let lon: f32 = attribute(start, b"lon").unwrap_or(f32::NAN);

    if id != 0 && lat.is_finite() && lon.is_finite() {
        Some(Node { id, lat, lon })
    } else {
        warn!("skipping malformed node (id={})", id);
        None
    }
}

fn parse_way(start: &BytesStart<'_>) -> Option<Way> {
    match attribute::<i64>(start, b"id") {
        Some(id) if id != 0 => Some(Way {
            id,
            nodes: Vec::default(),
            tags: HashMap::default(),
        }),
        _ => {
            warn!("skipping way without a valid id");
            None
        }
    }
}

fn parse_nd(start: &BytesStart<'_>) -> Option<i64> {
    attribute(start, b"ref").filter(|&ref_: &i64| ref_ != 0)
}

/// Returns the unescaped value of a textual attribute.
fn text_attribute(start: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    start
        .attributes()
        .filter_map(|attr| attr.ok())
        .find(|attr| attr.key.as_ref() == key)
        .and_then(|attr| attr.unescape_value().ok().map(|v| v.into_owned()))
}

fn parse_tag(start: &BytesStart<'_>) -> Option<(String, String)> {
    let k = text_attribute(start, b"k")?;
    let v = text_attribute(start, b"v").unwrap_or_default();
    Some((k, v))
}

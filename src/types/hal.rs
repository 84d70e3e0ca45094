//! Minimal HAL (`application/hal+json`) envelopes.

use std::collections::BTreeMap;

use serde::Serialize;

/// A single hypermedia link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub href: String,
}

/// Links keyed by relation name.
pub type Links = BTreeMap<&'static str, Link>;

/// A resource with its `_links`.
#[derive(Debug, Serialize)]
pub struct HalResource<T: Serialize> {
    #[serde(flatten)]
    pub data: T,
    #[serde(rename = "_links")]
    pub links: Links,
}

impl<T: Serialize> HalResource<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            links: Links::new(),
        }
    }

    /// Add (or replace) the link for `rel`.
    pub fn with_link(mut self, rel: &'static str, href: impl Into<String>) -> Self {
        self.links.insert(rel, Link { href: href.into() });
        self
    }
}

/// A collection embedded under one relation name.
#[derive(Debug, Serialize)]
pub struct HalCollection<T: Serialize> {
    #[serde(rename = "_embedded")]
    pub embedded: BTreeMap<&'static str, Vec<T>>,
    #[serde(rename = "_links")]
    pub links: Links,
}

impl<T: Serialize> HalCollection<T> {
    pub fn new(rel: &'static str, items: Vec<T>) -> Self {
        Self {
            embedded: BTreeMap::from([(rel, items)]),
            links: Links::new(),
        }
    }

    pub fn with_link(mut self, rel: &'static str, href: impl Into<String>) -> Self {
        self.links.insert(rel, Link { href: href.into() });
        self
    }
}

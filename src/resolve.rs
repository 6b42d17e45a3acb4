//! Link resolution against the response includes table.
//!
//! A field may hold either an inline entry (`{sys, fields}`) or a link
//! (`{sys: {type: "Link", linkType, id}}`). [`resolve`] turns both into an
//! [`EntryRef`]; anything it cannot find yields `None`, never an error.

use crate::model::{EntryRef, Includes};
use serde_json::Value;

/// Which partition of the includes table a link points into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkType {
    Entry,
    Asset,
}

impl LinkType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Entry" => Some(LinkType::Entry),
            "Asset" => Some(LinkType::Asset),
            _ => None,
        }
    }
}

/// A reference into the includes table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link<'a> {
    pub id: &'a str,
    pub link_type: LinkType,
}

/// Either an already-resolved entry or a link still to be looked up
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node<'a> {
    Inline(EntryRef<'a>),
    Link(Link<'a>),
}

impl<'a> Node<'a> {
    /// Classify a raw field value. Inline entries win over the link marker.
    ///
    /// Returns `None` for values that are neither (strings, arrays, malformed
    /// links, links with an unsupported `linkType`).
    pub fn parse(value: &'a Value) -> Option<Self> {
        if let Some(entry) = EntryRef::from_value(value) {
            return Some(Node::Inline(entry));
        }
        let sys = value.get("sys")?;
        let id = sys.get("id").and_then(Value::as_str)?;
        let link_type = sys.get("linkType").and_then(Value::as_str).and_then(LinkType::parse)?;
        Some(Node::Link(Link { id, link_type }))
    }
}

impl<'a> From<EntryRef<'a>> for Node<'a> {
    fn from(entry: EntryRef<'a>) -> Self {
        Node::Inline(entry)
    }
}

/// Resolve a node. Identity for inline entries.
pub fn resolve<'a>(node: Node<'a>, includes: &'a Includes) -> Option<EntryRef<'a>> {
    match node {
        Node::Inline(entry) => Some(entry),
        Node::Link(link) => {
            let found = match link.link_type {
                LinkType::Entry => includes.entry(link.id),
                LinkType::Asset => includes.asset(link.id),
            };
            if found.is_none() {
                log::debug!("unresolved {:?} link {}", link.link_type, link.id);
            }
            found.map(EntryRef::from)
        }
    }
}

/// Parse and resolve a raw field value in one step.
pub fn resolve_value<'a>(value: &'a Value, includes: &'a Includes) -> Option<EntryRef<'a>> {
    Node::parse(value).and_then(|node| resolve(node, includes))
}

/// Resolve every element of an array field, dropping the unresolvable ones.
/// A missing or non-array value yields an empty list.
pub fn resolve_all<'a>(value: Option<&'a Value>, includes: &'a Includes) -> Vec<EntryRef<'a>> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(|v| resolve_value(v, includes)).collect())
        .unwrap_or_default()
}

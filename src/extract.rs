//! Field extraction under naming variance.
//!
//! Content models evolved over time, so the "same" slot may live under several
//! field names and in several shapes. Every raw value is classified once into a
//! [`FieldValue`] here; callers match on the variant instead of probing JSON.

use crate::model::{EntryRef, Fields, Includes};
use crate::resolve::{resolve, Link, Node};
use serde_json::{Map, Number, Value};

pub const NAV_NAME_FIELDS: &[&str] = &["navigationTitle", "name", "label", "title", "entryTitle"];
pub const HREF_FIELDS: &[&str] = &["href", "slug", "path"];
pub const NAV_CHILD_FIELDS: &[&str] = &["children", "subItems", "navigationItems"];

pub const BACKGROUND_IMAGE_FIELDS: &[&str] = &["backgroundImage", "background", "image", "heroImage"];
pub const PRODUCT_IMAGE_FIELDS: &[&str] = &["productImage", "product", "overlayImage"];
pub const CONTENT_IMAGE_FIELDS: &[&str] = &["image", "imageAsset", "photo", "picture"];
pub const CLIENT_LOGO_FIELDS: &[&str] = &["logoDark", "image", "logo"];

pub const RICH_TEXT_FIELDS: &[&str] = &["content", "body", "text", "description", "richText", "richContent"];

pub const ICON_NAME_FIELDS: &[&str] = &["iconName", "name", "entryTitle"];

pub const CARD_TITLE_FIELDS: &[&str] = &["cardTitle", "title"];
pub const CARD_SUBTITLE_FIELDS: &[&str] = &["shortDescription", "subtitle", "price"];
pub const BACKGROUND_COLOR_FIELDS: &[&str] = &["backgroundColor", "background"];

/// Shape of a single field value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Bool(bool),
    Number(&'a Number),
    /// Structured rich-text document (`nodeType: "document"`)
    Document(&'a Value),
    /// Nested entry delivered inline
    Entry(EntryRef<'a>),
    /// Reference still to be looked up in the includes
    Link(Link<'a>),
    /// Cloudinary-style image descriptors (`secure_url` / `url`)
    Images(&'a [Value]),
    /// Any other array, usually entry references
    List(&'a [Value]),
    /// Asset file descriptor (`{url, contentType, ...}`)
    File(&'a Map<String, Value>),
    Object(&'a Map<String, Value>),
}

impl<'a> FieldValue<'a> {
    /// Classify a raw value. Null and the empty string count as absent.
    pub fn classify(value: &'a Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(FieldValue::Text(s)),
            Value::Bool(b) => Some(FieldValue::Bool(*b)),
            Value::Number(n) => Some(FieldValue::Number(n)),
            Value::Array(items) => {
                if items.first().is_some_and(is_image_descriptor) {
                    Some(FieldValue::Images(items))
                } else {
                    Some(FieldValue::List(items))
                }
            }
            Value::Object(obj) => {
                if obj.get("nodeType").and_then(Value::as_str) == Some("document") {
                    return Some(FieldValue::Document(value));
                }
                match Node::parse(value) {
                    Some(Node::Inline(entry)) => Some(FieldValue::Entry(entry)),
                    Some(Node::Link(link)) => Some(FieldValue::Link(link)),
                    None if obj.get("url").is_some_and(Value::is_string) => Some(FieldValue::File(obj)),
                    None => Some(FieldValue::Object(obj)),
                }
            }
        }
    }

    pub fn as_text(&self) -> Option<&'a str> {
        match *self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, FieldValue::Text(_))
    }

    pub fn is_document(&self) -> bool {
        matches!(self, FieldValue::Document(_))
    }

    /// Inline entry or link, resolved against the includes.
    pub fn resolve(&self, includes: &'a Includes) -> Option<EntryRef<'a>> {
        match *self {
            FieldValue::Entry(entry) => Some(entry),
            FieldValue::Link(link) => resolve(Node::Link(link), includes),
            _ => None,
        }
    }
}

fn is_image_descriptor(value: &Value) -> bool {
    value.get("secure_url").is_some_and(Value::is_string) || value.get("url").is_some_and(Value::is_string)
}

/// First present field among `candidates`, in priority order.
pub fn extract_first<'a>(fields: &'a Fields, candidates: &[&str]) -> Option<FieldValue<'a>> {
    extract_first_where(fields, candidates, |_| true)
}

/// First present field among `candidates` that also satisfies `predicate`.
pub fn extract_first_where<'a, P>(fields: &'a Fields, candidates: &[&str], predicate: P) -> Option<FieldValue<'a>>
where
    P: Fn(&FieldValue<'a>) -> bool,
{
    candidates
        .iter()
        .filter_map(|name| fields.get(*name).and_then(FieldValue::classify))
        .find(|v| predicate(v))
}

/// First candidate holding a plain string
pub fn text<'a>(fields: &'a Fields, candidates: &[&str]) -> Option<&'a str> {
    extract_first_where(fields, candidates, FieldValue::is_text).and_then(|v| v.as_text())
}

/// Single string field
pub fn text_field<'a>(fields: &'a Fields, name: &str) -> Option<&'a str> {
    text(fields, &[name])
}

pub fn bool_field(fields: &Fields, name: &str) -> Option<bool> {
    fields.get(name).and_then(Value::as_bool)
}

/// First candidate holding a structured rich-text document
pub fn document<'a>(fields: &'a Fields, candidates: &[&str]) -> Option<&'a Value> {
    match extract_first_where(fields, candidates, FieldValue::is_document) {
        Some(FieldValue::Document(doc)) => Some(doc),
        _ => None,
    }
}

/// Resolve a single reference field (inline entry or link)
pub fn entry<'a>(fields: &'a Fields, name: &str, includes: &'a Includes) -> Option<EntryRef<'a>> {
    fields
        .get(name)
        .and_then(FieldValue::classify)
        .and_then(|v| v.resolve(includes))
}

/// Icon name from a bare string, or from a linked "icon" entry's
/// `iconName` / `name` / `entryTitle`.
pub fn icon_name<'a>(fields: &'a Fields, name: &str, includes: &'a Includes) -> Option<&'a str> {
    match fields.get(name).and_then(FieldValue::classify)? {
        FieldValue::Text(s) => Some(s),
        other => other.resolve(includes).and_then(|icon| text(icon.fields, ICON_NAME_FIELDS)),
    }
}

//! CMS entry shapes as delivered by the Content Delivery API.
//!
//! Entries and assets share the same outer shape (`sys` + `fields`), so both are
//! represented by [`Entry`]. Field values stay as raw JSON here; typed access goes
//! through [`crate::extract`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field map of an entry or asset
pub type Fields = Map<String, Value>;

/// Assets are entries without a content type
pub type Asset = Entry;

/// System metadata attached to every entry, asset and link
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sys {
    #[serde(default)]
    pub id: String,
    /// `Entry`, `Asset` or `Link`
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Present on links only: `Entry` or `Asset`
    #[serde(rename = "linkType", default, skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,
    #[serde(rename = "contentType", default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentTypeLink>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentTypeLink {
    pub sys: ContentTypeSys,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentTypeSys {
    pub id: String,
}

/// A CMS entry (or asset) with its field map
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub sys: Sys,
    #[serde(default)]
    pub fields: Fields,
}

impl Entry {
    pub fn id(&self) -> &str {
        &self.sys.id
    }

    pub fn content_type_id(&self) -> Option<&str> {
        self.sys.content_type.as_ref().map(|ct| ct.sys.id.as_str())
    }

    pub fn view(&self) -> EntryRef<'_> {
        EntryRef {
            id: &self.sys.id,
            content_type: self.content_type_id(),
            fields: &self.fields,
        }
    }
}

/// Response side table holding everything referenced but not inlined
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Includes {
    #[serde(rename = "Entry", default)]
    pub entries: Vec<Entry>,
    #[serde(rename = "Asset", default)]
    pub assets: Vec<Asset>,
}

impl Includes {
    pub fn entry(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.sys.id == id)
    }

    pub fn asset(&self, id: &str) -> Option<&Asset> {
        self.assets.iter().find(|a| a.sys.id == id)
    }
}

/// `{ items, includes }` as returned by an entries query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub items: Vec<Entry>,
    #[serde(default)]
    pub includes: Includes,
}

impl QueryResponse {
    /// First matching item, if the query found anything
    pub fn first(&self) -> Option<&Entry> {
        self.items.first()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Borrowed view of a resolved entry, whether it came inline or from the includes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryRef<'a> {
    pub id: &'a str,
    pub content_type: Option<&'a str>,
    pub fields: &'a Fields,
}

impl<'a> EntryRef<'a> {
    /// View an inline JSON value as an entry. Requires a `fields` object.
    pub fn from_value(value: &'a Value) -> Option<Self> {
        let obj = value.as_object()?;
        let fields = obj.get("fields")?.as_object()?;
        let sys = obj.get("sys");
        let id = sys.and_then(|s| s.get("id")).and_then(Value::as_str).unwrap_or("");
        let content_type = sys
            .and_then(|s| s.pointer("/contentType/sys/id"))
            .and_then(Value::as_str);
        Some(Self { id, content_type, fields })
    }

    pub fn field(&self, name: &str) -> Option<&'a Value> {
        self.fields.get(name)
    }
}

impl<'a> From<&'a Entry> for EntryRef<'a> {
    fn from(entry: &'a Entry) -> Self {
        entry.view()
    }
}

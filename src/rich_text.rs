//! Rich-text document tree.
//!
//! Converts the CMS's structured document JSON (`nodeType` / `content` /
//! `marks`) into a typed tree. Embedded entries and assets are resolved
//! against the includes; ones that cannot be resolved are dropped.

use crate::extract;
use crate::image::{self, Image};
use crate::model::Includes;
use crate::resolve::{resolve, Link, LinkType, Node};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNode {
    node_type: String,
    #[serde(default)]
    data: Value,
    #[serde(default)]
    content: Vec<RawNode>,
    #[serde(default)]
    value: Option<String>,
    #[serde(default)]
    marks: Vec<RawMark>,
}

#[derive(Debug, Deserialize)]
struct RawMark {
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mark {
    Bold,
    Italic,
    Underline,
    Code,
    Superscript,
    Subscript,
    Strikethrough,
}

impl Mark {
    fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "bold" => Mark::Bold,
            "italic" => Mark::Italic,
            "underline" => Mark::Underline,
            "code" => Mark::Code,
            "superscript" => Mark::Superscript,
            "subscript" => Mark::Subscript,
            "strikethrough" => Mark::Strikethrough,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockKind {
    Paragraph,
    Heading(u8),
    UnorderedList,
    OrderedList,
    ListItem,
    Quote,
    Hr,
    Table,
    TableRow,
    TableCell,
    TableHeaderCell,
    /// Node type this crate does not know; children are kept
    Unknown(String),
}

impl BlockKind {
    fn parse(node_type: &str) -> Self {
        match node_type {
            "paragraph" => BlockKind::Paragraph,
            "unordered-list" => BlockKind::UnorderedList,
            "ordered-list" => BlockKind::OrderedList,
            "list-item" => BlockKind::ListItem,
            "blockquote" => BlockKind::Quote,
            "hr" => BlockKind::Hr,
            "table" => BlockKind::Table,
            "table-row" => BlockKind::TableRow,
            "table-cell" => BlockKind::TableCell,
            "table-header-cell" => BlockKind::TableHeaderCell,
            other => match other.strip_prefix("heading-").and_then(|n| n.parse::<u8>().ok()) {
                Some(level @ 1..=6) => BlockKind::Heading(level),
                _ => BlockKind::Unknown(other.to_string()),
            },
        }
    }
}

/// Downloadable file behind an asset hyperlink
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetTarget {
    pub url: String,
    pub title: Option<String>,
    pub content_type: Option<String>,
}

/// Summary of an embedded or hyperlinked entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbeddedEntry {
    pub id: String,
    pub content_type: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum RichNode {
    Block { kind: BlockKind, children: Vec<RichNode> },
    Text { value: String, marks: Vec<Mark> },
    Hyperlink { uri: String, external: bool, children: Vec<RichNode> },
    /// `target` is `None` when the linked entry is not in the includes
    EntryHyperlink { target: Option<EmbeddedEntry>, children: Vec<RichNode> },
    /// Links to any asset kind; `target` is `None` when unresolvable
    AssetHyperlink { target: Option<AssetTarget>, children: Vec<RichNode> },
    EmbeddedEntry { entry: EmbeddedEntry, inline: bool },
    EmbeddedAsset { image: Image, caption: Option<String> },
}

impl RichNode {
    fn children(&self) -> &[RichNode] {
        match self {
            RichNode::Block { children, .. }
            | RichNode::Hyperlink { children, .. }
            | RichNode::EntryHyperlink { children, .. }
            | RichNode::AssetHyperlink { children, .. } => children,
            _ => &[],
        }
    }

    fn write_text(&self, out: &mut String) {
        if let RichNode::Text { value, .. } = self {
            out.push_str(value);
        }
        for child in self.children() {
            child.write_text(out);
        }
    }
}

/// A resolved rich-text document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RichDocument {
    pub nodes: Vec<RichNode>,
}

impl RichDocument {
    /// Parse a `nodeType: "document"` value. Malformed documents yield `None`.
    pub fn parse(value: &Value, includes: &Includes) -> Option<Self> {
        let raw = match RawNode::deserialize(value) {
            Ok(raw) if raw.node_type == "document" => raw,
            Ok(raw) => {
                log::debug!("expected a document node, found {}", raw.node_type);
                return None;
            }
            Err(e) => {
                log::debug!("malformed rich-text document: {}", e);
                return None;
            }
        };
        Some(Self { nodes: convert_all(&raw.content, includes) })
    }

    /// Text content with top-level blocks separated by newlines.
    pub fn plain_text(&self) -> String {
        self.nodes
            .iter()
            .map(|n| {
                let mut s = String::new();
                n.write_text(&mut s);
                s
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

fn convert_all(nodes: &[RawNode], includes: &Includes) -> Vec<RichNode> {
    nodes.iter().filter_map(|n| convert(n, includes)).collect()
}

fn convert(node: &RawNode, includes: &Includes) -> Option<RichNode> {
    let children = || convert_all(&node.content, includes);
    match node.node_type.as_str() {
        "text" => Some(RichNode::Text {
            value: node.value.clone().unwrap_or_default(),
            marks: node.marks.iter().filter_map(|m| Mark::parse(&m.kind)).collect(),
        }),
        "hyperlink" => {
            let uri = node.data.get("uri").and_then(Value::as_str).unwrap_or("#").to_string();
            Some(RichNode::Hyperlink { external: uri.starts_with("http"), uri, children: children() })
        }
        "entry-hyperlink" => Some(RichNode::EntryHyperlink { target: embedded_entry(&node.data, includes), children: children() }),
        "asset-hyperlink" => Some(RichNode::AssetHyperlink { target: asset_target(&node.data, includes), children: children() }),
        "embedded-entry-block" | "embedded-entry-inline" => Some(RichNode::EmbeddedEntry {
            entry: embedded_entry(&node.data, includes)?,
            inline: node.node_type.ends_with("inline"),
        }),
        "embedded-asset-block" => {
            let (image, caption) = embedded_image(&node.data, includes)?;
            Some(RichNode::EmbeddedAsset { image, caption })
        }
        other => Some(RichNode::Block { kind: BlockKind::parse(other), children: children() }),
    }
}

fn target_link(data: &Value, link_type: LinkType) -> Option<Node<'_>> {
    let id = data.pointer("/target/sys/id").and_then(Value::as_str)?;
    Some(Node::Link(Link { id, link_type }))
}

fn embedded_entry(data: &Value, includes: &Includes) -> Option<EmbeddedEntry> {
    let entry = resolve(target_link(data, LinkType::Entry)?, includes)?;
    Some(EmbeddedEntry {
        id: entry.id.to_string(),
        content_type: entry.content_type.map(str::to_string),
        title: extract::text(entry.fields, &["title", "entryTitle", "name", "heading"]).map(str::to_string),
    })
}

fn asset_target(data: &Value, includes: &Includes) -> Option<AssetTarget> {
    let asset = resolve(target_link(data, LinkType::Asset)?, includes)?;
    let file = asset.field("file")?;
    let url = file.get("url").and_then(Value::as_str).filter(|u| !u.is_empty())?;
    Some(AssetTarget {
        url: image::normalize_url(url),
        title: extract::text_field(asset.fields, "title").map(str::to_string),
        content_type: file.get("contentType").and_then(Value::as_str).map(str::to_string),
    })
}

/// Only image assets render; other asset kinds are omitted.
fn embedded_image(data: &Value, includes: &Includes) -> Option<(Image, Option<String>)> {
    let asset = resolve(target_link(data, LinkType::Asset)?, includes)?;
    let file = asset.field("file")?;
    let is_image = file
        .get("contentType")
        .and_then(Value::as_str)
        .is_some_and(|ct| ct.starts_with("image/"));
    if !is_image {
        return None;
    }
    let url = file.get("url").and_then(Value::as_str).filter(|u| !u.is_empty())?;
    let title = extract::text_field(asset.fields, "title");
    let alt = extract::text_field(asset.fields, "description").or(title).unwrap_or_default();
    Some((Image { url: image::normalize_url(url), alt: alt.to_string() }, title.map(str::to_string)))
}

//! Navigation tree building.
//!
//! Resolves a navigation entry's `navigationItems` into top-level items with
//! at most one level of children. Grandchildren are never resolved.

use crate::cta::{ButtonStyle, Cta};
use crate::extract::{self, FieldValue, HREF_FIELDS, NAV_CHILD_FIELDS, NAV_NAME_FIELDS};
use crate::image::{self, Image};
use crate::model::{EntryRef, Includes};
use crate::resolve::{resolve_all, resolve_value};
use serde::Serialize;

const LOGO_ALT: &str = "Logo";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub name: String,
    pub href: String,
    pub description: Option<String>,
    /// `None` when the item has no resolvable children
    pub children: Option<Vec<NavItem>>,
}

impl NavItem {
    pub fn new(name: impl Into<String>, href: impl Into<String>) -> Self {
        Self { name: name.into(), href: href.into(), description: None, children: None }
    }
}

/// Navigation bar data: items plus the optional logo and CTA
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub items: Vec<NavItem>,
    pub logo: Option<Image>,
    pub cta: Option<Cta>,
}

impl Default for Navigation {
    fn default() -> Self {
        Self { items: fallback_items(), logo: None, cta: None }
    }
}

/// Substituted whenever no item resolves.
pub fn fallback_items() -> Vec<NavItem> {
    vec![NavItem::new("Home", "/")]
}

/// `"About Us"` becomes `"/about-us"`; an empty name becomes `"#"`.
pub fn slug_href(name: &str) -> String {
    if name.is_empty() {
        return "#".to_string();
    }
    let slug = name.to_lowercase().split_whitespace().collect::<Vec<_>>().join("-");
    format!("/{}", slug)
}

fn item(entry: EntryRef<'_>) -> NavItem {
    let f = entry.fields;
    let name = extract::text(f, NAV_NAME_FIELDS).unwrap_or_default();
    let href = extract::text(f, HREF_FIELDS).map(str::to_string).unwrap_or_else(|| slug_href(name));
    NavItem {
        name: name.to_string(),
        href,
        description: extract::text_field(f, "description").map(str::to_string),
        children: None,
    }
}

/// Resolve the navigation items. Never returns an empty list.
pub fn build(nav: EntryRef<'_>, includes: &Includes) -> Vec<NavItem> {
    let items: Vec<NavItem> = resolve_all(nav.field("navigationItems"), includes)
        .into_iter()
        .map(|entry| {
            let mut top = item(entry);
            let child_list = extract::extract_first_where(entry.fields, NAV_CHILD_FIELDS, |v| {
                matches!(v, FieldValue::List(_) | FieldValue::Images(_))
            });
            if let Some(FieldValue::List(children) | FieldValue::Images(children)) = child_list {
                let children: Vec<NavItem> = children
                    .iter()
                    .filter_map(|c| resolve_value(c, includes))
                    .map(item)
                    .collect();
                if !children.is_empty() {
                    top.children = Some(children);
                }
            }
            top
        })
        .collect();

    if items.is_empty() {
        log::debug!("navigation {}: no resolvable items; using fallback", nav.id);
        return fallback_items();
    }
    items
}

/// Items plus logo and CTA.
pub fn build_navigation(nav: EntryRef<'_>, includes: &Includes) -> Navigation {
    let logo = nav.field("logo").and_then(|v| image::resolve(v, includes)).map(|mut img| {
        if img.alt.is_empty() {
            img.alt = LOGO_ALT.to_string();
        }
        img
    });
    Navigation {
        items: build(nav, includes),
        logo,
        cta: Cta::resolve(nav.field("cta"), includes, ButtonStyle::default()),
    }
}

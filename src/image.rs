//! Image reference resolution.
//!
//! An image slot may hold a Cloudinary-style descriptor array
//! (`[{secure_url|url, altText}]`), an image entry wrapping such an array in its
//! `image` field, or a CMS asset with a `file` descriptor. Descriptor arrays are
//! tried before asset files.

use crate::extract::{self, FieldValue};
use crate::model::{EntryRef, Fields, Includes};
use serde::Serialize;
use serde_json::Value;

/// A render-ready image
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Image {
    pub url: String,
    /// May be empty when the CMS supplies no alt text
    pub alt: String,
}

/// Prefix protocol-relative URLs (`//host/path`) with `https:`.
pub fn normalize_url(url: &str) -> String {
    if url.starts_with("//") {
        format!("https:{}", url)
    } else {
        url.to_string()
    }
}

fn from_descriptors(items: &[Value]) -> Option<(String, Option<&str>)> {
    let first = items.first()?;
    let url = ["secure_url", "url"]
        .iter()
        .find_map(|k| first.get(*k).and_then(Value::as_str).filter(|s| !s.is_empty()))?;
    let alt = first.get("altText").and_then(Value::as_str);
    Some((normalize_url(url), alt))
}

/// Resolve an image (or asset) entry's fields to an image.
pub fn from_entry(entry: EntryRef<'_>) -> Option<Image> {
    from_fields(entry.fields)
}

/// Resolve the field map of an image entry or asset.
pub fn from_fields(fields: &Fields) -> Option<Image> {
    if let Some(FieldValue::Images(items)) = fields.get("image").and_then(FieldValue::classify) {
        if let Some((url, alt)) = from_descriptors(items) {
            let alt = extract::text_field(fields, "altText").or(alt).unwrap_or_default();
            return Some(Image { url, alt: alt.to_string() });
        }
    }
    let file = fields.get("file")?;
    let url = file.get("url").and_then(Value::as_str).filter(|s| !s.is_empty())?;
    let alt = extract::text(fields, &["title", "description"]).unwrap_or_default();
    Some(Image { url: normalize_url(url), alt: alt.to_string() })
}

/// Resolve any image-shaped field value.
pub fn resolve(value: &Value, includes: &Includes) -> Option<Image> {
    match FieldValue::classify(value)? {
        FieldValue::Images(items) => {
            let (url, alt) = from_descriptors(items)?;
            Some(Image { url, alt: alt.unwrap_or_default().to_string() })
        }
        other => other.resolve(includes).and_then(from_entry),
    }
}

/// First candidate field that yields an image.
pub fn first_image(fields: &Fields, candidates: &[&str], includes: &Includes) -> Option<Image> {
    candidates
        .iter()
        .filter_map(|name| fields.get(*name))
        .find_map(|v| resolve(v, includes))
}

/// Same as [`first_image`], using `fallback_alt` when the image carries none.
pub fn first_image_or_alt(fields: &Fields, candidates: &[&str], includes: &Includes, fallback_alt: &str) -> Option<Image> {
    first_image(fields, candidates, includes).map(|mut img| {
        if img.alt.is_empty() {
            img.alt = fallback_alt.to_string();
        }
        img
    })
}

//! Call-to-action unification.
//!
//! Two CTA shapes coexist in the content model: the legacy
//! `{text, url, showArrow}` and the current
//! `{ctaLabel, ctaLink, icon, openInNewTab, style}`. Current fields win when
//! present. A CTA without any link is absent.

use crate::extract::{self, FieldValue};
use crate::icon::{self, Icon};
use crate::model::{Fields, Includes};
use serde::Serialize;
use serde_json::Value;

pub const DEFAULT_LABEL: &str = "Learn More";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ButtonStyle {
    #[default]
    PrimaryBrandBlue,
    White,
}

impl ButtonStyle {
    /// Unrecognised style names fall back to the primary style.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "White" | "white" => ButtonStyle::White,
            _ => ButtonStyle::PrimaryBrandBlue,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cta {
    pub label: String,
    pub href: String,
    pub icon: Option<Icon>,
    pub open_in_new_tab: bool,
    pub style: ButtonStyle,
}

impl Cta {
    /// Build from a CTA entry's fields.
    pub fn from_fields(fields: &Fields, includes: &Includes, default_style: ButtonStyle) -> Option<Self> {
        let href = extract::text(fields, &["ctaLink", "url"])?;
        let label = extract::text(fields, &["ctaLabel", "text"]).unwrap_or(DEFAULT_LABEL);

        let icon = match extract::icon_name(fields, "icon", includes) {
            Some(name) => icon::lookup(name),
            None if extract::bool_field(fields, "showArrow") != Some(false) => Some(Icon::ARROW_UP_RIGHT),
            None => None,
        };

        let style = extract::text_field(fields, "style").map(ButtonStyle::parse).unwrap_or(default_style);

        Some(Self {
            label: label.to_string(),
            href: href.to_string(),
            icon,
            open_in_new_tab: extract::bool_field(fields, "openInNewTab").unwrap_or(false),
            style,
        })
    }

    /// Resolve a CTA reference field (inline entry or link).
    pub fn resolve(value: Option<&Value>, includes: &Includes, default_style: ButtonStyle) -> Option<Self> {
        let entry = value.and_then(FieldValue::classify)?.resolve(includes)?;
        Self::from_fields(entry.fields, includes, default_style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cta(v: Value) -> Option<Cta> {
        Cta::from_fields(v.as_object().unwrap(), &Includes::default(), ButtonStyle::default())
    }

    #[test]
    fn legacy_shape() {
        let c = cta(json!({ "text": "X", "url": "u1" })).unwrap();
        assert_eq!(c.label, "X");
        assert_eq!(c.href, "u1");
        assert_eq!(c.icon, Some(Icon::ARROW_UP_RIGHT));
        assert!(!c.open_in_new_tab);
    }

    #[test]
    fn current_shape_wins() {
        let c = cta(json!({ "text": "X", "url": "u1", "ctaLabel": "Y", "ctaLink": "u2" })).unwrap();
        assert_eq!(c.label, "Y");
        assert_eq!(c.href, "u2");
    }

    #[test]
    fn no_link_means_no_cta() {
        assert!(cta(json!({ "text": "X" })).is_none());
        assert!(cta(json!({ "ctaLabel": "Y", "ctaLink": "" })).is_none());
    }

    #[test]
    fn label_defaults_and_arrow_opt_out() {
        let c = cta(json!({ "url": "/contact", "showArrow": false })).unwrap();
        assert_eq!(c.label, DEFAULT_LABEL);
        assert_eq!(c.icon, None);
    }

    #[test]
    fn explicit_icon_and_target() {
        let c = cta(json!({ "ctaLabel": "Go", "ctaLink": "https://x", "icon": "rocket", "openInNewTab": true, "style": "White" })).unwrap();
        assert_eq!(c.icon.map(|i| i.component()), Some("Rocket"));
        assert!(c.open_in_new_tab);
        assert_eq!(c.style, ButtonStyle::White);
    }

    #[test]
    fn default_style_applies_only_when_unset() {
        let f = json!({ "ctaLink": "/a" });
        let c = Cta::from_fields(f.as_object().unwrap(), &Includes::default(), ButtonStyle::White).unwrap();
        assert_eq!(c.style, ButtonStyle::White);

        let f = json!({ "ctaLink": "/a", "style": "Primary Brand Blue" });
        let c = Cta::from_fields(f.as_object().unwrap(), &Includes::default(), ButtonStyle::White).unwrap();
        assert_eq!(c.style, ButtonStyle::PrimaryBrandBlue);
    }

    #[test]
    fn resolves_linked_cta_entry() {
        let includes: Includes = serde_json::from_value(json!({
            "Entry": [{ "sys": { "id": "c1" }, "fields": { "ctaLabel": "Book a demo", "ctaLink": "/demo" } }]
        }))
        .unwrap();
        let link = json!({ "sys": { "type": "Link", "linkType": "Entry", "id": "c1" } });
        let c = Cta::resolve(Some(&link), &includes, ButtonStyle::default()).unwrap();
        assert_eq!(c.label, "Book a demo");
        assert!(Cta::resolve(None, &includes, ButtonStyle::default()).is_none());
    }
}

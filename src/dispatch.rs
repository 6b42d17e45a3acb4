//! Content-type dispatch.
//!
//! Maps a declared content-type id to the section kind that renders it. The
//! mapping is total: anything unrecognised is [`SectionKind::Unknown`], which
//! renders through the generic content-block fallback.

use crate::model::EntryRef;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SectionKind {
    Hero,
    Carousel,
    Feature,
    CardGroup,
    ContentBlock,
    Unknown,
}

/// Hero layout variants, each its own content type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HeroLayout {
    /// `pageHero`: title, subtitle and a screenshot image
    Screenshot,
    /// `pageHeroV2`: title, subtitle, highlight list and hero cards
    Cards,
}

pub fn classify_content_type(content_type: Option<&str>) -> SectionKind {
    match content_type {
        Some("pageHero" | "pageHeroV2") => SectionKind::Hero,
        Some("carousel") => SectionKind::Carousel,
        Some("feature") => SectionKind::Feature,
        Some("cardGroup") => SectionKind::CardGroup,
        Some("contentSection" | "content") => SectionKind::ContentBlock,
        _ => SectionKind::Unknown,
    }
}

pub fn classify(entry: &EntryRef<'_>) -> SectionKind {
    classify_content_type(entry.content_type)
}

pub fn hero_layout(content_type: Option<&str>) -> HeroLayout {
    match content_type {
        Some("pageHeroV2") => HeroLayout::Cards,
        _ => HeroLayout::Screenshot,
    }
}

impl SectionKind {
    /// Unknown content renders with the content-block fallback.
    pub fn renderer(self) -> SectionKind {
        match self {
            SectionKind::Unknown => SectionKind::ContentBlock,
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_content_types() {
        assert_eq!(classify_content_type(Some("pageHero")), SectionKind::Hero);
        assert_eq!(classify_content_type(Some("pageHeroV2")), SectionKind::Hero);
        assert_eq!(classify_content_type(Some("carousel")), SectionKind::Carousel);
        assert_eq!(classify_content_type(Some("feature")), SectionKind::Feature);
        assert_eq!(classify_content_type(Some("cardGroup")), SectionKind::CardGroup);
        assert_eq!(classify_content_type(Some("contentSection")), SectionKind::ContentBlock);
    }

    #[test]
    fn everything_else_is_unknown_and_falls_back() {
        for ct in [Some("testimonial"), Some(""), Some("PageHero"), None] {
            let kind = classify_content_type(ct);
            assert_eq!(kind, SectionKind::Unknown);
            assert_eq!(kind.renderer(), SectionKind::ContentBlock);
        }
    }

    #[test]
    fn hero_layouts() {
        assert_eq!(hero_layout(Some("pageHeroV2")), HeroLayout::Cards);
        assert_eq!(hero_layout(Some("pageHero")), HeroLayout::Screenshot);
    }
}

//! Section view models and their builders.
//!
//! Each builder reads one resolved entry and produces the data its renderer
//! consumes. Builders never fail: missing fields become `None` or empty lists.

use crate::cta::{ButtonStyle, Cta};
use crate::dispatch::{self, HeroLayout, SectionKind};
use crate::extract::{self, CARD_SUBTITLE_FIELDS, CARD_TITLE_FIELDS};
use crate::icon::{self, Icon};
use crate::image::{self, Image};
use crate::model::{EntryRef, Fields, Includes};
use crate::resolve::resolve_all;
use crate::rich_text::RichDocument;
use serde::Serialize;

const CLIENT_LOGO_ALT: &str = "Client logo";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Section {
    Hero(Hero),
    Carousel(Carousel),
    Feature(Feature),
    CardGroup(CardGroup),
    ContentBlock(ContentBlock),
    /// Unrecognised content type, rendered with the content-block fallback
    Unknown(ContentBlock),
}

impl Section {
    pub fn kind(&self) -> SectionKind {
        match self {
            Section::Hero(_) => SectionKind::Hero,
            Section::Carousel(_) => SectionKind::Carousel,
            Section::Feature(_) => SectionKind::Feature,
            Section::CardGroup(_) => SectionKind::CardGroup,
            Section::ContentBlock(_) => SectionKind::ContentBlock,
            Section::Unknown(_) => SectionKind::Unknown,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Section::Hero(s) => &s.id,
            Section::Carousel(s) => &s.id,
            Section::Feature(s) => &s.id,
            Section::CardGroup(s) => &s.id,
            Section::ContentBlock(s) | Section::Unknown(s) => &s.id,
        }
    }

    /// Build the section for an entry of an already-classified kind.
    pub fn build(kind: SectionKind, entry: EntryRef<'_>, includes: &Includes) -> Self {
        match kind {
            SectionKind::Hero => Section::Hero(Hero::build(entry, includes)),
            SectionKind::Carousel => Section::Carousel(Carousel::build(entry, includes)),
            SectionKind::Feature => Section::Feature(Feature::build(entry, includes)),
            SectionKind::CardGroup => Section::CardGroup(CardGroup::build(entry, includes)),
            SectionKind::ContentBlock => Section::ContentBlock(ContentBlock::build(entry, includes)),
            SectionKind::Unknown => Section::Unknown(ContentBlock::build(entry, includes)),
        }
    }
}

fn owned(s: Option<&str>) -> Option<String> {
    s.map(str::to_string)
}

fn icon_for(fields: &Fields, name: &str, includes: &Includes) -> Option<Icon> {
    extract::icon_name(fields, name, includes).and_then(icon::lookup)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hero {
    pub id: String,
    pub layout: HeroLayout,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub image: Option<Image>,
    pub highlights: Vec<ListItem>,
    pub cards: Vec<HeroCard>,
}

impl Hero {
    pub fn build(entry: EntryRef<'_>, includes: &Includes) -> Self {
        let f = entry.fields;
        Self {
            id: entry.id.to_string(),
            layout: dispatch::hero_layout(entry.content_type),
            title: owned(extract::text_field(f, "titleText")),
            subtitle: owned(extract::text_field(f, "subtitleText")),
            image: image::first_image(f, &["image"], includes),
            highlights: resolve_all(f.get("highlights"), includes)
                .into_iter()
                .filter_map(|e| ListItem::build(e, includes))
                .collect(),
            cards: resolve_all(f.get("cards"), includes)
                .into_iter()
                .map(|e| HeroCard::build(e, includes))
                .collect(),
        }
    }
}

/// Numbered or iconned list item (hero highlights, rich-text lists)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListItem {
    pub label: Option<String>,
    /// Takes precedence over `label` when present
    pub icon: Option<Icon>,
    pub title: Option<String>,
    pub text: Option<String>,
}

impl ListItem {
    /// `None` when the item has nothing to show.
    pub fn build(entry: EntryRef<'_>, includes: &Includes) -> Option<Self> {
        let f = entry.fields;
        let item = Self {
            label: owned(extract::text_field(f, "itemLabel")),
            icon: icon_for(f, "itemIcon", includes),
            title: owned(extract::text_field(f, "itemTitle")),
            text: owned(extract::text_field(f, "itemText")),
        };
        if item.label.is_none() && item.icon.is_none() && item.title.is_none() && item.text.is_none() {
            return None;
        }
        Some(item)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeroCard {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub background_image: Option<Image>,
    pub product_image: Option<Image>,
    /// Used when no background image resolves
    pub background_color: Option<String>,
    pub cta: Option<Cta>,
}

impl HeroCard {
    pub fn build(entry: EntryRef<'_>, includes: &Includes) -> Self {
        let f = entry.fields;
        Self {
            title: owned(extract::text(f, CARD_TITLE_FIELDS)),
            subtitle: owned(extract::text(f, CARD_SUBTITLE_FIELDS)),
            background_image: image::first_image(f, extract::BACKGROUND_IMAGE_FIELDS, includes),
            product_image: image::first_image(f, extract::PRODUCT_IMAGE_FIELDS, includes),
            background_color: owned(extract::text(f, extract::BACKGROUND_COLOR_FIELDS)),
            cta: Cta::resolve(f.get("cta"), includes, ButtonStyle::White),
        }
    }
}

/// Row of client logos
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Carousel {
    pub id: String,
    pub title: Option<String>,
    pub logos: Vec<Image>,
}

impl Carousel {
    pub fn build(entry: EntryRef<'_>, includes: &Includes) -> Self {
        let f = entry.fields;
        let logos = resolve_all(f.get("carouselItems"), includes)
            .into_iter()
            .filter_map(|client| {
                let alt = extract::text(client.fields, &["name", "entryTitle"]).unwrap_or(CLIENT_LOGO_ALT);
                image::first_image_or_alt(client.fields, extract::CLIENT_LOGO_FIELDS, includes, alt)
            })
            .collect();
        Self {
            id: entry.id.to_string(),
            title: owned(extract::text_field(f, "title")),
            logos,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.logos.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum FeatureStyle {
    LargeLeft,
    LargeRight,
    /// "50/50"
    #[default]
    Split,
    Full,
}

impl FeatureStyle {
    /// Unknown styles fall back to the 50/50 split.
    pub fn parse(s: &str) -> Self {
        match s {
            "Large Left" => FeatureStyle::LargeLeft,
            "Large Right" => FeatureStyle::LargeRight,
            "Full" => FeatureStyle::Full,
            _ => FeatureStyle::Split,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feature {
    pub id: String,
    pub style: FeatureStyle,
    pub left: Option<FeatureContent>,
    pub right: Option<FeatureContent>,
}

impl Feature {
    pub fn build(entry: EntryRef<'_>, includes: &Includes) -> Self {
        let f = entry.fields;
        let side = |name: &str| extract::entry(f, name, includes).map(|e| FeatureContent::build(e, includes));
        Self {
            id: entry.id.to_string(),
            style: extract::text_field(f, "style").map(FeatureStyle::parse).unwrap_or_default(),
            left: side("contentLeft"),
            right: side("contentRight"),
        }
    }
}

/// One column of a feature section
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FeatureContent {
    CardGroup(CardGroup),
    RichText { document: RichDocument },
    Media { image: Option<Image>, text: TextFields },
}

impl FeatureContent {
    /// Card groups first, then rich text, then image plus plain fields.
    pub fn build(entry: EntryRef<'_>, includes: &Includes) -> Self {
        if dispatch::classify(&entry) == SectionKind::CardGroup {
            return FeatureContent::CardGroup(CardGroup::build(entry, includes));
        }
        if let Some(document) = rich_text(entry.fields, includes) {
            return FeatureContent::RichText { document };
        }
        FeatureContent::Media {
            image: image::first_image(entry.fields, extract::CONTENT_IMAGE_FIELDS, includes),
            text: TextFields::from_fields(entry.fields),
        }
    }
}

fn rich_text(fields: &Fields, includes: &Includes) -> Option<RichDocument> {
    extract::document(fields, extract::RICH_TEXT_FIELDS).and_then(|doc| RichDocument::parse(doc, includes))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub title: Option<String>,
    pub icon: Option<Icon>,
    pub description: Option<String>,
    pub cta: Option<Cta>,
}

impl Card {
    pub fn build(entry: EntryRef<'_>, includes: &Includes) -> Self {
        let f = entry.fields;
        Self {
            title: owned(extract::text_field(f, "cardTitle")),
            icon: icon_for(f, "icon", includes),
            description: owned(extract::text_field(f, "shortDescription")),
            cta: Cta::resolve(f.get("cta"), includes, ButtonStyle::default()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardGroup {
    pub id: String,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub cards: Vec<Card>,
    pub cta: Option<Cta>,
}

impl CardGroup {
    pub fn build(entry: EntryRef<'_>, includes: &Includes) -> Self {
        let f = entry.fields;
        Self {
            id: entry.id.to_string(),
            title: owned(extract::text_field(f, "title")),
            subtitle: owned(extract::text_field(f, "subtitle")),
            cards: resolve_all(f.get("cards"), includes)
                .into_iter()
                .map(|e| Card::build(e, includes))
                .collect(),
            cta: Cta::resolve(f.get("groupCta"), includes, ButtonStyle::default()),
        }
    }

    /// Groups without cards render nothing.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Plain-string copy fields dumped by the generic renderer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TextFields {
    pub title: Option<String>,
    pub heading: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub text: Option<String>,
}

impl TextFields {
    /// `description` and `text` are taken only when they are strings.
    pub fn from_fields(f: &Fields) -> Self {
        Self {
            title: owned(extract::text_field(f, "title")),
            heading: owned(extract::text_field(f, "heading")),
            subtitle: owned(extract::text_field(f, "subtitle")),
            description: owned(extract::text_field(f, "description")),
            text: owned(extract::text_field(f, "text")),
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BlockBody {
    RichText { document: RichDocument },
    Text(TextFields),
}

/// Generic section: optional image plus rich text or plain copy
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentBlock {
    pub id: String,
    pub content_type: Option<String>,
    pub image: Option<Image>,
    pub body: BlockBody,
}

impl ContentBlock {
    pub fn build(entry: EntryRef<'_>, includes: &Includes) -> Self {
        let body = match rich_text(entry.fields, includes) {
            Some(document) => BlockBody::RichText { document },
            None => BlockBody::Text(TextFields::from_fields(entry.fields)),
        };
        Self {
            id: entry.id.to_string(),
            content_type: owned(entry.content_type),
            image: image::first_image(entry.fields, extract::CONTENT_IMAGE_FIELDS, includes),
            body,
        }
    }
}

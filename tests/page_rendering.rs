//! Whole-page rendering from a saved CMS response

use cmspage::image::{self, Image};
use cmspage::memory::MemorySource;
use cmspage::section::{BlockBody, FeatureContent, FeatureStyle};
use cmspage::site::{PageState, Site};
use cmspage::{HeroPolicy, QueryResponse, Section, SiteConfig};
use serde_json::{json, Value};

fn link(kind: &str, id: &str) -> Value {
    json!({ "sys": { "type": "Link", "linkType": kind, "id": id } })
}

fn entry(id: &str, content_type: &str, fields: Value) -> Value {
    json!({ "sys": { "id": id, "type": "Entry", "contentType": { "sys": { "id": content_type } } }, "fields": fields })
}

fn home_response() -> QueryResponse {
    serde_json::from_value(json!({
        "items": [entry("home", "page", json!({
            "title": "Home",
            "slug": "/",
            "content": [
                link("Entry", "hero"),
                link("Entry", "logos"),
                link("Entry", "gone"),
                link("Entry", "split"),
                entry("legacy", "promoBanner", json!({ "heading": "Legacy promo", "description": "Still here" })),
                link("Entry", "hero-again")
            ]
        }))],
        "includes": {
            "Entry": [
                entry("hero", "pageHeroV2", json!({
                    "titleText": "Ship faster",
                    "highlights": [link("Entry", "hl1")],
                    "cards": [link("Entry", "card1")]
                })),
                entry("hl1", "listItem", json!({ "itemIcon": "shield-check", "itemTitle": "Fast" })),
                entry("card1", "heroCard", json!({
                    "cardTitle": "Pro",
                    "price": "$10",
                    "background": "#112233",
                    "productImage": link("Asset", "shot"),
                    "cta": { "sys": { "id": "c" }, "fields": { "ctaLink": "/pricing" } }
                })),
                entry("logos", "carousel", json!({ "title": "Trusted by", "carouselItems": [link("Entry", "acme"), link("Entry", "nologo")] })),
                entry("acme", "client", json!({ "name": "Acme", "logoDark": [{ "secure_url": "https://img/acme.svg" }] })),
                entry("nologo", "client", json!({ "name": "Ghost" })),
                entry("split", "feature", json!({
                    "style": "Large Right",
                    "contentLeft": link("Entry", "copy"),
                    "contentRight": link("Entry", "cards")
                })),
                entry("copy", "richCopy", json!({ "body": {
                    "nodeType": "document",
                    "content": [{ "nodeType": "paragraph", "content": [{ "nodeType": "text", "value": "Hello", "marks": [] }] }]
                } })),
                entry("cards", "cardGroup", json!({ "title": "Plans", "cards": [] })),
                entry("hero-again", "pageHero", json!({ "titleText": "Second hero" }))
            ],
            "Asset": [
                { "sys": { "id": "shot", "type": "Asset" }, "fields": { "title": "Dashboard", "file": { "url": "//images.example/shot.png", "contentType": "image/png" } } }
            ]
        }
    }))
    .unwrap()
}

fn ready(state: PageState) -> cmspage::AssembledPage {
    match state {
        PageState::Ready(page) => page,
        other => panic!("unexpected state {:?}", other),
    }
}

#[test]
fn renders_every_section_kind() {
    let site = Site::new(MemorySource::from_response(home_response()), SiteConfig::default());
    let page = ready(site.load_page("/"));

    let hero = match page.hero {
        Some(Section::Hero(hero)) => hero,
        other => panic!("unexpected hero {:?}", other),
    };
    assert_eq!(hero.title.as_deref(), Some("Ship faster"));
    assert_eq!(hero.highlights[0].icon.map(|i| i.component()), Some("ShieldCheck"));
    let card = &hero.cards[0];
    assert_eq!(card.subtitle.as_deref(), Some("$10"));
    assert_eq!(card.background_color.as_deref(), Some("#112233"));
    assert_eq!(
        card.product_image,
        Some(Image { url: "https://images.example/shot.png".into(), alt: "Dashboard".into() })
    );
    assert_eq!(card.cta.as_ref().map(|c| c.href.as_str()), Some("/pricing"));

    let ids: Vec<&str> = page.body.iter().map(Section::id).collect();
    assert_eq!(ids, vec!["logos", "split", "legacy"]);

    match &page.body[0] {
        Section::Carousel(c) => {
            assert_eq!(c.logos, vec![Image { url: "https://img/acme.svg".into(), alt: "Acme".into() }]);
        }
        other => panic!("unexpected section {:?}", other),
    }
    match &page.body[1] {
        Section::Feature(f) => {
            assert_eq!(f.style, FeatureStyle::LargeRight);
            match &f.left {
                Some(FeatureContent::RichText { document }) => assert_eq!(document.plain_text(), "Hello"),
                other => panic!("unexpected left column {:?}", other),
            }
            match &f.right {
                Some(FeatureContent::CardGroup(group)) => assert!(group.is_empty()),
                other => panic!("unexpected right column {:?}", other),
            }
        }
        other => panic!("unexpected section {:?}", other),
    }
    match &page.body[2] {
        Section::Unknown(block) => match &block.body {
            BlockBody::Text(text) => assert_eq!(text.heading.as_deref(), Some("Legacy promo")),
            other => panic!("unexpected body {:?}", other),
        },
        other => panic!("unexpected section {:?}", other),
    }
}

#[test]
fn demote_policy_keeps_second_hero() {
    let config = SiteConfig { duplicate_hero: HeroPolicy::DemoteDuplicates, ..SiteConfig::default() };
    let site = Site::new(MemorySource::from_response(home_response()), config);
    let page = ready(site.load_page(""));
    assert_eq!(page.body.last().map(Section::id), Some("hero-again"));
}

#[test]
fn serialized_page_is_tagged_by_kind() {
    let site = Site::new(MemorySource::from_response(home_response()), SiteConfig::default());
    let json = serde_json::to_value(site.load_page("/")).unwrap();
    assert_eq!(json["state"], "ready");
    assert_eq!(json["hero"]["kind"], "hero");
    assert_eq!(json["body"][0]["kind"], "carousel");
    assert_eq!(json["body"][1]["left"]["type"], "richText");
}

#[test]
fn image_slots_accept_descriptor_arrays_and_assets() {
    let descriptor = json!({ "image": [{ "secure_url": "https://res.example/a.jpg" }] });
    let asset = json!({ "file": { "url": "//cdn/z.jpg" } });

    let img = image::from_fields(descriptor.as_object().unwrap()).unwrap();
    assert_eq!(img.url, "https://res.example/a.jpg");
    let img = image::from_fields(asset.as_object().unwrap()).unwrap();
    assert_eq!(img.url, "https://cdn/z.jpg");
    assert!(image::from_fields(json!({ "title": "no file" }).as_object().unwrap()).is_none());
}

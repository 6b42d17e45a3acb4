//! Page assembly.
//!
//! Walks a page entry's `content` array in order, resolves each element,
//! classifies it and splits the result into a single hero plus an ordered body.

use crate::dispatch::{self, SectionKind};
use crate::extract;
use crate::model::{EntryRef, Includes};
use crate::resolve::resolve_value;
use crate::section::Section;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What to do with hero-typed entries after the first one
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeroPolicy {
    /// First hero wins; later heroes are dropped
    #[default]
    DropDuplicates,
    /// First hero wins; later heroes stay in the body at their position
    DemoteDuplicates,
}

/// Render-ready page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssembledPage {
    pub id: String,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub hero: Option<Section>,
    pub body: Vec<Section>,
}

/// Assemble with the default hero policy.
pub fn assemble(page: EntryRef<'_>, includes: &Includes) -> AssembledPage {
    assemble_with(page, includes, HeroPolicy::default())
}

pub fn assemble_with(page: EntryRef<'_>, includes: &Includes, policy: HeroPolicy) -> AssembledPage {
    let mut hero = None;
    let mut body = Vec::new();

    let items = page.field("content").and_then(Value::as_array).map(Vec::as_slice).unwrap_or_default();

    for (index, item) in items.iter().enumerate() {
        let Some(entry) = resolve_value(item, includes) else {
            log::debug!("page {}: content[{}] did not resolve; skipped", page.id, index);
            continue;
        };
        let kind = dispatch::classify(&entry);
        if kind == SectionKind::Unknown {
            log::debug!("page {}: content[{}] has unknown content type {:?}", page.id, index, entry.content_type);
        }
        let section = Section::build(kind, entry, includes);

        if kind != SectionKind::Hero {
            body.push(section);
        } else if hero.is_none() {
            hero = Some(section);
        } else {
            match policy {
                HeroPolicy::DropDuplicates => {
                    log::debug!("page {}: extra hero {} dropped", page.id, entry.id);
                }
                HeroPolicy::DemoteDuplicates => body.push(section),
            }
        }
    }

    AssembledPage {
        id: page.id.to_string(),
        title: extract::text_field(page.fields, "title").map(str::to_string),
        slug: extract::text_field(page.fields, "slug").map(str::to_string),
        hero,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn link(id: &str) -> Value {
        json!({ "sys": { "type": "Link", "linkType": "Entry", "id": id } })
    }

    fn typed(id: &str, ct: &str) -> Value {
        json!({ "sys": { "id": id, "contentType": { "sys": { "id": ct } } }, "fields": { "title": id } })
    }

    fn includes() -> Includes {
        serde_json::from_value(json!({ "Entry": [typed("hero1", "pageHero"), typed("feat1", "feature"), typed("hero2", "pageHeroV2")] })).unwrap()
    }

    fn ids(sections: &[Section]) -> Vec<&str> {
        sections.iter().map(Section::id).collect()
    }

    #[test]
    fn splits_hero_from_body_in_source_order() {
        let page = json!({ "sys": { "id": "p" }, "fields": { "title": "About", "content": [
            typed("c1", "contentSection"), link("hero1"), link("feat1"), typed("car", "carousel")
        ] } });
        let out = assemble(EntryRef::from_value(&page).unwrap(), &includes());
        assert_eq!(out.title.as_deref(), Some("About"));
        assert_eq!(out.hero.as_ref().map(Section::id), Some("hero1"));
        assert_eq!(ids(&out.body), vec!["c1", "feat1", "car"]);
    }

    #[test]
    fn at_most_one_hero() {
        let page = json!({ "sys": { "id": "p" }, "fields": { "content": [
            link("hero2"), typed("x", "feature"), link("hero1"), typed("h3", "pageHero")
        ] } });
        let out = assemble(EntryRef::from_value(&page).unwrap(), &includes());
        assert_eq!(out.hero.as_ref().map(Section::id), Some("hero2"));
        assert_eq!(ids(&out.body), vec!["x"]);
        assert!(out.body.iter().all(|s| s.kind() != SectionKind::Hero));
    }

    #[test]
    fn demote_policy_keeps_extra_heroes_in_place() {
        let page = json!({ "sys": { "id": "p" }, "fields": { "content": [
            link("hero1"), typed("x", "feature"), link("hero2")
        ] } });
        let out = assemble_with(EntryRef::from_value(&page).unwrap(), &includes(), HeroPolicy::DemoteDuplicates);
        assert_eq!(out.hero.as_ref().map(Section::id), Some("hero1"));
        assert_eq!(ids(&out.body), vec!["x", "hero2"]);
    }

    #[test]
    fn unresolvable_items_are_skipped_silently() {
        let page = json!({ "sys": { "id": "p" }, "fields": { "content": [
            link("missing"), "not an entry", typed("a", "feature"), null, link("feat1")
        ] } });
        let out = assemble(EntryRef::from_value(&page).unwrap(), &includes());
        assert!(out.hero.is_none());
        assert_eq!(ids(&out.body), vec!["a", "feat1"]);
    }

    #[test]
    fn missing_or_non_array_content_is_empty() {
        for fields in [json!({}), json!({ "content": "Some text" }), json!({ "content": { "nodeType": "document" } })] {
            let page = json!({ "sys": { "id": "p" }, "fields": fields });
            let out = assemble(EntryRef::from_value(&page).unwrap(), &includes());
            assert!(out.hero.is_none());
            assert!(out.body.is_empty());
        }
    }

    #[test]
    fn body_is_an_order_preserving_subsequence() {
        let content: Vec<Value> = (0..20)
            .map(|i| match i % 4 {
                0 => link("missing"),
                1 => typed(&format!("s{}", i), "feature"),
                2 => typed(&format!("h{}", i), "pageHero"),
                _ => typed(&format!("u{}", i), "mystery"),
            })
            .collect();
        let page = json!({ "sys": { "id": "p" }, "fields": { "content": content.clone() } });
        let out = assemble(EntryRef::from_value(&page).unwrap(), &includes());
        assert!(out.body.len() <= content.len());

        let source_ids: Vec<String> = content.iter().filter_map(|v| v["sys"]["id"].as_str().map(str::to_string)).collect();
        let mut cursor = 0;
        for id in ids(&out.body) {
            let pos = source_ids[cursor..].iter().position(|s| s == id).expect("body id must appear in source order");
            cursor += pos + 1;
        }
    }
}

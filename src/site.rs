//! Routing surface and fetch states.
//!
//! A route path is the CMS slug verbatim, except that the empty path maps to
//! `/`. Each fetch ends in a state the view layer can render directly; only
//! transport failures surface as errors, with a human-readable message.

use crate::model::QueryResponse;
use crate::navigation::{self, Navigation};
use crate::page::{self, AssembledPage, HeroPolicy};
use crate::{ContentSource, Error, SiteConfig};
use serde::Serialize;

/// Slug for a route path.
pub fn slug_for_path(path: &str) -> String {
    if path.is_empty() || path == "/" {
        "/".to_string()
    } else {
        path.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum PageState {
    Loading,
    Ready(AssembledPage),
    NotFound { slug: String },
    Failed { message: String },
    /// A newer page load started before this one finished
    Superseded,
}

impl PageState {
    pub fn from_result(slug: &str, result: crate::Result<QueryResponse>, policy: HeroPolicy) -> Self {
        match result {
            Ok(response) => render_page(&response, slug, policy),
            Err(err) => PageState::Failed { message: failure_message("page", &err) },
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, PageState::Ready(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum NavigationState {
    Loading,
    Ready(Navigation),
    /// The navigation bar still renders, using the fallback items
    Failed { message: String, fallback: Navigation },
}

impl NavigationState {
    pub fn from_result(result: crate::Result<QueryResponse>) -> Self {
        match result {
            Ok(response) => render_navigation(&response),
            Err(err) => NavigationState::Failed {
                message: failure_message("navigation", &err),
                fallback: Navigation::default(),
            },
        }
    }

    /// What the navigation bar shows in this state.
    pub fn navigation(&self) -> Option<&Navigation> {
        match self {
            NavigationState::Loading => None,
            NavigationState::Ready(nav) | NavigationState::Failed { fallback: nav, .. } => Some(nav),
        }
    }
}

fn failure_message(what: &str, err: &Error) -> String {
    log::warn!("{} fetch failed: {}", what, err);
    err.user_message()
}

/// Assemble the first item of a page query.
pub fn render_page(response: &QueryResponse, slug: &str, policy: HeroPolicy) -> PageState {
    match response.first() {
        Some(entry) => PageState::Ready(page::assemble_with(entry.view(), &response.includes, policy)),
        None => PageState::NotFound { slug: slug.to_string() },
    }
}

/// Build navigation from the first item of a navigation query. A missing
/// entry yields the fallback navigation.
pub fn render_navigation(response: &QueryResponse) -> NavigationState {
    match response.first() {
        Some(entry) => NavigationState::Ready(navigation::build_navigation(entry.view(), &response.includes)),
        None => {
            log::warn!("navigation entry not found; using fallback navigation");
            NavigationState::Ready(Navigation::default())
        }
    }
}

/// Blocking site facade over a content source
pub struct Site<S> {
    source: S,
    config: SiteConfig,
}

impl<S: ContentSource> Site<S> {
    pub fn new(source: S, config: SiteConfig) -> Self {
        Self { source, config }
    }

    /// Fetch and assemble the page for a route path.
    pub fn load_page(&self, path: &str) -> PageState {
        let slug = slug_for_path(path);
        let result = self.source.query_by_slug(&self.config.page_content_type, &slug);
        PageState::from_result(&slug, result, self.config.duplicate_hero)
    }

    /// Fetch and build the configured navigation entry.
    pub fn load_navigation(&self) -> NavigationState {
        NavigationState::from_result(self.source.query_by_id(&self.config.navigation_entry_id))
    }
}

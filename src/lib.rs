//! CMS page rendering layer
//!
//! Turns the loosely-typed entry graphs returned by a headless CMS into typed,
//! render-ready view models: a page (one hero plus ordered body sections) and a
//! navigation tree.
//!
//! # Features
//!
//! - **Link resolution**: inline entries and `{sys: {linkType, id}}` links are
//!   treated alike; anything unresolvable is omitted, never an error
//! - **Naming variance**: legacy and current field names are tried in a fixed
//!   priority order
//! - **HTTP backend** (`http`, default): Content Delivery API client
//!
//! # Example
//!
//! ```
//! use cmspage::{memory::MemorySource, site::{PageState, Site}, SiteConfig};
//! use serde_json::json;
//!
//! let response = serde_json::from_value(json!({
//!     "items": [{
//!         "sys": { "id": "home", "contentType": { "sys": { "id": "page" } } },
//!         "fields": { "slug": "/", "title": "Home", "content": [] }
//!     }]
//! })).unwrap();
//!
//! let site = Site::new(MemorySource::from_response(response), SiteConfig::default());
//! match site.load_page("") {
//!     PageState::Ready(page) => assert_eq!(page.title.as_deref(), Some("Home")),
//!     other => panic!("unexpected state {:?}", other),
//! }
//! ```

use std::collections::HashMap;

pub mod error;
pub use error::{Error, Result};

pub mod model;
pub mod resolve;
pub mod extract;
pub mod image;
pub mod icon;
pub mod cta;
pub mod rich_text;
pub mod dispatch;
pub mod section;
pub mod page;
pub mod navigation;
pub mod site;

// In-memory content source (tests, offline rendering of saved responses)
pub mod memory;

// Content Delivery API client
#[cfg(feature = "http")]
pub mod client;

// Async facade: worker threads own the content sources
pub mod async_api;

pub use async_api::SiteHandle;
pub use model::{Entry, EntryRef, Includes, QueryResponse};
pub use navigation::{NavItem, Navigation};
pub use page::{AssembledPage, HeroPolicy};
pub use section::Section;

/// Graph depth the CMS resolves links to on its own; deeper links go through
/// [`resolve`].
pub const INCLUDE_DEPTH: u8 = 10;

/// Configuration for reaching the CMS and assembling pages
///
/// Defaults target the public Content Delivery API with empty credentials;
/// [`SiteConfig::from_env`] fills them from the environment.
///
/// # Examples
///
/// ```
/// let cfg = cmspage::SiteConfig::default();
/// assert_eq!(cfg.include_depth, 10);
/// assert_eq!(cfg.environment, "master");
/// ```
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Space identifier
    pub space_id: String,
    /// Delivery API access token
    pub access_token: String,
    /// Environment within the space
    pub environment: String,
    /// API host (may include a port)
    pub host: String,
    /// `https` outside of tests
    pub scheme: String,
    /// Link depth resolved by the CMS itself
    pub include_depth: u8,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
    /// User agent string sent with requests
    pub user_agent: String,
    /// Extra HTTP headers
    pub headers: HashMap<String, String>,
    /// Content type of routable pages
    pub page_content_type: String,
    /// Query parameter matching a page's slug
    pub slug_field: String,
    /// Id of the navigation entry
    pub navigation_entry_id: String,
    /// Handling of extra hero entries on a page
    pub duplicate_hero: HeroPolicy,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            space_id: String::new(),
            access_token: String::new(),
            environment: "master".to_string(),
            host: "cdn.contentful.com".to_string(),
            scheme: "https".to_string(),
            include_depth: INCLUDE_DEPTH,
            timeout_ms: 30000,
            user_agent: concat!("cmspage/", env!("CARGO_PKG_VERSION")).to_string(),
            headers: HashMap::new(),
            page_content_type: "page".to_string(),
            slug_field: "fields.slug".to_string(),
            navigation_entry_id: "3ZjNFcZRoGEgnFhMynwo1Y".to_string(),
            duplicate_hero: HeroPolicy::default(),
        }
    }
}

impl SiteConfig {
    /// Defaults overlaid with `CONTENTFUL_*` environment variables.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        let vars: [(&str, &mut String); 5] = [
            ("CONTENTFUL_SPACE_ID", &mut cfg.space_id),
            ("CONTENTFUL_ACCESS_TOKEN", &mut cfg.access_token),
            ("CONTENTFUL_ENVIRONMENT", &mut cfg.environment),
            ("CONTENTFUL_HOST", &mut cfg.host),
            ("CONTENTFUL_NAVIGATION_ID", &mut cfg.navigation_entry_id),
        ];
        for (key, slot) in vars {
            if let Ok(v) = std::env::var(key) {
                if !v.is_empty() {
                    *slot = v;
                }
            }
        }
        cfg
    }

    /// Checks what a network backend needs. Resolution never calls this.
    pub fn validate(&self) -> Result<()> {
        if self.space_id.trim().is_empty() {
            return Err(Error::ConfigError("space id is empty".into()));
        }
        if self.access_token.trim().is_empty() {
            return Err(Error::ConfigError("access token is empty".into()));
        }
        if self.host.trim().is_empty() {
            return Err(Error::ConfigError("host is empty".into()));
        }
        Ok(())
    }
}

/// Query surface of the CMS
///
/// An empty [`QueryResponse`] means "not found"; errors are reserved for
/// transport and query failures.
pub trait ContentSource {
    /// Entries of `content_type` whose slug equals `slug` (at most one)
    fn query_by_slug(&self, content_type: &str, slug: &str) -> Result<QueryResponse>;

    /// The entry with the given id
    fn query_by_id(&self, id: &str) -> Result<QueryResponse>;
}

impl<S: ContentSource + ?Sized> ContentSource for Box<S> {
    fn query_by_slug(&self, content_type: &str, slug: &str) -> Result<QueryResponse> {
        (**self).query_by_slug(content_type, slug)
    }

    fn query_by_id(&self, id: &str) -> Result<QueryResponse> {
        (**self).query_by_id(id)
    }
}

/// Create the default network-backed content source
#[cfg(feature = "http")]
pub fn new_source(config: SiteConfig) -> Result<impl ContentSource> {
    client::ContentfulClient::new(config)
}

//! In-memory content source.
//!
//! Answers slug and id queries from a fixed set of entries and a shared
//! includes table, the way the delivery API would. Useful for tests and for
//! rendering saved responses offline.

use crate::extract;
use crate::model::{Entry, Includes, QueryResponse};
use crate::{ContentSource, Error, Result};

#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    entries: Vec<Entry>,
    includes: Includes,
    failure: Option<String>,
}

impl MemorySource {
    pub fn new(entries: Vec<Entry>, includes: Includes) -> Self {
        Self { entries, includes, failure: None }
    }

    /// Serve the items of a captured response.
    pub fn from_response(response: QueryResponse) -> Self {
        Self::new(response.items, response.includes)
    }

    /// Every query fails with a network error carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self { failure: Some(message.into()), ..Self::default() }
    }

    fn respond<'a>(&self, matches: impl Iterator<Item = &'a Entry>) -> Result<QueryResponse> {
        if let Some(msg) = &self.failure {
            return Err(Error::NetworkError(msg.clone()));
        }
        let items: Vec<Entry> = matches.take(1).cloned().collect();
        if items.is_empty() {
            return Ok(QueryResponse::default());
        }
        Ok(QueryResponse { items, includes: self.includes.clone() })
    }

    fn lookup(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().chain(self.includes.entries.iter())
    }
}

impl ContentSource for MemorySource {
    fn query_by_slug(&self, content_type: &str, slug: &str) -> Result<QueryResponse> {
        self.respond(self.lookup().filter(|e| {
            e.content_type_id() == Some(content_type) && extract::text_field(&e.fields, "slug") == Some(slug)
        }))
    }

    fn query_by_id(&self, id: &str) -> Result<QueryResponse> {
        self.respond(self.lookup().filter(|e| e.id() == id))
    }
}

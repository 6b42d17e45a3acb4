//! Fake CMS server shared by the integration tests

#![allow(dead_code)]

use cmspage::SiteConfig;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tiny_http::{Header, Response, Server};

/// What the fake CMS saw
#[derive(Debug, Clone)]
pub struct Captured {
    pub path: String,
    pub query: HashMap<String, String>,
    pub authorization: Option<String>,
}

pub type Handler = dyn Fn(&Captured) -> (u16, String) + Send + Sync;

/// Start a fake CMS on an ephemeral port. Every request is answered on its
/// own thread so slow answers do not block others.
pub fn start_cms(handler: Arc<Handler>) -> (String, Arc<Mutex<Vec<Captured>>>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let port = server.server_addr().to_ip().unwrap().port();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = seen.clone();

    std::thread::spawn(move || {
        for request in server.incoming_requests() {
            let handler = handler.clone();
            let log = log.clone();
            std::thread::spawn(move || {
                let url = url::Url::parse(&format!("http://fake{}", request.url())).unwrap();
                let captured = Captured {
                    path: url.path().to_string(),
                    query: url.query_pairs().into_owned().collect(),
                    authorization: request
                        .headers()
                        .iter()
                        .find(|h| h.field.equiv("Authorization"))
                        .map(|h| h.value.to_string()),
                };
                log.lock().unwrap().push(captured.clone());
                let (status, body) = handler(&captured);
                let response = Response::from_string(body)
                    .with_status_code(status)
                    .with_header("Content-Type: application/json".parse::<Header>().unwrap());
                let _ = request.respond(response);
            });
        }
    });

    (format!("127.0.0.1:{}", port), seen)
}

pub fn config(host: &str) -> SiteConfig {
    SiteConfig {
        space_id: "space1".into(),
        access_token: "secret".into(),
        scheme: "http".into(),
        host: host.into(),
        timeout_ms: 5000,
        ..SiteConfig::default()
    }
}

pub fn link(id: &str) -> Value {
    json!({ "sys": { "type": "Link", "linkType": "Entry", "id": id } })
}

pub fn entry(id: &str, content_type: &str, fields: Value) -> Value {
    json!({ "sys": { "id": id, "type": "Entry", "contentType": { "sys": { "id": content_type } } }, "fields": fields })
}

/// The `/about` page: one hero and two features, all linked
pub fn about_response() -> Value {
    json!({
        "items": [entry("about", "page", json!({
            "title": "About",
            "slug": "/about",
            "content": [link("f1"), link("hero"), link("f2")]
        }))],
        "includes": { "Entry": [
            entry("hero", "pageHero", json!({ "titleText": "Who we are", "subtitleText": "Since 2001" })),
            entry("f1", "feature", json!({ "style": "Large Left" })),
            entry("f2", "feature", json!({ "style": "Full" }))
        ] }
    })
}

pub fn navigation_response() -> Value {
    json!({
        "items": [entry("nav", "navigation", json!({ "navigationItems": [link("products"), link("about")] }))],
        "includes": { "Entry": [
            entry("products", "navigationItem", json!({ "navigationTitle": "Products", "subItems": [link("analytics")] })),
            entry("analytics", "navigationItem", json!({ "name": "Analytics", "slug": "/products/analytics" })),
            entry("about", "navigationItem", json!({ "title": "About Us" }))
        ] }
    })
}

pub fn empty_response() -> Value {
    json!({ "sys": { "type": "Array" }, "total": 0, "items": [] })
}

//! Async facade: independent lanes and last-request-wins

#![cfg(feature = "http")]

mod common;

use cmspage::site::{NavigationState, PageState};
use cmspage::SiteHandle;
use common::*;
use futures::future::{FutureExt, LocalBoxFuture};
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use std::time::Duration;

fn slow_pages() -> String {
    let (host, _) = start_cms(Arc::new(|req: &Captured| {
        if req.query.contains_key("fields.slug") {
            std::thread::sleep(Duration::from_millis(400));
            (200, about_response().to_string())
        } else {
            (200, navigation_response().to_string())
        }
    }));
    host
}

#[tokio::test]
async fn navigation_does_not_wait_for_pages() {
    let site = SiteHandle::new(config(&slow_pages())).await.unwrap();

    let mut pending: FuturesUnordered<LocalBoxFuture<'_, &str>> = FuturesUnordered::new();
    pending.push(
        site.load_page("/about")
            .map(|s| {
                assert!(s.unwrap().is_ready());
                "page"
            })
            .boxed_local(),
    );
    pending.push(
        site.load_navigation()
            .map(|s| {
                assert!(matches!(s.unwrap(), NavigationState::Ready(_)));
                "navigation"
            })
            .boxed_local(),
    );

    let mut order = Vec::new();
    while let Some(done) = pending.next().await {
        order.push(done);
    }
    assert_eq!(order, vec!["navigation", "page"]);
}

#[tokio::test]
async fn stale_page_is_superseded() {
    let site = SiteHandle::new(config(&slow_pages())).await.unwrap();
    let (first, second) = tokio::join!(site.load_page("/"), site.load_page("/about"));
    assert_eq!(first.unwrap(), PageState::Superseded);
    match second.unwrap() {
        PageState::Ready(page) => assert_eq!(page.id, "about"),
        other => panic!("unexpected state {:?}", other),
    }
}

#[tokio::test]
async fn missing_credentials_fail_to_start() {
    let mut cfg = config("127.0.0.1:1");
    cfg.access_token.clear();
    assert!(SiteHandle::new(cfg).await.is_err());
}

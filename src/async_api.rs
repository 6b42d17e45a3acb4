use crate::site::{NavigationState, PageState, Site};
use crate::{ContentSource, Error, Result, SiteConfig};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread;
use tokio::sync::oneshot;

enum Command {
    /// Route path plus the generation it was issued under
    Page(String, u64, oneshot::Sender<PageState>),
    Navigation(oneshot::Sender<NavigationState>),
    Close(oneshot::Sender<()>),
}

/// An async-friendly site backed by two worker threads.
///
/// Each worker ("lane") owns its own synchronous content source, so callers
/// get an async interface without the source having to be `Send`. Pages and
/// navigation run on separate lanes and never wait on each other.
///
/// Page loads follow last-request-wins: once a newer [`SiteHandle::load_page`]
/// has started, an older one resolves to [`PageState::Superseded`] instead of
/// its result.
#[derive(Clone)]
pub struct SiteHandle {
    pages: Sender<Command>,
    navigation: Sender<Command>,
    generation: Arc<AtomicU64>,
}

fn spawn_lane<S, F>(
    name: &str,
    factory: Arc<F>,
    config: SiteConfig,
    generation: Arc<AtomicU64>,
) -> Result<(Sender<Command>, oneshot::Receiver<Result<()>>)>
where
    S: ContentSource + 'static,
    F: Fn() -> Result<S> + Send + Sync + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
    let (init_tx, init_rx) = oneshot::channel();

    thread::Builder::new()
        .name(format!("cmspage-{}", name))
        .spawn(move || {
            // The source is created on the worker thread
            let source = match factory() {
                Ok(s) => s,
                Err(err) => {
                    let _ = init_tx.send(Err(err));
                    return;
                }
            };
            let _ = init_tx.send(Ok(()));
            let site = Site::new(source, config);

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    Command::Page(path, ticket, resp) => {
                        // A newer load is already queued; skip the fetch
                        if generation.load(Ordering::SeqCst) != ticket {
                            log::debug!("skipping stale page load for {:?}", path);
                            let _ = resp.send(PageState::Superseded);
                            continue;
                        }
                        let _ = resp.send(site.load_page(&path));
                    }
                    Command::Navigation(resp) => {
                        let _ = resp.send(site.load_navigation());
                    }
                    Command::Close(resp) => {
                        let _ = resp.send(());
                        break;
                    }
                }
            }
            log::debug!("worker lane stopped");
        })
        .map_err(|e| Error::Other(format!("Failed to spawn {} worker: {}", name, e)))?;

    Ok((cmd_tx, init_rx))
}

impl SiteHandle {
    /// Site backed by the Content Delivery API.
    #[cfg(feature = "http")]
    pub async fn new(config: SiteConfig) -> Result<Self> {
        let source_config = config.clone();
        Self::with_source(config, move || crate::client::ContentfulClient::new(source_config.clone())).await
    }

    /// Site backed by sources from `factory`, called once per lane on the
    /// lane's own thread.
    pub async fn with_source<S, F>(config: SiteConfig, factory: F) -> Result<Self>
    where
        S: ContentSource + 'static,
        F: Fn() -> Result<S> + Send + Sync + 'static,
    {
        let factory = Arc::new(factory);
        let generation = Arc::new(AtomicU64::new(0));
        let (pages, pages_init) = spawn_lane("pages", factory.clone(), config.clone(), generation.clone())?;
        let (navigation, nav_init) = spawn_lane("navigation", factory, config, generation.clone())?;

        for init in [pages_init, nav_init] {
            init.await
                .map_err(|e| Error::Other(format!("Worker init canceled: {}", e)))??;
        }

        Ok(Self { pages, navigation, generation })
    }

    /// Fetch and assemble the page for a route path.
    ///
    /// Errors only when the worker is gone; fetch failures are reported as
    /// [`PageState::Failed`].
    pub async fn load_page(&self, path: &str) -> Result<PageState> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let (tx, rx) = oneshot::channel();
        self.pages
            .send(Command::Page(path.to_string(), ticket, tx))
            .map_err(|_| Error::Other("Page worker has stopped".into()))?;
        let state = rx
            .await
            .map_err(|e| Error::Other(format!("Page load canceled: {}", e)))?;

        if self.generation.load(Ordering::SeqCst) != ticket {
            log::debug!("page load for {:?} superseded", path);
            return Ok(PageState::Superseded);
        }
        Ok(state)
    }

    /// Fetch and build the navigation, independently of page loads.
    pub async fn load_navigation(&self) -> Result<NavigationState> {
        let (tx, rx) = oneshot::channel();
        self.navigation
            .send(Command::Navigation(tx))
            .map_err(|_| Error::Other("Navigation worker has stopped".into()))?;
        rx.await
            .map_err(|e| Error::Other(format!("Navigation load canceled: {}", e)))
    }

    /// Stop both workers.
    pub async fn close(self) -> Result<()> {
        for lane in [&self.pages, &self.navigation] {
            let (tx, rx) = oneshot::channel();
            if lane.send(Command::Close(tx)).is_ok() {
                rx.await
                    .map_err(|e| Error::Other(format!("Close canceled: {}", e)))?;
            }
        }
        Ok(())
    }
}

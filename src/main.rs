use anyhow::Context;
use clap::{Parser, Subcommand};
use cmspage::site::{self, NavigationState, PageState};
use cmspage::{HeroPolicy, QueryResponse, SiteConfig, SiteHandle};
use futures::future::LocalBoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cmspage", version, about = "Resolve CMS pages and navigation into render-ready JSON")]
struct Cli {
    /// Space id (overrides CONTENTFUL_SPACE_ID)
    #[arg(long, global = true)]
    space: Option<String>,
    /// Delivery API token (overrides CONTENTFUL_ACCESS_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,
    #[arg(long, global = true)]
    environment: Option<String>,
    #[arg(long, global = true)]
    host: Option<String>,
    /// Keep extra hero entries in the body instead of dropping them
    #[arg(long, global = true)]
    demote_heroes: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch and assemble one page
    Page { path: String },
    /// Fetch and build the navigation
    Nav,
    /// Fetch a page and the navigation concurrently
    Site { path: String },
    /// Assemble a saved CMS response without network access
    Render {
        #[arg(long)]
        file: PathBuf,
        /// Treat the response as a navigation entry
        #[arg(long)]
        nav: bool,
    },
}

impl Cli {
    fn config(&self) -> SiteConfig {
        let mut config = SiteConfig::from_env();
        let overrides = [
            (&self.space, &mut config.space_id),
            (&self.token, &mut config.access_token),
            (&self.environment, &mut config.environment),
            (&self.host, &mut config.host),
        ];
        for (arg, slot) in overrides {
            if let Some(v) = arg {
                *slot = v.clone();
            }
        }
        if self.demote_heroes {
            config.duplicate_hero = HeroPolicy::DemoteDuplicates;
        }
        config
    }
}

/// A fetch outcome ready for printing
struct Outcome {
    label: &'static str,
    json: serde_json::Value,
    failed: bool,
}

impl Outcome {
    fn page(state: PageState) -> anyhow::Result<Self> {
        let failed = matches!(state, PageState::Failed { .. });
        Ok(Self { label: "page", json: serde_json::to_value(state)?, failed })
    }

    fn navigation(state: NavigationState) -> anyhow::Result<Self> {
        let failed = matches!(state, NavigationState::Failed { .. });
        Ok(Self { label: "navigation", json: serde_json::to_value(state)?, failed })
    }

    fn print(&self, tagged: bool) -> anyhow::Result<()> {
        let out = if tagged { json!({ self.label: &self.json }) } else { self.json.clone() };
        println!("{}", serde_json::to_string_pretty(&out)?);
        Ok(())
    }
}

fn render_file(file: &PathBuf, nav: bool, policy: HeroPolicy) -> anyhow::Result<Outcome> {
    let raw = std::fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    let response: QueryResponse =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", file.display()))?;

    if nav {
        return Outcome::navigation(site::render_navigation(&response));
    }
    let slug = response
        .first()
        .and_then(|e| cmspage::extract::text_field(&e.fields, "slug"))
        .unwrap_or("/")
        .to_string();
    Outcome::page(site::render_page(&response, &slug, policy))
}

async fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = cli.config();

    if let Command::Render { file, nav } = &cli.command {
        let outcome = render_file(file, *nav, config.duplicate_hero)?;
        outcome.print(false)?;
        return Ok(!outcome.failed);
    }

    let handle = SiteHandle::new(config).await.context("starting content workers")?;
    let mut ok = true;

    match &cli.command {
        Command::Page { path } => {
            let outcome = Outcome::page(handle.load_page(path).await?)?;
            outcome.print(false)?;
            ok = !outcome.failed;
        }
        Command::Nav => {
            let outcome = Outcome::navigation(handle.load_navigation().await?)?;
            outcome.print(false)?;
            ok = !outcome.failed;
        }
        Command::Site { path } => {
            let mut pending: FuturesUnordered<LocalBoxFuture<'_, anyhow::Result<Outcome>>> = FuturesUnordered::new();
            pending.push(Box::pin(async { Outcome::page(handle.load_page(path).await?) }));
            pending.push(Box::pin(async { Outcome::navigation(handle.load_navigation().await?) }));
            while let Some(outcome) = pending.next().await {
                let outcome = outcome?;
                outcome.print(true)?;
                ok &= !outcome.failed;
            }
        }
        Command::Render { .. } => {}
    }

    handle.close().await?;
    Ok(ok)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cmspage=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(Cli::parse()).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("cmspage: {:#}", e);
            std::process::exit(1);
        }
    }
}

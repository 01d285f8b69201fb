use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use toast_relay::Toasts;
use toast_relay::assets::{AssetFetcher, FileAssetFetcher, HttpAssetFetcher};
use toast_relay::config::{ToastsConfig, log_path};
use toast_relay::delivery::DeliveryOutcome;
use toast_relay::logging::{LogConfig, LogFormat, init_logging};
use toast_relay::message::{FilterMetadata, MessageCatalog};
use toast_relay::preview::PreviewTabs;
use toast_relay::promo::{NoPromo, PromoNotification, PromoProvider, StaticPromo};

#[derive(Parser)]
#[command(name = "toast-relay")]
#[command(
    version,
    about = "Prints the popup messages the active tab would receive"
)]
struct Cli {
    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Extension messages.json used for text lookup
    #[arg(long, global = true)]
    messages: Option<PathBuf>,

    /// Unpacked extension directory to load alert styles from
    #[arg(long, global = true, conflicts_with = "extension_url")]
    extension_dir: Option<PathBuf>,

    /// Extension base URL to load alert styles from
    #[arg(long, global = true)]
    extension_url: Option<String>,

    /// URL of the simulated active tab
    #[arg(long, global = true, default_value = "https://example.org/")]
    tab_url: String,

    /// Origin of the extension's own pages
    #[arg(long, global = true, default_value = "chrome-extension://toast-relay/")]
    extension_origin: String,

    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[arg(long, global = true, value_enum, default_value_t)]
    log_format: LogFormat,

    /// Also write logs to a file (defaults to the data directory)
    #[arg(long, global = true, num_args = 0..=1)]
    log_file: Option<Option<PathBuf>>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Alert listing newly enabled filters
    FiltersEnabled {
        /// JSON array of filter metadata
        #[arg(long)]
        filters: PathBuf,
    },
    /// Alert with the result of a filter update check
    FiltersUpdated {
        /// Report the update as failed
        #[arg(long)]
        failed: bool,
        /// JSON array of updated filters; omit to report a missing list
        #[arg(long)]
        filters: Option<PathBuf>,
    },
    /// Popup shown after the extension itself was updated
    VersionUpdated {
        #[arg(long)]
        current: String,
        #[arg(long)]
        previous: String,
        /// JSON promo notification to treat as active
        #[arg(long)]
        promo: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let _log_guard = init_logging(&LogConfig {
        level: cli.log_level.clone(),
        format: cli.log_format,
        file: cli
            .log_file
            .clone()
            .map(|path| path.unwrap_or_else(log_path)),
    })?;

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(run(cli))
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => ToastsConfig::load(path)?,
        None => ToastsConfig::default(),
    };

    let translator = match &cli.messages {
        Some(path) => MessageCatalog::load(path)
            .with_context(|| format!("Failed to load messages from {:?}", path))?,
        None => MessageCatalog::default(),
    };

    let assets: Option<Arc<dyn AssetFetcher>> = match (&cli.extension_dir, &cli.extension_url) {
        (Some(dir), _) => Some(Arc::new(FileAssetFetcher::new(dir))),
        (None, Some(url)) => Some(Arc::new(HttpAssetFetcher::new(url))),
        (None, None) => None,
    };

    let promos: Arc<dyn PromoProvider> = match &cli.command {
        Command::VersionUpdated {
            promo: Some(path), ..
        } => Arc::new(StaticPromo(read_json::<PromoNotification>(path)?)),
        _ => Arc::new(NoPromo),
    };

    let tabs = Arc::new(PreviewTabs::new(
        &cli.tab_url,
        &cli.extension_origin,
        std::io::stdout(),
    ));

    let toasts = Toasts::new(
        config,
        tabs,
        Arc::new(translator),
        promos,
        assets
            .clone()
            .unwrap_or_else(|| Arc::new(FileAssetFetcher::new(".")) as Arc<dyn AssetFetcher>),
    );

    if assets.is_some() {
        toasts.init().await.context("Failed to load alert styles")?;
    } else {
        info!("No extension source given, sending popups without styles");
    }

    let handle = match &cli.command {
        Command::FiltersEnabled { filters } => {
            let filters: Vec<FilterMetadata> = read_json(filters)?;
            Some(toasts.show_filters_enabled_alert(&filters))
        }
        Command::FiltersUpdated { failed, filters } => {
            let filters: Option<Vec<FilterMetadata>> =
                filters.as_deref().map(read_json).transpose()?;
            Some(toasts.show_filters_updated_alert(!failed, filters.as_deref()))
        }
        Command::VersionUpdated {
            current, previous, ..
        } => toasts.show_application_updated_popup(current, previous).await,
    };

    let Some(handle) = handle else {
        info!("Nothing to show");
        return Ok(());
    };

    match handle.await? {
        DeliveryOutcome::Delivered { attempts, .. } => {
            info!("Delivered after {} attempt(s)", attempts);
            Ok(())
        }
        outcome => {
            warn!("Popup was not delivered: {:?}", outcome);
            anyhow::bail!("popup was not delivered: {:?}", outcome)
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid JSON in {:?}", path))
}

//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here.

use dotenv::dotenv;
use hydrate_me::adapters::ai::{MockAdviceAdapter, OpenAiAdviceAdapter};
use hydrate_me::adapters::persistence::{JsonStore, MemoryStore, SqliteStore};
use hydrate_me::adapters::ui::tui::TuiInputPort;
use hydrate_me::ports::{AdvicePort, InputPort, IntakeLogStore, ProfileStore};
use hydrate_me::shared::config::{AppConfig, StoreBackend};
use hydrate_me::usecases::{AdviceService, ProfileService, TrackerService};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!("no .env found"),
    }

    let cfg = match AppConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(error = %e, "config not loaded, using defaults");
            AppConfig::default()
        }
    };

    let backend = cfg.store_backend().map_err(anyhow::Error::msg)?;
    let data_dir = PathBuf::from(cfg.data_dir_or_default());
    let (profile_store, log_store) = open_store(backend, &data_dir).await?;

    let advice: Arc<dyn AdvicePort> = match cfg.ai_api_key() {
        Some(api_key) => {
            let model = cfg.ai_model_or_default();
            info!(model = %model, "coach: OpenAI-compatible API");
            Arc::new(OpenAiAdviceAdapter::new(
                cfg.ai_api_url_or_default(),
                api_key,
                model,
                Duration::from_secs(cfg.ai_timeout_secs_or_default()),
            )?)
        }
        None => {
            info!("coach: offline tips (set HYDRATE_AI_API_KEY for the API)");
            Arc::new(MockAdviceAdapter::new())
        }
    };

    let profiles = Arc::new(ProfileService::new(profile_store));
    let tracker = Arc::new(TrackerService::load(log_store).await?);
    let advice = Arc::new(AdviceService::new(advice));

    hydrate_me::adapters::ui::init_ui();

    let tui = TuiInputPort::new(profiles, tracker, advice);
    tui.run().await?;
    Ok(())
}

/// One backend serves both the profile and the intake log.
async fn open_store(
    backend: StoreBackend,
    data_dir: &Path,
) -> anyhow::Result<(Arc<dyn ProfileStore>, Arc<dyn IntakeLogStore>)> {
    match backend {
        StoreBackend::Json => {
            let path = data_dir.join("hydrate.json");
            info!(path = %path.display(), "store: json");
            let store = Arc::new(JsonStore::open(&path).await?);
            Ok(split(store))
        }
        StoreBackend::Sqlite => {
            info!(dir = %data_dir.display(), "store: sqlite");
            let store = Arc::new(SqliteStore::connect(data_dir).await?);
            Ok(split(store))
        }
        StoreBackend::Memory => {
            info!("store: memory (nothing is persisted)");
            Ok(split(Arc::new(MemoryStore::new())))
        }
    }
}

fn split<S>(store: Arc<S>) -> (Arc<dyn ProfileStore>, Arc<dyn IntakeLogStore>)
where
    S: ProfileStore + IntakeLogStore + 'static,
{
    let profiles: Arc<dyn ProfileStore> = store.clone();
    let logs: Arc<dyn IntakeLogStore> = store;
    (profiles, logs)
}

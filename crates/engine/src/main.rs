//! Echoes Engine - Main entry point.

use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use echoes_engine::api;
use echoes_engine::infrastructure::{
    clock::{SystemClock, SystemRandom},
    config::{EngineConfig, StoreBackend},
    memory_store::InMemoryDocumentStore,
    ports::{DocumentStore, NarrationAudioPort},
    sqlite_store::SqliteDocumentStore,
    tts::{DisabledNarrationAudio, HttpNarrationAudio},
};
use echoes_engine::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "echoes_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Echoes Engine");

    let config = EngineConfig::from_env();

    let store: Arc<dyn DocumentStore> = match &config.store {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory document store; sessions will not survive a restart");
            Arc::new(InMemoryDocumentStore::new())
        }
        StoreBackend::Sqlite { path } => {
            tracing::info!(path = %path.display(), "Opening SQLite document store");
            Arc::new(SqliteDocumentStore::new(&path.to_string_lossy()).await?)
        }
    };

    let audio: Arc<dyn NarrationAudioPort> = match &config.tts_base_url {
        Some(url) => {
            tracing::info!(url = %url, timeout_secs = config.tts_timeout_secs, "Narration audio enabled");
            Arc::new(HttpNarrationAudio::new(url, config.tts_timeout_secs))
        }
        None => {
            tracing::info!("TTS_BASE_URL not set, narration audio disabled");
            Arc::new(DisabledNarrationAudio)
        }
    };

    let app = Arc::new(App::new(
        store,
        audio,
        Arc::new(SystemClock::new()),
        Arc::new(SystemRandom::new()),
    ));

    let mut router = api::http::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = build_cors_layer(config.cors_allowed_origins.as_deref()) {
        router = router.layer(cors);
    }

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}

fn build_cors_layer(allowed_origins: Option<&str>) -> Option<CorsLayer> {
    let allowed_origins = allowed_origins?;

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    if allowed_origins == "*" {
        return Some(cors.allow_origin(Any));
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| HeaderValue::from_str(s).ok())
        .collect();

    if origins.is_empty() {
        return None;
    }

    Some(cors.allow_origin(origins))
}

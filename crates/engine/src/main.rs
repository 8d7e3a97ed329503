//! QuestScribe Engine - Main entry point.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use questscribe_engine::app::{App, AppPorts};
use questscribe_engine::api;
use questscribe_engine::infrastructure::{
    clock::SystemClock,
    compendium_store::SqliteCompendiumRepo,
    config::AppConfig,
    importers::CompendiumImporter,
    openai_compat::OpenAiCompatClient,
    player_store::SqlitePlayerStore,
    ports::ClockPort,
    session_store::InMemorySessionStore,
    sqlite,
};
use questscribe_engine::use_cases::turn::Narrator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the binary is usually run from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "questscribe_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting QuestScribe Engine");

    let config = AppConfig::from_env()?;
    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());

    // Open SQLite
    ensure_parent_dir(&config.database_path).await?;
    tracing::info!(path = %config.database_path, "Opening SQLite database");
    let pool = sqlite::connect(&config.database_path)
        .await
        .context("failed to open SQLite database")?;

    let compendium = Arc::new(SqliteCompendiumRepo::new(pool.clone()).await?);
    let players = Arc::new(SqlitePlayerStore::new(pool, clock.clone()).await?);

    if let Some(seed_path) = &config.compendium_seed_path {
        let summary = CompendiumImporter::new(&compendium)
            .import_file(seed_path)
            .await
            .with_context(|| format!("failed to import compendium seed {seed_path}"))?;
        tracing::info!(
            entries = summary.entries,
            monsters = summary.monsters,
            "Compendium seed loaded"
        );
    }

    // Narration client
    let narrator = match &config.llm_api_key {
        Some(api_key) => {
            let client = OpenAiCompatClient::with_timeout(
                &config.llm_base_url,
                &config.llm_model,
                api_key,
                config.llm_timeout_secs,
            );
            tracing::info!(
                base_url = %config.llm_base_url,
                model = %client.model(),
                "Narration client configured"
            );
            Narrator::new(
                Arc::new(client),
                Duration::from_secs(config.llm_timeout_secs),
            )
        }
        None => {
            tracing::warn!("No OPENROUTER_API_KEY or API_KEY set; narration is disabled");
            Narrator::disabled()
        }
    };

    // Create application
    let app = Arc::new(App::new(
        AppPorts {
            compendium,
            player_stats: players.clone(),
            history: players,
            session: Arc::new(InMemorySessionStore::new()),
            clock,
        },
        narrator,
    ));

    let mut router = api::http::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = build_cors_layer(&config.cors_allowed_origins) {
        router = router.layer(cors);
    }

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server_host, config.server_port)
        .parse()
        .context("SERVER_HOST/SERVER_PORT do not form a valid socket address")?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

async fn ensure_parent_dir(db_path: &str) -> anyhow::Result<()> {
    if let Some(parent) = std::path::Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    Ok(())
}

fn build_cors_layer(allowed_origins: &[String]) -> Option<CorsLayer> {
    if allowed_origins.is_empty() {
        return None;
    }

    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        // The dashboard posts JSON, which triggers CORS preflights.
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    if allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        if origins.is_empty() {
            return None;
        }

        cors = cors.allow_origin(origins);
    }

    Some(cors)
}

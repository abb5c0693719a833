//! Service entry point: wires configuration, adapters, and the HTTP surface.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use axum::routing::get;
use axum::Router;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use empathy_ai::adapters::auth::Hs256TokenVerifier;
use empathy_ai::adapters::classifier::{HfClassifier, HfClassifierConfig};
use empathy_ai::adapters::generation::{ChatCompletionsConfig, ChatCompletionsProvider};
use empathy_ai::adapters::http::{auth_middleware, chat_router, AuthState, ChatAppState};
use empathy_ai::adapters::store::PostgresConversationStore;
use empathy_ai::adapters::transcript::FileTranscriptSink;
use empathy_ai::application::{ChatService, EmotionDetector, ResponseGenerator};
use empathy_ai::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone())),
        )
        .init();

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let detector = EmotionDetector::new(Arc::new(HfClassifier::new(
        HfClassifierConfig::new(config.classifier.api_key.expose_secret().clone())
            .with_model(config.classifier.model.clone())
            .with_base_url(config.classifier.base_url.clone())
            .with_timeout(config.classifier.timeout()),
    )));

    let mut responder = ResponseGenerator::template_only()
        .with_timeout(config.generation.timeout())
        .with_sampling(
            config.generation.max_tokens,
            config.generation.temperature as f32,
        );
    if config.generation.has_provider() {
        let api_key = config
            .generation
            .api_key
            .as_ref()
            .map(|k| k.expose_secret().clone())
            .unwrap_or_default();
        responder = responder.with_provider(Arc::new(ChatCompletionsProvider::new(
            ChatCompletionsConfig::new(api_key)
                .with_model(config.generation.model.clone())
                .with_base_url(config.generation.base_url.clone())
                .with_timeout(config.generation.timeout()),
        )));
    } else {
        tracing::warn!("no generation provider configured, running template-only");
    }

    let store = Arc::new(PostgresConversationStore::new(pool));
    let mut chat = ChatService::new(detector, responder, store);
    if let Some(path) = config.transcript.path.as_ref().filter(|p| !p.is_empty()) {
        chat = chat.with_transcript(Arc::new(FileTranscriptSink::new(path.clone())));
    }

    let verifier: AuthState = Arc::new(Hs256TokenVerifier::new(&config.auth.jwt_secret));
    let state = ChatAppState::new(Arc::new(chat));

    let cors = build_cors(&config.server.cors_origins_list())?;
    let app = Router::new()
        .merge(chat_router())
        .route("/health", get(health))
        .layer(axum::middleware::from_fn_with_state(
            verifier,
            auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors)
        .with_state(state);

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> &'static str {
    "ok"
}

fn build_cors(origins: &[String]) -> Result<CorsLayer, Box<dyn std::error::Error>> {
    if origins.is_empty() {
        return Ok(CorsLayer::permissive());
    }
    let values = origins
        .iter()
        .map(|o| o.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CorsLayer::new()
        .allow_origin(values)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any))
}

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use piglatin_relay::{
    ChannelDispatcher, GoogleTranslateProvider, MessageProcessor, RelayConfig, RelayError,
    TriggerEvent,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResponse {
    pub transformed_message: String,
    pub channel: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Clone)]
pub struct AppState {
    pub processor: Arc<MessageProcessor>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("info".parse().unwrap()),
        )
        .init();

    let provider = Arc::new(
        GoogleTranslateProvider::from_env()
            .map_err(|e| format!("Failed to initialize translation provider: {}", e))?,
    );
    let config = RelayConfig::from_env().map_err(|e| format!("Failed to load config: {}", e))?;
    let processor = Arc::new(MessageProcessor::new(
        provider.clone(),
        provider,
        ChannelDispatcher::http(config),
    ));
    let state = AppState { processor };

    info!("🐷 Starting piglatin-relay web server");

    let app = router(state);

    let bind = std::env::var("RELAY_BIND").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!("🚀 Server running at http://{}", bind);

    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health))
        .route("/api/event", post(process_event))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn process_event(
    State(state): State<AppState>,
    Json(trigger): Json<TriggerEvent>,
) -> Result<Json<ProcessResponse>, (StatusCode, Json<ErrorResponse>)> {
    info!(
        "Processing event for channel {}",
        &trigger.detail.send_to
    );

    let processed = state
        .processor
        .process(trigger.detail)
        .await
        .map_err(|e| (status_for(&e), Json(ErrorResponse { error: e.to_string() })))?;

    Ok(Json(ProcessResponse {
        transformed_message: processed.message,
        channel: processed.channel.to_string(),
    }))
}

/// Validation failures are the caller's fault; everything else is a
/// downstream service problem
fn status_for(error: &RelayError) -> StatusCode {
    match error {
        RelayError::InvalidEvent(_)
        | RelayError::InvalidChannel(_)
        | RelayError::InvalidLocale(_) => StatusCode::BAD_REQUEST,
        RelayError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        RelayError::NetworkError(_)
        | RelayError::DetectionError(_)
        | RelayError::TranslationError(_)
        | RelayError::DispatchError(_) => StatusCode::BAD_GATEWAY,
    }
}

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use gym_tracker_api::auth::Authenticator;
use gym_tracker_api::config::AppConfig;
use gym_tracker_api::database::Database;
use gym_tracker_api::handlers::{exercises, templates, workouts};
use gym_tracker_api::middleware::require_user;
use gym_tracker_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, AUTH_PROVIDER_URL, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();
    tracing::info!("Starting Gym Tracker API in {:?} mode", config.environment);

    let db = Database::connect(&config.database).await?;
    let auth = Authenticator::from_config(&config.auth)?;
    let state = AppState::new(db, auth);

    let app = app(state);

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    println!("🏋️ Gym Tracker API listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}

fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Protected API
        .merge(api_routes(state.clone()))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/workouts", get(workouts::list).post(workouts::create))
        .route(
            "/api/workouts/:id",
            get(workouts::get).put(workouts::update).delete(workouts::delete),
        )
        .route("/api/templates", get(templates::list).post(templates::create))
        .route(
            "/api/templates/:id",
            get(templates::get).put(templates::update).delete(templates::delete),
        )
        .route("/api/exercises/search", get(exercises::search))
        // Every API route authenticates before its handler runs
        .layer(axum::middleware::from_fn_with_state(state, require_user))
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Gym Tracker API",
        "version": version,
        "description": "Workout tracking backend - sessions, templates, exercise search",
        "endpoints": {
            "home": "/ (public)",
            "health": "/health (public)",
            "workouts": "/api/workouts[/:id] (protected)",
            "templates": "/api/templates[/:id] (protected)",
            "search": "/api/exercises/search?q=text (protected)",
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.db.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "error": "database unavailable"
                })),
            )
        }
    }
}

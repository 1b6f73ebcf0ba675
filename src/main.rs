use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod config;
mod db;
mod dto;
mod error;
mod events;
mod handlers;
mod models;
mod services;
mod store;

use config::Config;
use db::HabitRepository;
use events::EventBus;
use services::ai::GroqClient;
use services::habits::HabitService;
use services::reminders::ReminderScheduler;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<Config>,
    pub habits: HabitService,
    pub events: EventBus,
    pub ai: GroqClient,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "habithero_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Config::from_env();
    let config = Arc::new(config);

    // Database
    let db = db::create_pool(&config.database_path).await;

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations applied");

    // Habit change broadcast channel
    let events = EventBus::new(256);

    let reminders = ReminderScheduler::new(events.clone());
    reminders.spawn();

    let habits = HabitService::new(
        HabitRepository::new(db.clone()),
        events.clone(),
        reminders,
    );
    habits.load().await.expect("Failed to load habits");

    let ai = GroqClient::new(&config).expect("Failed to build AI client");

    let state = AppState {
        db,
        config: config.clone(),
        habits,
        events,
        ai,
    };

    let app = app(state);

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz))
        .route("/ws", get(handlers::ws::ws_handler));

    let api_routes = Router::new()
        // Habits
        .route("/api/habits", get(handlers::habits::list_habits))
        .route("/api/habits", post(handlers::habits::create_habit))
        .route("/api/habits/:id", get(handlers::habits::get_habit))
        .route("/api/habits/:id", put(handlers::habits::update_habit))
        .route("/api/habits/:id", delete(handlers::habits::delete_habit))
        .route("/api/habits/:id/toggle", post(handlers::habits::toggle_habit))
        .route("/api/categories", get(handlers::habits::list_categories))
        // Stats
        .route("/api/stats/overview", get(handlers::stats::overview))
        .route("/api/stats/categories", get(handlers::stats::category_breakdown))
        .route("/api/stats/weekly", get(handlers::stats::weekly_series))
        .route("/api/stats/top", get(handlers::stats::top_habits))
        .route("/api/stats/attention", get(handlers::stats::needs_attention))
        // Suggestions
        .route("/api/suggestions", post(handlers::suggestions::suggest))
        .route(
            "/api/suggestions/quick",
            get(handlers::suggestions::quick_suggestions),
        )
        .route(
            "/api/suggestions/accept",
            post(handlers::suggestions::accept_suggestion),
        );

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let allowed_origins: Vec<axum::http::HeaderValue> = {
        let mut origins = vec![config
            .frontend_url
            .parse::<axum::http::HeaderValue>()
            .unwrap()];
        // In dev, also allow LAN access (e.g. testing from another device)
        if let Ok(extra) = std::env::var("CORS_EXTRA_ORIGINS") {
            for o in extra.split(',') {
                if let Ok(hv) = o.trim().parse::<axum::http::HeaderValue>() {
                    origins.push(hv);
                }
            }
        }
        origins
    };

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .allow_credentials(true)
}

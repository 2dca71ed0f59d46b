mod config;
mod dto;
mod handlers;
mod models;
mod repository;
mod service;

use axum::{
    Router,
    routing::{get, post},
};

use std::sync::Arc;

use handlers::{rest, web};
use repository::NoteStore;

use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use service::NoteService;

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt::init();

    // Load config
    let cfg = config::load_config().unwrap_or_else(|e| {
        tracing::error!("Failed to load config: {e}");
        panic!("failed to load config: {e}");
    });
    tracing::info!("Successfully loaded keepnote config");

    // Store creation and migration
    let mut store = NoteStore::connect(&cfg.database_dsn)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to establish database connection: {e}");
            panic!("failed to establish database connection: {e}");
        });

    store.migrate().await.unwrap_or_else(|e| {
        tracing::error!("Failed to migrate database: {e}");
        panic!("failed to migrate database: {e}");
    });

    // Service creation
    let service = Arc::new(NoteService::new(Arc::new(tokio::sync::Mutex::new(store))));

    // REST router config
    let rest_router = Router::new()
        .route("/notes", post(rest::create_note).get(rest::get_all_notes))
        .route(
            "/notes/{id}",
            get(rest::get_one_note)
                .put(rest::update_note)
                .delete(rest::delete_note),
        )
        .merge(
            SwaggerUi::new("/swagger-ui")
                .config(utoipa_swagger_ui::Config::new([
                    "/rest/api-doc/openapi.json",
                ]))
                .url("/api-doc/openapi.json", rest::ApiDoc::openapi()),
        )
        .with_state(service.clone());

    // Web form router config
    let web_router = Router::new()
        .route("/", get(web::index))
        .route("/add", post(web::add_note))
        .route("/delete", get(web::delete_note))
        .route("/update", post(web::update_note))
        .with_state(service);

    let router = web_router
        .nest("/rest", rest_router)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(cfg.listen_addr())
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind to {}: {e}", cfg.listen_addr());
            panic!("failed to bind to {}: {e}", cfg.listen_addr());
        });

    match listener.local_addr() {
        Ok(addr) => tracing::info!("Keepnote server starting, listening on {}", addr),
        Err(e) => tracing::warn!("Keepnote server starting, local address unknown: {e}"),
    }

    axum::serve(listener, router)
        .await
        .expect("failed to start server");
}

use std::sync::Arc;

use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;

use common::types::Health;
use service::company::{repository::CompanyRepository, CompanyService};

pub mod companies;

/// Shared handler state.
pub struct AppState<R: CompanyRepository> {
    pub companies: Arc<CompanyService<R>>,
}

impl<R: CompanyRepository> AppState<R> {
    pub fn new(companies: CompanyService<R>) -> Self {
        Self { companies: Arc::new(companies) }
    }
}

impl<R: CompanyRepository> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self { companies: Arc::clone(&self.companies) }
    }
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router
pub fn build_router<R: CompanyRepository + 'static>(state: AppState<R>, cors: CorsLayer) -> Router {
    let mut api = Router::new();
    // `/empresas` keeps the Portuguese paths working alongside `/companies`
    for base in ["/companies", "/empresas"] {
        api = api
            .route(base, get(companies::list::<R>).post(companies::create::<R>))
            .route(
                &format!("{base}/:tax_id"),
                get(companies::get::<R>)
                    .put(companies::update::<R>)
                    .delete(companies::delete::<R>),
            );
    }
    let api = api.with_state(state);

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one span per request, method and path only
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // status code and latency
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}

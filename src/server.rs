//! HTTP front-end serving the listing and detail pages.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::Settings;
use crate::detail::{DetailState, DetailView};
use crate::html;
use crate::images::ImagePolicy;
use crate::listing::{ListingView, SortOrder};
use crate::CatalogClient;

/// Shared, read-only state handed to every request.
#[derive(Clone, Debug)]
pub struct AppState {
    pub catalog: CatalogClient,
    pub images: Arc<ImagePolicy>,
}

impl AppState {
    pub fn new(catalog: CatalogClient, images: ImagePolicy) -> Self {
        Self {
            catalog,
            images: Arc::new(images),
        }
    }
}

/// Raw listing query. Values that do not parse fall back to defaults.
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    page: Option<String>,
    sort: Option<String>,
}

impl ListingQuery {
    fn page(&self) -> u32 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<u32>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1)
    }

    fn sort_order(&self) -> SortOrder {
        self.sort
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    /// Current version of the application
    semver: &'static str,
}

/// Creates the router with every page route.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/products") }))
        .route("/products", get(list_products))
        .route("/products/{id}", get(show_product))
        .route("/health", get(health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Html<String> {
    let mut view = ListingView::new(query.page(), query.sort_order());
    view.refresh(&state.catalog).await;
    Html(html::document("Products", view.render(&state.images)).into_string())
}

async fn show_product(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let view = DetailView::load(&state.catalog, id).await;
    match view.state() {
        DetailState::Displayed(_) => {
            Html(html::document(&view.title(), view.render(&state.images)).into_string())
                .into_response()
        }
        DetailState::NotFound => {
            (StatusCode::NOT_FOUND, Html(html::not_found_page().into_string())).into_response()
        }
        DetailState::Failed(message) => (
            StatusCode::BAD_GATEWAY,
            Html(html::error_page(message).into_string()),
        )
            .into_response(),
        DetailState::Loading => (
            StatusCode::BAD_GATEWAY,
            Html(html::error_page("The product did not load.").into_string()),
        )
            .into_response(),
    }
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        semver: env!("CARGO_PKG_VERSION"),
    })
}

/// Binds `0.0.0.0:{port}` and serves until ctrl-c.
pub async fn start(settings: Settings) -> eyre::Result<()> {
    let catalog = CatalogClient::with_timeout(settings.catalog_url, settings.catalog_timeout)?;
    let app = router(AppState::new(catalog, settings.image_policy));

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("storefront listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "could not listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

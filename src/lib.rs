//! Browse a remote product catalog as server-rendered pages.
//!
//! `CatalogClient` talks to the catalog's JSON API, `ListingView`
//! holds one sortable page of products and `DetailView` shows a single
//! product. The `server` module serves both screens over HTTP.

pub mod catalog;
pub mod config;
pub mod detail;
pub mod effect;
pub mod html;
pub mod images;
pub mod listing;
pub mod server;

pub use catalog::{CatalogClient, CatalogError, ProductDetails, ProductPage, ProductSummary};
pub use detail::{stock_label, DetailState, DetailView};
pub use images::ImagePolicy;
pub use listing::{ListingView, SortOrder, PAGE_SIZE};
use reqwest::header::{self, HeaderMap, HeaderValue};
pub use url::Url;

/// Builds the default headers for the catalog client.
fn build_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::USER_AGENT,
        HeaderValue::from_static(concat!("storefront/", env!("CARGO_PKG_VERSION"))),
    );
    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

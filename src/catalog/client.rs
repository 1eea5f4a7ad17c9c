use std::fmt::Display;
use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::catalog::{CatalogError, ProductDetails, ProductPage, ProductSummary};

/// Handle to the remote product catalog.
///
/// Cloning is cheap; clones share the underlying connection pool.
///
/// ```rust,no_run
/// use storefront::{CatalogClient, Url};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = CatalogClient::new(Url::parse("https://dummyjson.com")?)?;
///     let products = client.list_products(1, 10).await?;
///     println!("{:#?}", products);
///     Ok(())
/// }
/// ```
#[derive(Clone, Debug)]
pub struct CatalogClient {
    client: Client,
    base_url: Url,
}

impl CatalogClient {
    /// Client without a request timeout.
    pub fn new(base_url: Url) -> Result<Self, CatalogError> {
        Self::build(base_url, None)
    }

    /// Client whose requests give up after `timeout`.
    pub fn with_timeout(base_url: Url, timeout: Duration) -> Result<Self, CatalogError> {
        Self::build(base_url, Some(timeout))
    }

    fn build(base_url: Url, timeout: Option<Duration>) -> Result<Self, CatalogError> {
        if base_url.cannot_be_a_base() {
            return Err(CatalogError::InvalidRequest(format!(
                "{base_url} cannot be used as a base url"
            )));
        }
        let mut builder = Client::builder().default_headers(crate::build_headers());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| CatalogError::InvalidRequest(e.to_string()))?;
        Ok(Self { client, base_url })
    }

    /// Fetches page `page` (1-based) of `page_size` products.
    pub async fn list_products(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<ProductSummary>, CatalogError> {
        Ok(self.list_page(page, page_size).await?.products)
    }

    /// Like [`list_products`](Self::list_products) but keeps the envelope.
    pub async fn list_page(&self, page: u32, page_size: u32) -> Result<ProductPage, CatalogError> {
        let url = self.listing_url(page, page_size)?;
        let page: ProductPage = self.get_json(url).await?;
        page.validate()?;
        Ok(page)
    }

    /// Fetches a single product. A 4xx answer other than 408 or 429 is
    /// reported as [`CatalogError::NotFound`].
    pub async fn get_product(&self, id: impl Display) -> Result<ProductDetails, CatalogError> {
        let url = self.product_url(&id.to_string())?;
        let product: ProductDetails = self.get_json(url).await?;
        product.validate()?;
        Ok(product)
    }

    pub(crate) fn listing_url(&self, page: u32, page_size: u32) -> Result<Url, CatalogError> {
        if page == 0 {
            return Err(CatalogError::InvalidRequest("pages start at 1".into()));
        }
        if page_size == 0 {
            return Err(CatalogError::InvalidRequest(
                "page size must be positive".into(),
            ));
        }
        let offset = u64::from(page - 1) * u64::from(page_size);

        let mut url = self.endpoint(&["products"])?;
        url.query_pairs_mut()
            .append_pair("limit", &page_size.to_string())
            .append_pair("skip", &offset.to_string());
        Ok(url)
    }

    pub(crate) fn product_url(&self, id: &str) -> Result<Url, CatalogError> {
        if id.is_empty() {
            return Err(CatalogError::InvalidRequest("empty product id".into()));
        }
        // dot segments would be dropped from the path and hit the listing
        if matches!(id, "." | "..") {
            return Err(CatalogError::NotFound(StatusCode::NOT_FOUND));
        }
        self.endpoint(&["products", id])
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, CatalogError> {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.path_segments_mut()
            .map_err(|_| CatalogError::InvalidRequest(format!("{} has no path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, CatalogError> {
        debug!(%url, "catalog request");
        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            warn!(%url, error = %e, "catalog request failed");
            CatalogError::from(e)
        })?;
        let response = check_status(response)?;
        response.json::<T>().await.map_err(|e| {
            warn!(%url, error = %e, "catalog response unusable");
            CatalogError::from(e)
        })
    }
}

fn check_status(response: Response) -> Result<Response, CatalogError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    warn!(url = %response.url(), %status, "catalog answered with an error status");
    Err(CatalogError::from_status(status))
}

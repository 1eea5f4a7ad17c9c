use serde::Deserialize;

use crate::catalog::CatalogError;

#[derive(Deserialize, Clone, Debug, PartialEq)]
/// A product as it appears in a catalog listing.
///
/// Carries only what a grid card needs; the gallery and stock
/// quantity live on [`ProductDetails`].
pub struct ProductSummary {
    /// Catalog id, shared with the detail record.
    pub id: u64,
    /// Product name
    pub title: String,
    /// Short marketing description.
    pub description: String,
    /// Price in the catalog's currency.
    pub price: f64,
    /// URL to the thumbnail of the product.
    pub thumbnail: String,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
/// The full record of a single product.
///
/// Use `CatalogClient::get_product` to fetch one by id.
pub struct ProductDetails {
    /// Catalog id, shared with the listing record.
    pub id: u64,
    /// Product name
    pub title: String,
    /// Full description.
    pub description: String,
    /// Price in the catalog's currency.
    pub price: f64,
    /// Gallery URLs. The first one is the primary image.
    pub images: Vec<String>,
    /// Units available.
    pub stock: u32,
}

#[derive(Deserialize, Clone, Debug, Default)]
/// One page of the catalog as returned by the listing endpoint.
pub struct ProductPage {
    /// Products on this page, in service order.
    pub products: Vec<ProductSummary>,
    /// Number of products in the whole catalog.
    #[serde(default)]
    pub total: u64,
    /// Offset this page starts at.
    #[serde(default)]
    pub skip: u64,
    /// Page size the service applied.
    #[serde(default)]
    pub limit: u64,
}

fn check_price(id: u64, price: f64) -> Result<(), CatalogError> {
    if !price.is_finite() || price < 0.0 {
        return Err(CatalogError::InvalidResponse(format!(
            "product {id} has an invalid price {price}"
        )));
    }
    Ok(())
}

impl ProductSummary {
    pub(crate) fn validate(&self) -> Result<(), CatalogError> {
        check_price(self.id, self.price)
    }
}

impl ProductDetails {
    pub(crate) fn validate(&self) -> Result<(), CatalogError> {
        check_price(self.id, self.price)?;
        if self.images.is_empty() {
            return Err(CatalogError::InvalidResponse(format!(
                "product {} has no images",
                self.id
            )));
        }
        Ok(())
    }

    /// The image shown large at the top of the gallery.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Every image after the primary one, in catalog order.
    pub fn secondary_images(&self) -> &[String] {
        self.images.get(1..).unwrap_or_default()
    }

    /// Whether at least one unit can be ordered.
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

impl ProductPage {
    pub(crate) fn validate(&self) -> Result<(), CatalogError> {
        self.products.iter().try_for_each(ProductSummary::validate)
    }
}

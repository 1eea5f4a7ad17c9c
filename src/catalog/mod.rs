mod client;
mod error;
mod product;

pub use client::CatalogClient;
pub use error::CatalogError;
pub use product::{ProductDetails, ProductPage, ProductSummary};

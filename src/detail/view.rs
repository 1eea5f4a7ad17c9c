use maud::{html, Markup};
use tracing::{debug, warn};

use crate::catalog::{CatalogClient, CatalogError, ProductDetails};
use crate::effect::{Effect, Ticket};
use crate::html::{image, price};
use crate::images::ImagePolicy;

/// "In Stock" when at least one unit is available, "Out of Stock" otherwise.
pub fn stock_label(stock: u32) -> &'static str {
    if stock > 0 {
        "In Stock"
    } else {
        "Out of Stock"
    }
}

/// Where a detail view is in its single fetch.
///
/// `Loading` moves to exactly one of the other states and stays there.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Displayed(ProductDetails),
    NotFound,
    /// The catalog could not answer; carries a user facing message.
    Failed(String),
}

/// The single product screen.
#[derive(Debug)]
pub struct DetailView {
    id: String,
    state: DetailState,
    effect: Effect<String>,
}

impl DetailView {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            state: DetailState::Loading,
            effect: Effect::new(),
        }
    }

    /// Opens the view for `id` and fetches the product.
    pub async fn load(client: &CatalogClient, id: impl Into<String>) -> Self {
        let mut view = Self::new(id);
        if let Some(ticket) = view.begin_fetch() {
            let result = client.get_product(ticket.dependency()).await;
            view.complete_fetch(ticket, result);
        }
        view
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    /// Issues the one fetch this view makes.
    pub fn begin_fetch(&mut self) -> Option<Ticket<String>> {
        if self.state != DetailState::Loading {
            return None;
        }
        self.effect.update(self.id.clone())
    }

    /// Settles the view. Returns `false` if the result was ignored.
    pub fn complete_fetch(
        &mut self,
        ticket: Ticket<String>,
        result: Result<ProductDetails, CatalogError>,
    ) -> bool {
        if !self.effect.accepts(&ticket) || self.state != DetailState::Loading {
            debug!(id = %self.id, "discarding product response");
            return false;
        }
        self.state = match result {
            Ok(product) => DetailState::Displayed(product),
            Err(err) if err.is_not_found() => {
                debug!(id = %self.id, "product not found");
                DetailState::NotFound
            }
            Err(err) => {
                warn!(id = %self.id, error = %err, "could not load product");
                DetailState::Failed(format!("Could not load product {}: {err}", self.id))
            }
        };
        true
    }

    pub fn teardown(&mut self) {
        self.effect.teardown();
    }

    /// Document title for the current state.
    pub fn title(&self) -> String {
        match &self.state {
            DetailState::Displayed(product) => product.title.clone(),
            DetailState::Loading => "Loading...".into(),
            DetailState::NotFound => "Not found".into(),
            DetailState::Failed(_) => "Catalog unavailable".into(),
        }
    }

    /// Renders the body of the product page.
    pub fn render(&self, images: &ImagePolicy) -> Markup {
        let product = match &self.state {
            DetailState::Displayed(product) => product,
            DetailState::Loading => return html! { p class="loading" { "Loading..." } },
            DetailState::NotFound => {
                return html! { p class="not-found" { "This page could not be found." } }
            }
            DetailState::Failed(message) => return html! { p class="error" { (message) } },
        };
        let stock_class = if product.in_stock() {
            "stock in-stock"
        } else {
            "stock out-of-stock"
        };

        html! {
            h1 { (product.title) }
            div class="product" {
                div class="gallery" {
                    @if let Some(primary) = product.primary_image() {
                        div class="primary-image" {
                            (image(images, primary, &product.title, 600, 600))
                        }
                    }
                    div class="secondary-images" {
                        @for (index, src) in product.secondary_images().iter().enumerate() {
                            @let alt = format!("{} image {}", product.title, index + 1);
                            (image(images, src, &alt, 100, 100))
                        }
                    }
                }
                div class="details" {
                    p class="description" { (product.description) }
                    p class="price" { (price(product.price)) }
                    p class=(stock_class) { (stock_label(product.stock)) }
                    button class="add-to-cart" type="button" { "Add to Cart" }
                }
            }
        }
    }
}

use maud::{html, Markup, PreEscaped};
use tracing::{debug, warn};

use crate::catalog::{CatalogClient, CatalogError, ProductSummary};
use crate::effect::{Effect, Ticket};
use crate::html::{image, price};
use crate::images::ImagePolicy;
use crate::listing::{sort_by_price, SortOrder};

/// Products per listing page.
pub const PAGE_SIZE: u32 = 10;

/// Shows the grid for the chosen order and carries the order into the
/// pagination links.
const SORT_SCRIPT: &str = r#"
function storefrontSort(order) {
  document.querySelectorAll(".grid[data-sort]").forEach(function (grid) {
    grid.hidden = grid.dataset.sort !== order;
  });
  document.querySelectorAll(".pagination a").forEach(function (link) {
    var url = new URL(link.href, window.location.href);
    url.searchParams.set("sort", order);
    link.setAttribute("href", url.pathname + url.search);
  });
}
"#;

/// State of the product listing screen.
///
/// Holds one page of products at a time. Changing the page re-fetches
/// (see [`refresh`](Self::refresh)); changing the sort order only
/// re-sorts what is already held.
#[derive(Debug)]
pub struct ListingView {
    products: Vec<ProductSummary>,
    sort_order: SortOrder,
    page: u32,
    loading: bool,
    error: Option<String>,
    effect: Effect<u32>,
}

impl Default for ListingView {
    fn default() -> Self {
        Self::new(1, SortOrder::default())
    }
}

impl ListingView {
    /// A view opened on `page` (clamped to 1) with `sort_order`.
    pub fn new(page: u32, sort_order: SortOrder) -> Self {
        Self {
            products: Vec::new(),
            sort_order,
            page: page.max(1),
            loading: false,
            error: None,
            effect: Effect::new(),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The page as fetched, before sorting.
    pub fn products(&self) -> &[ProductSummary] {
        &self.products
    }

    /// The held page sorted by price. Never stored.
    pub fn sorted_products(&self) -> Vec<ProductSummary> {
        sort_by_price(&self.products, self.sort_order)
    }

    pub fn set_sort_order(&mut self, sort_order: SortOrder) {
        self.sort_order = sort_order;
    }

    pub fn can_go_previous(&self) -> bool {
        self.page > 1
    }

    /// Steps back one page, never below 1.
    pub fn previous(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    /// Steps forward one page. There is no upper bound.
    pub fn next(&mut self) {
        self.page = self.page.saturating_add(1);
    }

    /// Starts a fetch if the page changed since the last one.
    pub fn begin_fetch(&mut self) -> Option<Ticket<u32>> {
        let ticket = self.effect.update(self.page)?;
        self.loading = true;
        Some(ticket)
    }

    /// Applies the outcome of the fetch started with `ticket`.
    ///
    /// Returns `false` when the result was discarded because a newer
    /// fetch was started or the view was torn down.
    pub fn complete_fetch(
        &mut self,
        ticket: Ticket<u32>,
        result: Result<Vec<ProductSummary>, CatalogError>,
    ) -> bool {
        if !self.effect.accepts(&ticket) {
            debug!(page = ticket.dependency(), "discarding stale listing response");
            return false;
        }
        match result {
            Ok(products) => {
                self.products = products;
                self.error = None;
            }
            Err(err) => {
                warn!(page = ticket.dependency(), error = %err, "could not load products");
                self.products.clear();
                self.error = Some(format!("Could not load products: {err}"));
            }
        }
        self.loading = false;
        true
    }

    /// Fetches the current page if it is not the one already held.
    pub async fn refresh(&mut self, client: &CatalogClient) {
        if let Some(ticket) = self.begin_fetch() {
            let result = client.list_products(*ticket.dependency(), PAGE_SIZE).await;
            self.complete_fetch(ticket, result);
        }
    }

    /// Drops the view. Fetches still in flight are ignored when they land.
    pub fn teardown(&mut self) {
        self.effect.teardown();
        self.loading = false;
    }

    fn page_href(&self, page: u32) -> String {
        format!("/products?page={page}&sort={}", self.sort_order)
    }

    /// One grid of the held page in `order`. Only the grid matching the
    /// current sort order is visible.
    fn grid(&self, order: SortOrder, images: &ImagePolicy) -> Markup {
        html! {
            div class="grid" data-sort=(order) hidden[order != self.sort_order] {
                @for product in sort_by_price(&self.products, order) {
                    div class="product-card" data-id=(product.id) data-price=(product.price) {
                        a href=(format!("/products/{}", product.id)) {
                            (image(images, &product.thumbnail, &product.title, 400, 160))
                            h2 { (product.title) }
                            p class="description" { (product.description) }
                            p class="price" { (price(product.price)) }
                        }
                    }
                }
            }
        }
    }

    /// Renders the screen.
    ///
    /// The page is emitted in both price orders and the sort control
    /// switches between them in the browser, so re-sorting never goes
    /// back to the catalog.
    pub fn render(&self, images: &ImagePolicy) -> Markup {
        html! {
            h1 { "Products" }
            div class="sort" {
                label for="sort" { "Sort by price:" }
                select id="sort" name="sort" onchange="storefrontSort(this.value)" {
                    @for order in [SortOrder::Ascending, SortOrder::Descending] {
                        option value=(order) selected[order == self.sort_order] { (order.label()) }
                    }
                }
            }
            @if self.loading {
                p class="loading" { "Loading..." }
            } @else if let Some(error) = &self.error {
                p class="error" { (error) }
            } @else if self.products.is_empty() {
                p class="empty" { "No products found." }
            } @else {
                (self.grid(SortOrder::Ascending, images))
                (self.grid(SortOrder::Descending, images))
            }
            nav class="pagination" {
                @if self.can_go_previous() {
                    a class="previous" href=(self.page_href(self.page - 1)) { "Previous" }
                } @else {
                    button class="previous" type="button" disabled { "Previous" }
                }
                a class="next" href=(self.page_href(self.page.saturating_add(1))) { "Next" }
            }
            script { (PreEscaped(SORT_SCRIPT)) }
        }
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::*;

    fn product(id: u64, price: f64) -> ProductSummary {
        ProductSummary {
            id,
            title: format!("Product {id}"),
            description: "desc".into(),
            price,
            thumbnail: format!("https://cdn.dummyjson.com/{id}/thumbnail.png"),
        }
    }

    fn images() -> ImagePolicy {
        ImagePolicy::new(["cdn.dummyjson.com"])
    }

    #[test]
    fn starts_on_first_page_sorted_ascending() {
        let view = ListingView::default();
        assert_eq!(view.page(), 1);
        assert_eq!(view.sort_order(), SortOrder::Ascending);
        assert!(!view.is_loading());
        assert_eq!(ListingView::new(0, SortOrder::Descending).page(), 1);
    }

    #[test]
    fn previous_floors_at_one() {
        let mut view = ListingView::default();
        assert!(!view.can_go_previous());
        view.previous();
        assert_eq!(view.page(), 1);
        view.next();
        view.next();
        assert_eq!(view.page(), 3);
        assert!(view.can_go_previous());
        view.previous();
        assert_eq!(view.page(), 2);
    }

    #[test]
    fn page_change_triggers_fetch_sort_change_does_not() {
        let mut view = ListingView::default();
        let ticket = view.begin_fetch().unwrap();
        assert!(view.is_loading());
        assert!(view.complete_fetch(ticket, Ok(vec![product(1, 3.0), product(2, 1.0)])));
        assert!(!view.is_loading());

        view.set_sort_order(SortOrder::Descending);
        assert!(view.begin_fetch().is_none());
        let ids: Vec<u64> = view.sorted_products().iter().map(|p| p.id).collect();
        assert_eq!(ids, [1, 2]);

        view.next();
        assert_eq!(view.begin_fetch().map(|t| *t.dependency()), Some(2));
    }

    #[test]
    fn slower_response_for_old_page_is_discarded() {
        let mut view = ListingView::default();
        let first = view.begin_fetch().unwrap();
        view.next();
        let second = view.begin_fetch().unwrap();

        assert!(view.complete_fetch(second, Ok(vec![product(11, 5.0)])));
        assert!(!view.complete_fetch(first, Ok(vec![product(1, 5.0)])));
        assert_eq!(view.products()[0].id, 11);
    }

    #[test]
    fn teardown_ignores_late_completion() {
        let mut view = ListingView::default();
        let ticket = view.begin_fetch().unwrap();
        view.teardown();
        assert!(!view.complete_fetch(ticket, Ok(vec![product(1, 1.0)])));
        assert!(view.products().is_empty());
    }

    #[test]
    fn failure_degrades_to_visible_error() {
        let mut view = ListingView::default();
        let ticket = view.begin_fetch().unwrap();
        view.complete_fetch(
            ticket,
            Err(CatalogError::from_status(StatusCode::INTERNAL_SERVER_ERROR)),
        );
        assert!(view.products().is_empty());
        assert!(view.error().unwrap().starts_with("Could not load products"));
        assert!(view.render(&images()).into_string().contains("class=\"error\""));
    }

    #[test]
    fn loading_hides_the_grid() {
        let mut view = ListingView::default();
        let ticket = view.begin_fetch().unwrap();
        view.complete_fetch(ticket, Ok(vec![product(1, 1.0)]));
        view.next();
        view.begin_fetch().unwrap();

        let html = view.render(&images()).into_string();
        assert!(html.contains("Loading..."));
        assert!(!html.contains("product-card"));
    }

    #[test]
    fn first_page_disables_previous() {
        let html = ListingView::default().render(&images()).into_string();
        assert!(html.contains("<button class=\"previous\" type=\"button\" disabled>"));
        assert!(html.contains("href=\"/products?page=2&amp;sort=asc\""));
    }

    #[test]
    fn renders_both_orders_with_current_one_visible() {
        let mut view = ListingView::new(1, SortOrder::Descending);
        let ticket = view.begin_fetch().unwrap();
        view.complete_fetch(ticket, Ok(vec![product(1, 30.0), product(2, 10.0)]));

        let html = view.render(&images()).into_string();
        assert!(html.contains("<div class=\"grid\" data-sort=\"asc\" hidden>"));
        assert!(html.contains("<div class=\"grid\" data-sort=\"desc\">"));
        assert!(html.contains("data-price=\"30\""));
    }

    #[test]
    fn catalog_text_is_escaped_in_cards() {
        let mut view = ListingView::default();
        let ticket = view.begin_fetch().unwrap();
        let mut item = product(1, 1.0);
        item.title = "<b>Bold</b> & Co".into();
        view.complete_fetch(ticket, Ok(vec![item]));

        let html = view.render(&images()).into_string();
        assert!(!html.contains("<b>Bold</b>"));
        assert!(html.contains("&lt;b&gt;Bold&lt;/b&gt; &amp; Co"));
    }
}

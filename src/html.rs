//! Markup shared by the views.

use maud::{html, Markup, DOCTYPE};

use crate::images::ImagePolicy;

/// Currency-prefixed price, e.g. `$9.99`.
pub fn price(value: f64) -> String {
    format!("${value}")
}

/// An `<img>` for `src`, or a placeholder when the host is not allowed.
pub(crate) fn image(policy: &ImagePolicy, src: &str, alt: &str, width: u32, height: u32) -> Markup {
    if policy.allows(src) {
        html! {
            img src=(src) alt=(alt) width=(width) height=(height);
        }
    } else {
        tracing::debug!(src, "image host not allowed");
        html! {
            div class="image-placeholder" role="img" aria-label=(alt)
                style=(format!("width:{width}px;height:{height}px")) {}
        }
    }
}

/// Wraps `body` in a complete document.
pub fn document(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (title) }
            }
            body {
                main class="container" { (body) }
            }
        }
    }
}

/// The page shown for products that do not exist.
pub fn not_found_page() -> Markup {
    document(
        "404: This page could not be found.",
        html! {
            h1 { "404" }
            p class="not-found" { "This page could not be found." }
        },
    )
}

/// The page shown when the catalog could not be reached.
pub fn error_page(message: &str) -> Markup {
    document(
        "Catalog unavailable",
        html! {
            h1 { "Something went wrong" }
            p class="error" { (message) }
        },
    )
}

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use httpmock::MockServer;
use serde_json::{json, Value};
use storefront::server::{router, AppState};
use storefront::{CatalogClient, ImagePolicy, Url};
use tower::ServiceExt;

pub const IMAGE_HOST: &str = "cdn.dummyjson.com";

pub fn summary(id: u64, price: f64) -> Value {
    json!({
        "id": id,
        "title": format!("Product {id}"),
        "description": format!("Description of product {id}"),
        "price": price,
        "thumbnail": format!("https://{IMAGE_HOST}/products/{id}/thumbnail.png"),
        "category": "beauty"
    })
}

pub fn listing(products: Vec<Value>, skip: u64) -> Value {
    json!({
        "products": products,
        "total": 194,
        "skip": skip,
        "limit": 10
    })
}

pub fn details(id: u64, images: &[&str], stock: u32) -> Value {
    json!({
        "id": id,
        "title": format!("Product {id}"),
        "description": format!("Full description of product {id}"),
        "price": 9.99,
        "images": images,
        "stock": stock,
        "thumbnail": format!("https://{IMAGE_HOST}/products/{id}/thumbnail.png")
    })
}

pub fn catalog(server: &MockServer) -> CatalogClient {
    CatalogClient::new(Url::parse(&server.base_url()).unwrap()).unwrap()
}

pub struct TestContext {
    pub router: Router,
}

impl TestContext {
    pub fn new(server: &MockServer) -> Self {
        let state = AppState::new(catalog(server), ImagePolicy::new([IMAGE_HOST]));
        Self {
            router: router(state),
        }
    }

    pub async fn get(&self, route: &str) -> (Response<Body>, String) {
        let request = Request::builder()
            .uri(route)
            .method("GET")
            .body(Body::empty())
            .unwrap();
        let response = self.router.clone().oneshot(request).await.unwrap();
        let (parts, body) = response.into_parts();
        let bytes = body.collect().await.unwrap().to_bytes();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        (Response::from_parts(parts, Body::empty()), text)
    }
}

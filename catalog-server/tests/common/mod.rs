//! 测试辅助: 内存存储上的路由 + 请求发送

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use catalog_server::db::MemoryStore;
use catalog_server::{Config, ServerState, app};
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use shared::models::{Category, Product};
use tower::ServiceExt;

pub fn category(id: i64, name: &str) -> Category {
    Category {
        id,
        name: name.to_string(),
    }
}

pub fn product(id: i64, title: &str, brand: &str, category_id: Option<i64>) -> Product {
    Product {
        id,
        title: title.to_string(),
        thumbnail: format!("https://cdn.example/products/{id}.webp"),
        brand: brand.to_string(),
        category_id,
        price: 10.0 + id as f64,
        discount_percentage: Some(5.0),
        rating: 4.5,
        stock: 10,
    }
}

/// Router over an in-memory store seeded with the given rows
pub fn memory_app(categories: Vec<Category>, products: Vec<Product>) -> Router {
    let state = ServerState::in_memory(Config::in_memory(), MemoryStore::seeded(categories, products));
    app(state)
}

/// Three categories, six products: beauty(1) has 3, fragrances(2) has 2,
/// furniture(3) has 0, one product without category
pub fn sample_app() -> Router {
    memory_app(
        vec![
            category(1, "beauty"),
            category(2, "fragrances"),
            category(3, "furniture"),
        ],
        vec![
            product(1, "Essence Mascara", "Essence", Some(1)),
            product(2, "Eyeshadow Palette", "Glamour Beauty", Some(1)),
            product(3, "Powder Canister", "Velvet Touch", Some(1)),
            product(4, "Calvin Klein CK One", "Calvin Klein", Some(2)),
            product(5, "Chanel Coco Noir", "Chanel", Some(2)),
            product(6, "Loose Item", "", None),
        ],
    )
}

/// Send a request and decode the JSON body (`Value::Null` when empty)
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let request = builder.body(body).unwrap();
    send_request(app, request).await
}

pub async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri, None).await
}

/// `items` of a category in `GET /categories?limit=100`
pub async fn items_of(app: &Router, category_id: i64) -> Option<u64> {
    let (_, page) = get(app, "/categories?limit=100").await;
    page["categories"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["id"] == category_id)
        .map(|c| c["items"].as_u64().unwrap())
}

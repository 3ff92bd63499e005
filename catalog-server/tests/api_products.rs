//! 商品接口测试 (内存存储)

mod common;

use common::{get, memory_app, product, sample_app, send};
use http::StatusCode;
use serde_json::json;

fn ids(page: &serde_json::Value) -> Vec<i64> {
    page["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn pages_are_disjoint_and_complete() {
    let products = (1..=15)
        .rev()
        .map(|i| product(i, &format!("Item {i}"), "Acme", None))
        .collect();
    let app = memory_app(vec![], products);

    let (_, first) = get(&app, "/products?limit=10&skip=0").await;
    let (_, second) = get(&app, "/products?limit=10&skip=10").await;
    assert_eq!(first["total"], 15);
    assert_eq!(second["total"], 15);

    let mut all = ids(&first);
    assert_eq!(all, (1..=10).collect::<Vec<_>>());
    all.extend(ids(&second));
    assert_eq!(all, (1..=15).collect::<Vec<_>>());
}

#[tokio::test]
async fn skip_past_total_returns_empty_page() {
    let app = sample_app();
    let (status, page) = get(&app, "/products?skip=100").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["products"], json!([]));
    assert_eq!(page["total"], 6);
    assert_eq!(page["skip"], 100);
}

#[tokio::test]
async fn paging_params_are_clamped() {
    let app = sample_app();
    let (_, page) = get(&app, "/products?limit=500&skip=-5").await;
    assert_eq!(page["limit"], 100);
    assert_eq!(page["skip"], 0);

    let (_, page) = get(&app, "/products?limit=abc").await;
    assert_eq!(page["limit"], 10);
}

#[tokio::test]
async fn products_carry_category_names() {
    let app = sample_app();
    let (_, page) = get(&app, "/products").await;
    let products = page["products"].as_array().unwrap();
    assert_eq!(products[0]["category"], "beauty");
    assert_eq!(products[3]["category"], "fragrances");
    assert_eq!(products[5]["category"], "");
    assert!(products[0].get("_id").is_none());
}

#[tokio::test]
async fn filters_by_category_and_search() {
    let app = sample_app();

    let (_, page) = get(&app, "/products?categoryId=2").await;
    assert_eq!(ids(&page), vec![4, 5]);

    let (_, page) = get(&app, "/products?categoryId=1,2&categoryId=3").await;
    assert_eq!(page["total"], 5);

    let (_, page) = get(&app, "/products?q=CHANEL").await;
    assert_eq!(ids(&page), vec![5]);

    let (_, page) = get(&app, "/products?q=beauty&categoryId=1").await;
    assert_eq!(ids(&page), vec![2]);

    let (status, body) = get(&app, "/products?categoryId=x").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn select_keeps_requested_fields_and_id() {
    let app = sample_app();
    let (_, page) = get(&app, "/products?select=title,price,bogus&limit=1").await;
    let first = page["products"][0].as_object().unwrap();
    let mut keys: Vec<&str> = first.keys().map(String::as_str).collect();
    keys.sort();
    assert_eq!(keys, vec!["id", "price", "title"]);
}

#[tokio::test]
async fn create_update_get_delete_roundtrip() {
    let app = sample_app();

    let (status, created) = send(
        &app,
        "POST",
        "/products",
        Some(json!({"title": "Wooden Chair", "categoryId": 3, "price": 49.5, "brand": "Ikea"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["id"], 7);
    assert_eq!(created["category"], "furniture");
    assert_eq!(created["rating"], 0.0);
    assert_eq!(created["stock"], 0);

    let (status, updated) = send(
        &app,
        "PUT",
        "/products/7",
        Some(json!({"price": 39.0, "discountPercentage": 10})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["price"], 39.0);
    assert_eq!(updated["discountPercentage"], 10.0);
    assert_eq!(updated["title"], "Wooden Chair");

    let (status, fetched) = get(&app, "/products/7").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, updated);

    let (status, deleted) = send(&app, "DELETE", "/products/7", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["isDeleted"], true);
    assert_eq!(deleted["category"], "furniture");
    assert!(deleted["deletedOn"].as_str().unwrap().contains('T'));

    let (status, body) = get(&app, "/products/7").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Product not found");
}

#[tokio::test]
async fn product_ids_are_never_reused() {
    let app = sample_app();
    send(&app, "DELETE", "/products/6", None).await;
    let (_, created) = send(
        &app,
        "POST",
        "/products",
        Some(json!({"title": "Fresh", "price": 1})),
    )
    .await;
    assert_eq!(created["id"], 7);
}

#[tokio::test]
async fn invalid_product_requests() {
    let app = sample_app();

    let (status, body) = send(&app, "DELETE", "/products/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid product id");

    let (status, _) = send(&app, "DELETE", "/products/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "POST",
        "/products",
        Some(json!({"title": "Ghost", "price": 5, "categoryId": 42})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/products",
        Some(json!({"title": "Negative", "price": -5})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "PUT",
        "/products/1",
        Some(json!({"stock": -1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

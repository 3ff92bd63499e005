//! 分类接口测试 (内存存储)

mod common;

use common::{get, items_of, sample_app, send};
use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn list_counts_and_ranks_categories() {
    let app = sample_app();
    let (status, page) = get(&app, "/categories").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 3);
    assert_eq!(page["skip"], 0);
    assert_eq!(page["limit"], 10);

    let categories = page["categories"].as_array().unwrap();
    let summary: Vec<(i64, &str, u64)> = categories
        .iter()
        .map(|c| {
            (
                c["id"].as_i64().unwrap(),
                c["name"].as_str().unwrap(),
                c["items"].as_u64().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![(1, "beauty", 3), (2, "fragrances", 2), (3, "furniture", 0)]
    );
}

#[tokio::test]
async fn list_is_sliced_but_total_is_not() {
    let app = sample_app();
    let (_, page) = get(&app, "/categories?limit=1&skip=1").await;
    assert_eq!(page["total"], 3);
    assert_eq!(page["limit"], 1);
    assert_eq!(page["categories"].as_array().unwrap().len(), 1);
    assert_eq!(page["categories"][0]["name"], "fragrances");

    let (_, page) = get(&app, "/categories?skip=10").await;
    assert_eq!(page["total"], 3);
    assert!(page["categories"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn create_stores_slug_and_rejects_duplicates() {
    let app = sample_app();
    let (status, created) = send(&app, "POST", "/categories", Some(json!({"name": "Home Decoration"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["name"], "home-decoration");
    assert_eq!(created["items"], 0);
    assert_eq!(created["id"], 4);

    let (status, body) = send(&app, "POST", "/categories", Some(json!({"name": "home decoration"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("already exists"));

    let (status, body) = send(&app, "POST", "/categories", Some(json!({"name": "   "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn rename_to_existing_slug_conflicts() {
    let app = sample_app();
    send(&app, "POST", "/categories", Some(json!({"name": "Home Decoration"}))).await;

    let (status, body) = send(&app, "PUT", "/categories/3", Some(json!({"name": "Home Decoration"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, renamed) = send(&app, "PUT", "/categories/1", Some(json!({"name": "Skin Care"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(renamed["name"], "skin-care");
    assert_eq!(renamed["items"], 3);

    let (status, _) = send(&app, "PUT", "/categories/404", Some(json!({"name": "x"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn transfer_delete_moves_products() {
    let app = sample_app();
    let before = items_of(&app, 2).await.unwrap();

    let (status, body) = send(&app, "DELETE", "/categories/1?transferToCategoryId=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": 1, "name": "beauty", "deleted": true}));

    assert_eq!(items_of(&app, 2).await, Some(before + 3));
    assert_eq!(items_of(&app, 1).await, None);

    let (_, page) = get(&app, "/products?categoryId=2&limit=100").await;
    assert_eq!(page["total"], 5);
    for p in page["products"].as_array().unwrap() {
        assert_eq!(p["category"], "fragrances");
    }
}

#[tokio::test]
async fn transfer_target_can_come_from_body() {
    let app = sample_app();
    let (status, _) = send(
        &app,
        "DELETE",
        "/categories/2",
        Some(json!({"transferToCategoryId": 3})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(items_of(&app, 3).await, Some(2));
}

#[tokio::test]
async fn plain_delete_leaves_products_uncategorized() {
    let app = sample_app();
    let (status, _) = send(&app, "DELETE", "/categories/1", None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, product) = get(&app, "/products/1").await;
    assert_eq!(product["category"], "");
    assert!(product["categoryId"].is_null());
}

#[tokio::test]
async fn invalid_deletes_are_rejected() {
    let app = sample_app();

    let (status, body) = send(&app, "DELETE", "/categories/1?transferToCategoryId=1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = send(&app, "DELETE", "/categories/1?transferToCategoryId=99", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "DELETE", "/categories/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Category not found");

    let (status, _) = send(&app, "DELETE", "/categories/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // nothing moved
    assert_eq!(items_of(&app, 1).await, Some(3));
}

#[tokio::test]
async fn null_delete_body_is_a_plain_delete() {
    let app = sample_app();
    let (status, body) = send(&app, "DELETE", "/categories/1", Some(json!(null))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], true);

    let (_, product) = get(&app, "/products/1").await;
    assert!(product["categoryId"].is_null());
}

#[tokio::test]
async fn non_object_delete_body_is_rejected() {
    let app = sample_app();
    let (status, body) = send(&app, "DELETE", "/categories/1", Some(json!([]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON body"));
    assert_eq!(items_of(&app, 1).await, Some(3));
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = sample_app();
    let request = http::Request::builder()
        .method("POST")
        .uri("/categories")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let (status, body) = common::send_request(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON body"));
}

#[tokio::test]
async fn health_reports_ok() {
    let app = sample_app();
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "memory");
}

// catalog-client/tests/client_integration.rs
// 集成测试: 内存存储的 catalog-server + HTTP 客户端

use catalog_client::{
    CacheState, CatalogClient, CategoryList, ClientConfig, ClientError, PageParams,
    ProductCreate, ProductList, ProductListQuery, ProductUpdate,
};
use catalog_server::db::MemoryStore;
use catalog_server::{Config, ServerState, app};

async fn spawn_server() -> CatalogClient {
    let state = ServerState::in_memory(Config::in_memory(), MemoryStore::new());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app(state)).await.unwrap();
    });
    ClientConfig::new(format!("http://{addr}"))
        .with_timeout(5)
        .build_http_client()
        .unwrap()
}

#[tokio::test]
async fn category_hook_tracks_mutations() {
    let client = spawn_server().await;
    let mut list = CategoryList::categories(client.clone(), PageParams::default());

    list.refresh().await;
    assert!(list.state().is_ready());
    assert_eq!(list.total(), 0);

    let beauty = list.create("Beauty").await.unwrap();
    let decor = list.create("Home Decoration").await.unwrap();
    assert_eq!(decor.name, "home-decoration");
    assert_eq!(list.total(), 2);
    assert_eq!(list.items()[0].id, decor.id);

    let err = list.create("home decoration").await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 400, .. }));
    assert_eq!(list.total(), 2);

    let renamed = list.rename(beauty.id, "Skin Care").await.unwrap();
    assert_eq!(renamed.name, "skin-care");
    assert_eq!(list.items()[1].name, "skin-care");

    let deleted = list.delete(decor.id, Some(beauty.id)).await.unwrap();
    assert!(deleted.deleted);
    assert_eq!(list.total(), 1);

    list.refresh().await;
    assert_eq!(list.total(), 1);
}

#[tokio::test]
async fn product_hook_and_typed_calls() {
    let client = spawn_server().await;
    let category = client.create_category("laptops").await.unwrap();

    let query = ProductListQuery::new(PageParams::default()).with_categories([category.id]);
    let mut list = ProductList::products(client.clone(), &query);
    list.refresh().await;
    assert_eq!(list.total(), 0);

    let created = list
        .create(&ProductCreate {
            title: "MacBook Pro".into(),
            brand: Some("Apple".into()),
            category_id: Some(category.id),
            price: Some(1999.0),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(created.category, "laptops");
    assert_eq!(list.total(), 1);

    let patch = ProductUpdate {
        stock: Some(4),
        ..Default::default()
    };
    let updated = list.update(created.id(), &patch).await.unwrap();
    assert_eq!(updated.product.stock, 4);
    assert_eq!(list.items()[0].product.stock, 4);

    let fetched = client.get_product(created.id()).await.unwrap();
    assert_eq!(fetched, updated);

    let page = client
        .list_products(&ProductListQuery::new(PageParams::default()).with_search("APPLE"))
        .await
        .unwrap();
    assert_eq!(page.total, 1);

    let deleted = list.delete(created.id()).await.unwrap();
    assert!(deleted.is_deleted);
    assert_eq!(list.total(), 0);

    let err = client.get_product(created.id()).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Product not found");
}

#[tokio::test]
async fn unreachable_server_fails_the_page() {
    let client = ClientConfig::new("http://127.0.0.1:9")
        .with_timeout(2)
        .build_http_client()
        .unwrap();
    let mut list = CategoryList::categories(client, PageParams::default());
    let state = list.refresh().await;
    assert!(matches!(state, CacheState::Failed(_)));
}

//! 列表与分页
//!
//! Query parsing for the list endpoints plus the category / product page
//! builders.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde_json::{Map, Value};
use shared::models::ProductView;
use shared::request::PageParams;
use shared::response::{CategoryPage, ProductPage};
use shared::{AppError, AppResult, ErrorCode};

use super::aggregation::AggregationService;
use crate::db::repository::{ProductFilter, ProductStore};

/// Parsed `GET /products` query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
    pub page: PageParams,
    pub filter: ProductFilter,
    /// Requested fields; `None` keeps every field
    pub select: Option<BTreeSet<String>>,
}

impl ProductQuery {
    /// Build from raw query pairs
    ///
    /// `categoryId` may repeat and each value may hold a comma-separated
    /// list. Non-numeric category ids are rejected.
    pub fn from_pairs(pairs: &[(String, String)]) -> AppResult<Self> {
        let mut limit = None;
        let mut skip = None;
        let mut category_ids = Vec::new();
        let mut search = None;
        let mut select = None;

        for (key, value) in pairs {
            match key.as_str() {
                "limit" => limit = Some(value.as_str()),
                "skip" => skip = Some(value.as_str()),
                "categoryId" => {
                    for raw in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                        let id = raw.parse::<i64>().map_err(|_| {
                            AppError::with_message(
                                ErrorCode::InvalidFormat,
                                format!("Invalid category id: {raw}"),
                            )
                        })?;
                        if !category_ids.contains(&id) {
                            category_ids.push(id);
                        }
                    }
                }
                "q" => search = Some(value.trim().to_string()).filter(|q| !q.is_empty()),
                "select" => {
                    let fields: BTreeSet<String> = value
                        .split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect();
                    select = Some(fields).filter(|f| !f.is_empty());
                }
                _ => {}
            }
        }

        Ok(Self {
            page: PageParams::from_raw(limit, skip),
            filter: ProductFilter {
                category_ids,
                search,
            },
            select,
        })
    }
}

/// Keep only the selected keys (and `id`) of a serialized product
pub fn project(view: &ProductView, select: Option<&BTreeSet<String>>) -> AppResult<Value> {
    let value = serde_json::to_value(view)
        .map_err(|e| AppError::internal(format!("Failed to serialize product: {e}")))?;
    let Some(fields) = select else {
        return Ok(value);
    };
    let Value::Object(object) = value else {
        return Ok(value);
    };
    let projected: Map<String, Value> = object
        .into_iter()
        .filter(|(key, _)| key == "id" || fields.contains(key))
        .collect();
    Ok(Value::Object(projected))
}

#[derive(Clone)]
pub struct ListingService {
    products: Arc<dyn ProductStore>,
    aggregation: AggregationService,
}

impl ListingService {
    pub fn new(products: Arc<dyn ProductStore>, aggregation: AggregationService) -> Self {
        Self {
            products,
            aggregation,
        }
    }

    /// Categories ranked by product count, sliced to the requested page
    pub async fn list_categories(&self, page: PageParams) -> AppResult<CategoryPage> {
        let ranked = self.aggregation.ranked_categories().await?;
        let total = ranked.len() as u64;
        let window = page.window(ranked.len());
        let categories = ranked[window].to_vec();

        tracing::debug!(total, skip = page.skip, limit = page.limit, "Listed categories");
        Ok(CategoryPage {
            categories,
            total,
            skip: page.skip,
            limit: page.limit,
        })
    }

    /// Products in id order with category names resolved
    pub async fn list_products(&self, query: &ProductQuery) -> AppResult<ProductPage<Value>> {
        let total = self.products.count(&query.filter).await?;
        let products = self.products.find_many(&query.filter, query.page).await?;
        let names = self.aggregation.names().await?;

        let products = products
            .into_iter()
            .map(|p| project(&names.view(p), query.select.as_ref()))
            .collect::<AppResult<Vec<_>>>()?;

        tracing::debug!(
            total,
            returned = products.len(),
            skip = query.page.skip,
            limit = query.page.limit,
            "Listed products"
        );
        Ok(ProductPage {
            products,
            total,
            skip: query.page.skip,
            limit: query.page.limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use shared::models::{Category, Product};

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn product(id: i64, category_id: Option<i64>) -> Product {
        Product {
            id,
            title: format!("Product {id}"),
            thumbnail: format!("https://cdn.example/{id}.png"),
            brand: if id % 2 == 0 { "Apple".into() } else { "Samsung".into() },
            category_id,
            price: id as f64,
            discount_percentage: None,
            rating: 0.0,
            stock: 1,
        }
    }

    fn listing(store: &MemoryStore) -> ListingService {
        let store = Arc::new(store.clone());
        ListingService::new(store.clone(), AggregationService::new(store.clone(), store))
    }

    #[test]
    fn category_ids_repeat_and_split() {
        let query = ProductQuery::from_pairs(&pairs(&[
            ("categoryId", "1,2"),
            ("categoryId", "3"),
            ("categoryId", "2"),
        ]))
        .unwrap();
        assert_eq!(query.filter.category_ids, vec![1, 2, 3]);
    }

    #[test]
    fn non_numeric_category_id_is_rejected() {
        let err = ProductQuery::from_pairs(&pairs(&[("categoryId", "abc")])).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
    }

    #[test]
    fn page_params_are_clamped() {
        let query = ProductQuery::from_pairs(&pairs(&[("limit", "1000"), ("skip", "-3")])).unwrap();
        assert_eq!(query.page, PageParams { limit: 100, skip: 0 });
        let query = ProductQuery::from_pairs(&pairs(&[("limit", "x")])).unwrap();
        assert_eq!(query.page.limit, 10);
    }

    #[test]
    fn projection_keeps_id() {
        let view = ProductView::new(product(4, Some(1)), "beauty");
        let fields: BTreeSet<String> = ["title".to_string(), "nope".to_string()].into();
        let value = project(&view, Some(&fields)).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(object["id"], 4);
        assert_eq!(object["title"], "Product 4");
    }

    #[tokio::test]
    async fn consecutive_pages_cover_everything_once() {
        let store = MemoryStore::seeded(vec![], (1..=15).map(|i| product(i, None)).collect());
        let svc = listing(&store);

        let mut seen = Vec::new();
        for skip in ["0", "10"] {
            let query = ProductQuery::from_pairs(&pairs(&[("limit", "10"), ("skip", skip)])).unwrap();
            let page = svc.list_products(&query).await.unwrap();
            assert_eq!(page.total, 15);
            seen.extend(page.products.iter().map(|p| p["id"].as_i64().unwrap()));
        }
        assert_eq!(seen, (1..=15).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn skip_past_total_is_empty() {
        let store = MemoryStore::seeded(vec![], (1..=3).map(|i| product(i, None)).collect());
        let query = ProductQuery::from_pairs(&pairs(&[("skip", "50")])).unwrap();
        let page = listing(&store).list_products(&query).await.unwrap();
        assert!(page.products.is_empty());
        assert_eq!(page.total, 3);
        assert_eq!(page.skip, 50);
    }

    #[tokio::test]
    async fn search_and_category_filters_combine() {
        let store = MemoryStore::seeded(
            vec![Category {
                id: 1,
                name: "smartphones".into(),
            }],
            (1..=6).map(|i| product(i, if i <= 3 { Some(1) } else { None })).collect(),
        );
        let query =
            ProductQuery::from_pairs(&pairs(&[("categoryId", "1"), ("q", " apple ")])).unwrap();
        let page = listing(&store).list_products(&query).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.products[0]["id"], 2);
        assert_eq!(page.products[0]["category"], "smartphones");
    }

    #[tokio::test]
    async fn categories_are_ranked_and_paged() {
        let store = MemoryStore::seeded(
            vec![
                Category { id: 1, name: "a".into() },
                Category { id: 2, name: "b".into() },
                Category { id: 3, name: "c".into() },
            ],
            vec![product(1, Some(3)), product(2, Some(3)), product(3, Some(2))],
        );
        let page = listing(&store)
            .list_categories(PageParams::new(Some(2), Some(0)))
            .await
            .unwrap();
        assert_eq!(page.total, 3);
        let ids: Vec<i64> = page.categories.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 2]);
        assert_eq!(page.categories[0].items, 2);
    }
}

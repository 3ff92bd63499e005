//! Product Repository

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::models::{Product, ProductUpdate};
use shared::request::PageParams;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, ID_MARK_TABLE, ProductFilter, ProductStore, RepoResult};

const TABLE: &str = "product";

const PROJECTION: &str = "record::id(id) AS id, title, thumbnail, brand, category_id, \
                          price, discount_percentage, rating, stock";

/// Stored shape of a product (record id kept in the key, not the body)
#[derive(Debug, Serialize)]
struct ProductContent {
    title: String,
    thumbnail: String,
    brand: String,
    category_id: Option<i64>,
    price: f64,
    discount_percentage: Option<f64>,
    rating: f64,
    stock: i64,
}

impl From<&Product> for ProductContent {
    fn from(p: &Product) -> Self {
        Self {
            title: p.title.clone(),
            thumbnail: p.thumbnail.clone(),
            brand: p.brand.clone(),
            category_id: p.category_id,
            price: p.price,
            discount_percentage: p.discount_percentage,
            rating: p.rating,
            stock: p.stock,
        }
    }
}

/// Row returned by [`PROJECTION`]
#[derive(Debug, Deserialize)]
struct ProductRow {
    id: i64,
    title: String,
    #[serde(default)]
    thumbnail: Option<String>,
    #[serde(default)]
    brand: Option<String>,
    #[serde(default)]
    category_id: Option<i64>,
    price: f64,
    #[serde(default)]
    discount_percentage: Option<f64>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    stock: Option<i64>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            thumbnail: row.thumbnail.unwrap_or_default(),
            brand: row.brand.unwrap_or_default(),
            category_id: row.category_id,
            price: row.price,
            discount_percentage: row.discount_percentage,
            rating: row.rating.unwrap_or_default(),
            stock: row.stock.unwrap_or_default(),
        }
    }
}

#[derive(Deserialize)]
struct CountRow {
    count: i64,
}

#[derive(Deserialize)]
struct GroupRow {
    #[serde(default)]
    category_id: Option<i64>,
    count: i64,
}

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn thing(id: i64) -> RecordId {
        RecordId::from_table_key(TABLE, id)
    }

    fn where_clause(filter: &ProductFilter) -> String {
        let mut conditions = Vec::new();
        if !filter.category_ids.is_empty() {
            conditions.push("category_id IN $category_ids");
        }
        if filter.search_term().is_some() {
            conditions.push(
                "(string::contains(string::lowercase(title), $q) \
                 OR string::contains(string::lowercase(brand ?? ''), $q))",
            );
        }
        if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        }
    }

    /// 所有匹配的商品 (按 id 升序)
    ///
    /// Ordering and paging are done here rather than in SurrealQL: the
    /// embedded engine can drop rows when WHERE, ORDER BY and LIMIT combine.
    async fn find_matching(&self, filter: &ProductFilter) -> RepoResult<Vec<Product>> {
        let sql = format!("SELECT {PROJECTION} FROM product{}", Self::where_clause(filter));
        let rows: Vec<ProductRow> = self
            .base
            .db()
            .query(sql)
            .bind(("category_ids", filter.category_ids.clone()))
            .bind(("q", filter.search_term().unwrap_or_default()))
            .await?
            .take(0)?;
        let mut products: Vec<Product> = rows.into_iter().map(Product::from).collect();
        products.sort_by_key(|p| p.id);
        Ok(products)
    }
}

#[async_trait]
impl ProductStore for ProductRepository {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Product>> {
        let mut result = self
            .base
            .db()
            .query(format!("SELECT {PROJECTION} FROM $rid"))
            .bind(("rid", Self::thing(id)))
            .await?;
        let rows: Vec<ProductRow> = result.take(0)?;
        Ok(rows.into_iter().next().map(Product::from))
    }

    async fn find_many(
        &self,
        filter: &ProductFilter,
        page: PageParams,
    ) -> RepoResult<Vec<Product>> {
        let mut products = self.find_matching(filter).await?;
        let window = page.window(products.len());
        products.truncate(window.end);
        Ok(products.split_off(window.start))
    }

    async fn count(&self, filter: &ProductFilter) -> RepoResult<u64> {
        let sql = format!(
            "SELECT count() AS count FROM product{} GROUP ALL",
            Self::where_clause(filter)
        );
        let rows: Vec<CountRow> = self
            .base
            .db()
            .query(sql)
            .bind(("category_ids", filter.category_ids.clone()))
            .bind(("q", filter.search_term().unwrap_or_default()))
            .await?
            .take(0)?;
        Ok(rows.first().map(|r| r.count.max(0) as u64).unwrap_or(0))
    }

    async fn insert(&self, product: Product) -> RepoResult<Product> {
        self.base
            .db()
            .query(
                "BEGIN TRANSACTION;
                 CREATE $rid CONTENT $data;
                 UPSERT $mark SET last = math::max([last ?? 0, $id]);
                 COMMIT TRANSACTION;",
            )
            .bind(("rid", Self::thing(product.id)))
            .bind(("data", ProductContent::from(&product)))
            .bind(("mark", RecordId::from_table_key(ID_MARK_TABLE, TABLE)))
            .bind(("id", product.id))
            .await?
            .check()?;
        Ok(product)
    }

    async fn update_one(&self, id: i64, patch: &ProductUpdate) -> RepoResult<Option<Product>> {
        let Some(mut product) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        patch.apply_to(&mut product);
        self.base
            .db()
            .query("UPDATE $rid CONTENT $data")
            .bind(("rid", Self::thing(id)))
            .bind(("data", ProductContent::from(&product)))
            .await?
            .check()?;
        Ok(Some(product))
    }

    async fn delete_one(&self, id: i64) -> RepoResult<Option<Product>> {
        let Some(product) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        self.base
            .db()
            .query("DELETE $rid")
            .bind(("rid", Self::thing(id)))
            .await?
            .check()?;
        Ok(Some(product))
    }

    async fn aggregate_count(&self) -> RepoResult<HashMap<i64, u64>> {
        let rows: Vec<GroupRow> = self
            .base
            .db()
            .query("SELECT category_id, count() AS count FROM product GROUP BY category_id")
            .await?
            .take(0)?;
        Ok(rows
            .into_iter()
            .filter_map(|r| r.category_id.map(|id| (id, r.count.max(0) as u64)))
            .collect())
    }

    async fn high_water_mark(&self) -> RepoResult<i64> {
        let mut result = self
            .base
            .db()
            .query("SELECT VALUE last FROM $mark; SELECT VALUE record::id(id) FROM product;")
            .bind(("mark", RecordId::from_table_key(ID_MARK_TABLE, TABLE)))
            .await?;
        let marks: Vec<i64> = result.take(0)?;
        let ids: Vec<i64> = result.take(1)?;
        Ok(marks.into_iter().chain(ids).max().unwrap_or(0).max(0))
    }
}

//! Category Repository

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::models::Category;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, CategoryStore, ID_MARK_TABLE, RepoResult};

const TABLE: &str = "category";

#[derive(Serialize)]
struct CategoryContent {
    name: String,
}

#[derive(Deserialize)]
struct CountRow {
    count: i64,
}

#[derive(Clone)]
pub struct CategoryRepository {
    base: BaseRepository,
}

impl CategoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn thing(id: i64) -> RecordId {
        RecordId::from_table_key(TABLE, id)
    }

    async fn count_products_in(&self, id: i64) -> RepoResult<u64> {
        let rows: Vec<CountRow> = self
            .base
            .db()
            .query("SELECT count() AS count FROM product WHERE category_id = $id GROUP ALL")
            .bind(("id", id))
            .await?
            .take(0)?;
        Ok(rows.first().map(|r| r.count.max(0) as u64).unwrap_or(0))
    }
}

#[async_trait]
impl CategoryStore for CategoryRepository {
    async fn find_all(&self) -> RepoResult<Vec<Category>> {
        let mut categories: Vec<Category> = self
            .base
            .db()
            .query("SELECT record::id(id) AS id, name FROM category")
            .await?
            .take(0)?;
        categories.sort_by_key(|c| c.id);
        Ok(categories)
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Category>> {
        let mut result = self
            .base
            .db()
            .query("SELECT record::id(id) AS id, name FROM $rid")
            .bind(("rid", Self::thing(id)))
            .await?;
        let categories: Vec<Category> = result.take(0)?;
        Ok(categories.into_iter().next())
    }

    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Category>> {
        let name_owned = name.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT record::id(id) AS id, name FROM category WHERE name = $name")
            .bind(("name", name_owned))
            .await?;
        let categories: Vec<Category> = result.take(0)?;
        Ok(categories.into_iter().next())
    }

    async fn insert(&self, category: Category) -> RepoResult<Category> {
        self.base
            .db()
            .query(
                "BEGIN TRANSACTION;
                 CREATE $rid CONTENT $data;
                 UPSERT $mark SET last = math::max([last ?? 0, $id]);
                 COMMIT TRANSACTION;",
            )
            .bind(("rid", Self::thing(category.id)))
            .bind((
                "data",
                CategoryContent {
                    name: category.name.clone(),
                },
            ))
            .bind(("mark", RecordId::from_table_key(ID_MARK_TABLE, TABLE)))
            .bind(("id", category.id))
            .await?
            .check()?;
        Ok(category)
    }

    async fn update_one(&self, id: i64, name: &str) -> RepoResult<Option<Category>> {
        if self.find_by_id(id).await?.is_none() {
            return Ok(None);
        }
        self.base
            .db()
            .query("UPDATE $rid SET name = $name")
            .bind(("rid", Self::thing(id)))
            .bind(("name", name.to_string()))
            .await?
            .check()?;
        self.find_by_id(id).await
    }

    async fn delete_one(
        &self,
        id: i64,
        transfer_to: Option<i64>,
    ) -> RepoResult<Option<(Category, u64)>> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        let moved = self.count_products_in(id).await?;

        // 重新指派与删除在同一事务中完成
        self.base
            .db()
            .query(
                "BEGIN TRANSACTION;
                 UPDATE product SET category_id = $target WHERE category_id = $id;
                 DELETE $rid;
                 COMMIT TRANSACTION;",
            )
            .bind(("target", transfer_to))
            .bind(("id", id))
            .bind(("rid", Self::thing(id)))
            .await?
            .check()?;

        tracing::debug!(category_id = id, ?transfer_to, moved, "Category deleted");
        Ok(Some((existing, moved)))
    }

    async fn high_water_mark(&self) -> RepoResult<i64> {
        let mut result = self
            .base
            .db()
            .query("SELECT VALUE last FROM $mark; SELECT VALUE record::id(id) FROM category;")
            .bind(("mark", RecordId::from_table_key(ID_MARK_TABLE, TABLE)))
            .await?;
        let marks: Vec<i64> = result.take(0)?;
        let ids: Vec<i64> = result.take(1)?;
        Ok(marks.into_iter().chain(ids).max().unwrap_or(0).max(0))
    }
}

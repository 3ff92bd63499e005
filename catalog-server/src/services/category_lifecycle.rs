//! 分类生命周期 - create / rename / delete with product reassignment

use std::sync::Arc;

use shared::models::{Category, CategoryCreate, CategoryDelete, CategoryUpdate, CategoryWithCount};
use shared::response::DeletedCategory;
use shared::util::slugify;
use shared::{AppError, AppResult, ErrorCode};

use super::WriteGate;
use super::aggregation::AggregationService;
use super::identity::IdGenerator;
use crate::db::repository::CategoryStore;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};

#[derive(Clone)]
pub struct CategoryLifecycle {
    categories: Arc<dyn CategoryStore>,
    aggregation: AggregationService,
    ids: IdGenerator,
    gate: WriteGate,
}

impl CategoryLifecycle {
    pub fn new(
        categories: Arc<dyn CategoryStore>,
        aggregation: AggregationService,
        ids: IdGenerator,
        gate: WriteGate,
    ) -> Self {
        Self {
            categories,
            aggregation,
            ids,
            gate,
        }
    }

    /// Validate a requested name and return its slug
    fn normalize(name: &str) -> AppResult<String> {
        validate_required_text(name, "Category name", MAX_NAME_LEN)?;
        let slug = slugify(name);
        if slug.is_empty() {
            return Err(AppError::validation("Category name must not be empty"));
        }
        Ok(slug)
    }

    /// Reject the name if its slug or its trimmed raw form belongs to another category
    async fn ensure_unique(&self, raw: &str, slug: &str, except: Option<i64>) -> AppResult<()> {
        let trimmed = raw.trim();
        let candidates = if trimmed == slug {
            vec![slug]
        } else {
            vec![slug, trimmed]
        };
        for candidate in candidates {
            if let Some(existing) = self.categories.find_by_name(candidate).await?
                && Some(existing.id) != except
            {
                return Err(AppError::with_message(
                    ErrorCode::CategoryNameExists,
                    format!("Category '{}' already exists", existing.name),
                ));
            }
        }
        Ok(())
    }

    pub async fn create(&self, payload: CategoryCreate) -> AppResult<CategoryWithCount> {
        let slug = Self::normalize(&payload.name)?;

        let _guard = self.gate.lock().await;
        self.ensure_unique(&payload.name, &slug, None).await?;

        let id = self
            .ids
            .next_id(|| self.categories.high_water_mark())
            .await?;
        let created = self.categories.insert(Category { id, name: slug }).await?;

        tracing::info!(category_id = created.id, name = %created.name, "Category created");
        Ok(CategoryWithCount::new(created, 0))
    }

    pub async fn update(&self, id: i64, payload: CategoryUpdate) -> AppResult<CategoryWithCount> {
        let slug = Self::normalize(&payload.name)?;

        let _guard = self.gate.lock().await;
        if self.categories.find_by_id(id).await?.is_none() {
            return Err(AppError::with_message(
                ErrorCode::CategoryNotFound,
                "Category not found",
            ));
        }
        self.ensure_unique(&payload.name, &slug, Some(id)).await?;

        let updated = self
            .categories
            .update_one(id, &slug)
            .await?
            .ok_or_else(|| AppError::with_message(ErrorCode::CategoryNotFound, "Category not found"))?;
        let items = self.aggregation.count_for(id).await?;

        tracing::info!(category_id = id, name = %updated.name, "Category renamed");
        Ok(CategoryWithCount::new(updated, items))
    }

    /// Delete a category, moving its products to the transfer target or
    /// leaving them without a category.
    pub async fn delete(&self, id: i64, options: CategoryDelete) -> AppResult<DeletedCategory> {
        let _guard = self.gate.lock().await;
        if self.categories.find_by_id(id).await?.is_none() {
            return Err(AppError::with_message(
                ErrorCode::CategoryNotFound,
                "Category not found",
            ));
        }

        if let Some(target) = options.transfer_to_category_id {
            if target == id {
                return Err(AppError::with_message(
                    ErrorCode::CategoryTransferInvalid,
                    "Cannot transfer products to the category being deleted",
                ));
            }
            if self.categories.find_by_id(target).await?.is_none() {
                return Err(AppError::with_message(
                    ErrorCode::CategoryTransferInvalid,
                    "Transfer target category not found",
                ));
            }
        }

        let (deleted, moved) = self
            .categories
            .delete_one(id, options.transfer_to_category_id)
            .await?
            .ok_or_else(|| AppError::with_message(ErrorCode::CategoryNotFound, "Category not found"))?;

        tracing::info!(
            category_id = id,
            transfer_to = ?options.transfer_to_category_id,
            moved,
            "Category deleted"
        );
        Ok(DeletedCategory::from(deleted))
    }
}

//! Product CRUD

use std::sync::Arc;

use chrono::Utc;
use shared::models::{Product, ProductCreate, ProductUpdate, ProductView};
use shared::response::DeletedProduct;
use shared::{AppError, AppResult, ErrorCode};

use super::WriteGate;
use super::aggregation::AggregationService;
use super::identity::IdGenerator;
use crate::db::repository::{CategoryStore, ProductStore};
use crate::utils::validation::{MAX_NAME_LEN, MAX_URL_LEN, validate_optional_text, validate_required_text};

fn not_found() -> AppError {
    AppError::with_message(ErrorCode::ProductNotFound, "Product not found")
}

fn validate_price(price: f64) -> AppResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::with_message(
            ErrorCode::ProductInvalidPrice,
            "price must be a non-negative number",
        ));
    }
    Ok(())
}

fn validate_discount(discount: Option<f64>) -> AppResult<()> {
    match discount {
        Some(d) if !d.is_finite() || !(0.0..=100.0).contains(&d) => Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            "discountPercentage must be between 0 and 100",
        )),
        _ => Ok(()),
    }
}

fn validate_rating(rating: Option<f64>) -> AppResult<()> {
    match rating {
        Some(r) if !r.is_finite() || r < 0.0 => Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            "rating must be a non-negative number",
        )),
        _ => Ok(()),
    }
}

fn validate_stock(stock: Option<i64>) -> AppResult<()> {
    match stock {
        Some(s) if s < 0 => Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            "stock must not be negative",
        )),
        _ => Ok(()),
    }
}

#[derive(Clone)]
pub struct ProductService {
    products: Arc<dyn ProductStore>,
    categories: Arc<dyn CategoryStore>,
    aggregation: AggregationService,
    ids: IdGenerator,
    gate: WriteGate,
}

impl ProductService {
    pub fn new(
        products: Arc<dyn ProductStore>,
        categories: Arc<dyn CategoryStore>,
        aggregation: AggregationService,
        ids: IdGenerator,
        gate: WriteGate,
    ) -> Self {
        Self {
            products,
            categories,
            aggregation,
            ids,
            gate,
        }
    }

    async fn ensure_category(&self, category_id: Option<i64>) -> AppResult<()> {
        if let Some(id) = category_id
            && self.categories.find_by_id(id).await?.is_none()
        {
            return Err(AppError::with_message(
                ErrorCode::ProductCategoryInvalid,
                format!("Category {id} does not exist"),
            ));
        }
        Ok(())
    }

    pub async fn get(&self, id: i64) -> AppResult<ProductView> {
        let product = self.products.find_by_id(id).await?.ok_or_else(not_found)?;
        self.aggregation.view(product).await
    }

    pub async fn create(&self, payload: ProductCreate) -> AppResult<ProductView> {
        validate_required_text(&payload.title, "title", MAX_NAME_LEN)?;
        validate_optional_text(&payload.brand, "brand", MAX_NAME_LEN)?;
        validate_optional_text(&payload.thumbnail, "thumbnail", MAX_URL_LEN)?;
        let price = payload
            .price
            .ok_or_else(|| AppError::with_message(ErrorCode::RequiredField, "price is required"))?;
        validate_price(price)?;
        validate_discount(payload.discount_percentage)?;
        validate_rating(payload.rating)?;
        validate_stock(payload.stock)?;

        let _guard = self.gate.lock().await;
        self.ensure_category(payload.category_id).await?;

        let id = self
            .ids
            .next_id(|| self.products.high_water_mark())
            .await?;
        let product = Product {
            id,
            title: payload.title.trim().to_string(),
            thumbnail: payload.thumbnail.unwrap_or_default(),
            brand: payload.brand.unwrap_or_default(),
            category_id: payload.category_id,
            price,
            discount_percentage: payload.discount_percentage,
            rating: payload.rating.unwrap_or_default(),
            stock: payload.stock.unwrap_or_default(),
        };
        let created = self.products.insert(product).await?;

        tracing::info!(product_id = created.id, title = %created.title, "Product created");
        self.aggregation.view(created).await
    }

    pub async fn update(&self, id: i64, mut patch: ProductUpdate) -> AppResult<ProductView> {
        if let Some(title) = &patch.title {
            validate_required_text(title, "title", MAX_NAME_LEN)?;
            patch.title = Some(title.trim().to_string());
        }
        validate_optional_text(&patch.brand, "brand", MAX_NAME_LEN)?;
        validate_optional_text(&patch.thumbnail, "thumbnail", MAX_URL_LEN)?;
        if let Some(price) = patch.price {
            validate_price(price)?;
        }
        validate_discount(patch.discount_percentage.flatten())?;
        validate_rating(patch.rating)?;
        validate_stock(patch.stock)?;

        let _guard = self.gate.lock().await;
        if self.products.find_by_id(id).await?.is_none() {
            return Err(not_found());
        }
        if let Some(category_id) = patch.category_id {
            self.ensure_category(category_id).await?;
        }

        let updated = self
            .products
            .update_one(id, &patch)
            .await?
            .ok_or_else(not_found)?;

        tracing::info!(product_id = id, "Product updated");
        self.aggregation.view(updated).await
    }

    /// Hard delete, reporting the removed product with its deletion time
    pub async fn delete(&self, id: i64) -> AppResult<DeletedProduct> {
        let _guard = self.gate.lock().await;
        let deleted = self.products.delete_one(id).await?.ok_or_else(not_found)?;
        let view = self.aggregation.view(deleted).await?;

        tracing::info!(product_id = id, "Product deleted");
        Ok(DeletedProduct::new(view, Utc::now()))
    }
}

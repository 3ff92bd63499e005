//! HTTP client for network-based API calls

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::ErrorBody;
use shared::models::{CategoryCreate, CategoryUpdate, CategoryWithCount, ProductCreate, ProductUpdate, ProductView};
use shared::request::PageParams;
use shared::response::{CategoryPage, DeletedCategory, DeletedProduct, ProductPage};

use crate::{ClientConfig, ClientError, ClientResult};

/// `GET /products` parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductListQuery {
    pub page: PageParams,
    pub category_ids: Vec<i64>,
    pub search: Option<String>,
}

impl ProductListQuery {
    pub fn new(page: PageParams) -> Self {
        Self {
            page,
            ..Default::default()
        }
    }

    pub fn with_categories(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.category_ids = ids.into_iter().collect();
        self
    }

    pub fn with_search(mut self, q: impl Into<String>) -> Self {
        self.search = Some(q.into());
        self
    }

    /// Query pairs; `categoryId` repeats once per id
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("limit", self.page.limit.to_string()),
            ("skip", self.page.skip.to_string()),
        ];
        pairs.extend(self.category_ids.iter().map(|id| ("categoryId", id.to_string())));
        if let Some(q) = self.search.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            pairs.push(("q", q.to_string()));
        }
        pairs
    }
}

/// HTTP client for the catalog API
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: String,
}

impl CatalogClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/{}", self.base_url, path.trim_start_matches('/')))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    async fn send_json<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send(self.request(method, path).json(body)).await
    }

    /// Handle the HTTP response
    ///
    /// Error statuses become [`ClientError::Api`] carrying the server's
    /// `error` string verbatim.
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|body| body.error)
                .unwrap_or(text);
            tracing::debug!(status = status.as_u16(), %message, "Catalog API error");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    // ========== Categories ==========

    pub async fn list_categories(&self, page: PageParams) -> ClientResult<CategoryPage> {
        let request = self
            .request(Method::GET, "categories")
            .query(&[("limit", page.limit), ("skip", page.skip)]);
        self.send(request).await
    }

    pub async fn create_category(&self, name: &str) -> ClientResult<CategoryWithCount> {
        let body = CategoryCreate {
            name: name.to_string(),
        };
        self.send_json(Method::POST, "categories", &body).await
    }

    pub async fn update_category(&self, id: i64, name: &str) -> ClientResult<CategoryWithCount> {
        let body = CategoryUpdate {
            name: name.to_string(),
        };
        self.send_json(Method::PUT, &format!("categories/{id}"), &body)
            .await
    }

    /// Delete a category, optionally moving its products to `transfer_to`
    pub async fn delete_category(
        &self,
        id: i64,
        transfer_to: Option<i64>,
    ) -> ClientResult<DeletedCategory> {
        let mut request = self.request(Method::DELETE, &format!("categories/{id}"));
        if let Some(target) = transfer_to {
            request = request.query(&[("transferToCategoryId", target)]);
        }
        self.send(request).await
    }

    // ========== Products ==========

    pub async fn list_products(&self, query: &ProductListQuery) -> ClientResult<ProductPage> {
        let request = self
            .request(Method::GET, "products")
            .query(&query.to_pairs());
        self.send(request).await
    }

    pub async fn get_product(&self, id: i64) -> ClientResult<ProductView> {
        self.send(self.request(Method::GET, &format!("products/{id}")))
            .await
    }

    pub async fn create_product(&self, payload: &ProductCreate) -> ClientResult<ProductView> {
        self.send_json(Method::POST, "products", payload).await
    }

    pub async fn update_product(&self, id: i64, patch: &ProductUpdate) -> ClientResult<ProductView> {
        self.send_json(Method::PUT, &format!("products/{id}"), patch)
            .await
    }

    pub async fn delete_product(&self, id: i64) -> ClientResult<DeletedProduct> {
        self.send(self.request(Method::DELETE, &format!("products/{id}")))
            .await
    }
}

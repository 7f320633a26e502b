use crate::domain::catalog::{Category, Product, ProductImage};
use crate::error::{AppError, AppResult};
use crate::infrastructure::api::{ApiClient, FetchOptions, RequestOptions};
use crate::infrastructure::http::FormPart;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;

/// Spreadsheet of products plus an optional zip of their images
#[derive(Debug, Clone)]
pub struct BulkUpload {
    pub excel_name: String,
    pub excel: Vec<u8>,
    pub images_zip: Option<(String, Vec<u8>)>,
}

impl BulkUpload {
    /// Read the spreadsheet (and zip) from disk
    pub async fn from_files(excel: &Path, images_zip: Option<&Path>) -> AppResult<Self> {
        let images_zip = match images_zip {
            Some(path) => Some((file_name(path), tokio::fs::read(path).await?)),
            None => None,
        };

        Ok(Self {
            excel_name: file_name(excel),
            excel: tokio::fs::read(excel).await?,
            images_zip,
        })
    }

    fn into_parts(self) -> Vec<FormPart> {
        let mut parts = vec![FormPart::file("excel_file", self.excel_name, self.excel)];
        if let Some((name, data)) = self.images_zip {
            parts.push(FormPart::file("images_zip", name, data));
        }
        parts
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkUploadReport {
    pub message: String,
    #[serde(default)]
    pub created_products: Vec<String>,
    #[serde(default)]
    pub skipped: Vec<Value>,
    #[serde(default)]
    pub images_uploaded: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkDeleteReport {
    pub message: String,
    #[serde(default)]
    pub deleted_ids: Vec<i64>,
    #[serde(default)]
    pub missing_ids: Vec<i64>,
}

/// A downloaded export file
#[derive(Debug, Clone)]
pub struct Download {
    pub data: Vec<u8>,
}

impl Download {
    pub async fn save(&self, path: &Path) -> AppResult<()> {
        tokio::fs::write(path, &self.data).await?;
        Ok(())
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string())
}

/// Product, product image and category management
pub struct ProductAdminService {
    client: Arc<ApiClient>,
}

impl ProductAdminService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> AppResult<Vec<Product>> {
        self.client
            .fetch_json("/products/", RequestOptions::get(), FetchOptions::none())
            .await
    }

    pub async fn create<T: Serialize + ?Sized>(&self, product: &T) -> AppResult<Product> {
        self.client
            .fetch_json("/products/", RequestOptions::post_json(product)?, FetchOptions::none())
            .await
    }

    pub async fn update<T: Serialize + ?Sized>(&self, id: i64, product: &T) -> AppResult<Product> {
        self.client
            .fetch_json(
                &format!("/products/{}/", id),
                RequestOptions::put_json(product)?,
                FetchOptions::none(),
            )
            .await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.client
            .fetch(&format!("/products/{}/", id), RequestOptions::delete(), FetchOptions::none())
            .await?;
        Ok(())
    }

    /// Returns the new trending flag
    pub async fn toggle_trending(&self, id: i64) -> AppResult<bool> {
        let response = self
            .client
            .fetch(
                &format!("/products/{}/toggle_trending/", id),
                RequestOptions::post(),
                FetchOptions::none(),
            )
            .await?;

        response
            .get("trending")
            .and_then(Value::as_bool)
            .ok_or_else(|| AppError::Internal("toggle_trending response without flag".to_string()))
    }

    pub async fn bulk_upload(&self, upload: BulkUpload) -> AppResult<BulkUploadReport> {
        let options = RequestOptions::multipart(Method::POST, upload.into_parts());
        let report: BulkUploadReport = self.multipart("/products/bulk-upload/", options).await?;

        tracing::info!(
            created = report.created_products.len(),
            skipped = report.skipped.len(),
            "Bulk upload finished"
        );
        Ok(report)
    }

    pub async fn bulk_delete(&self, ids: &[i64]) -> AppResult<BulkDeleteReport> {
        self.client
            .fetch_json(
                "/products/bulk-delete/",
                RequestOptions::post_json(&json!({ "ids": ids }))?,
                FetchOptions::none(),
            )
            .await
    }

    /// Superuser only
    pub async fn delete_all(&self) -> AppResult<String> {
        let response = self
            .client
            .fetch("/products/delete-all/", RequestOptions::delete(), FetchOptions::none())
            .await?;

        Ok(response
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string())
    }

    pub async fn download_csv(&self) -> AppResult<Download> {
        self.download("/products/download-csv/").await
    }

    pub async fn download_sample_excel(&self) -> AppResult<Download> {
        self.download("/products/download-sample-excel/").await
    }

    pub async fn upload_image(
        &self,
        product_id: i64,
        file_name: &str,
        data: Vec<u8>,
    ) -> AppResult<ProductImage> {
        let parts = vec![
            FormPart::text("product", product_id.to_string()),
            FormPart::file("image", file_name, data),
        ];
        self.multipart("/product-images/", RequestOptions::multipart(Method::POST, parts))
            .await
    }

    pub async fn delete_image(&self, image_id: i64) -> AppResult<()> {
        self.client
            .fetch(
                &format!("/product-images/{}/", image_id),
                RequestOptions::delete(),
                FetchOptions::none(),
            )
            .await?;
        Ok(())
    }

    pub async fn categories(&self) -> AppResult<Vec<Category>> {
        self.client
            .fetch_json("/categories/", RequestOptions::get(), FetchOptions::none())
            .await
    }

    pub async fn create_category<T: Serialize + ?Sized>(&self, category: &T) -> AppResult<Category> {
        self.client
            .fetch_json("/categories/", RequestOptions::post_json(category)?, FetchOptions::none())
            .await
    }

    pub async fn update_category<T: Serialize + ?Sized>(
        &self,
        id: i64,
        category: &T,
    ) -> AppResult<Category> {
        self.client
            .fetch_json(
                &format!("/categories/{}/", id),
                RequestOptions::put_json(category)?,
                FetchOptions::none(),
            )
            .await
    }

    pub async fn delete_category(&self, id: i64) -> AppResult<()> {
        self.client
            .fetch(&format!("/categories/{}/", id), RequestOptions::delete(), FetchOptions::none())
            .await?;
        Ok(())
    }

    pub async fn upload_category_image(
        &self,
        id: i64,
        file_name: &str,
        data: Vec<u8>,
    ) -> AppResult<Category> {
        let parts = vec![FormPart::file("image", file_name, data)];
        self.multipart(
            &format!("/categories/{}/", id),
            RequestOptions::multipart(Method::PATCH, parts),
        )
        .await
    }

    pub async fn delete_category_image(&self, id: i64) -> AppResult<()> {
        self.client
            .fetch(
                &format!("/categories/{}/delete-image/", id),
                RequestOptions::delete(),
                FetchOptions::none(),
            )
            .await?;
        Ok(())
    }

    async fn multipart<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> AppResult<T> {
        let response = self.client.fetch_raw(endpoint, options).await?;
        response.json()
    }

    async fn download(&self, endpoint: &str) -> AppResult<Download> {
        let response = self.client.fetch_raw(endpoint, RequestOptions::get()).await?;
        tracing::debug!(endpoint, bytes = response.body.len(), "Downloaded export");
        Ok(Download {
            data: response.body,
        })
    }
}

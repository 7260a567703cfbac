//! Category endpoints of [`AdminClient`].

use catload_core::{Category, CategoryRecord};

use crate::error::ClientError;

use super::AdminClient;

impl AdminClient {
    /// Lists existing categories via `GET /api/categories`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure or timeout.
    /// - [`ClientError::UnexpectedStatus`] for any status other than 200/201.
    /// - [`ClientError::Deserialize`] if the body is not a category array.
    pub async fn list_categories(&self) -> Result<Vec<Category>, ClientError> {
        let (url, response) = self.get("api/categories").await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
            context: format!("GET {url}"),
            source: e,
        })
    }

    /// Creates a category via `POST /api/admin/categories` and returns it as
    /// stored by the server.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure or timeout.
    /// - [`ClientError::UnexpectedStatus`] for any status other than 200/201.
    /// - [`ClientError::Deserialize`] if the response lacks the created
    ///   category's `id`, `name` or `slug`.
    pub async fn create_category(&self, record: &CategoryRecord) -> Result<Category, ClientError> {
        let (url, response) = self.post_json("api/admin/categories", record).await?;
        let body = response.text().await?;
        let created: Category =
            serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
                context: format!("POST {url} (category '{}')", record.slug),
                source: e,
            })?;
        tracing::debug!(slug = %created.slug, id = %created.id, "created category");
        Ok(created)
    }
}

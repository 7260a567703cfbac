//! Product endpoint of [`AdminClient`].

use catload_core::ProductRecord;

use crate::error::ClientError;

use super::AdminClient;

impl AdminClient {
    /// Creates a product via `POST /api/admin/products`.
    ///
    /// The response body is returned as loose JSON; an empty or non-JSON body
    /// on an accepted status yields [`serde_json::Value::Null`].
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure or timeout.
    /// - [`ClientError::UnexpectedStatus`] for any status other than 200/201.
    pub async fn create_product(
        &self,
        record: &ProductRecord,
    ) -> Result<serde_json::Value, ClientError> {
        let (_, response) = self.post_json("api/admin/products", record).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body).unwrap_or(serde_json::Value::Null))
    }
}

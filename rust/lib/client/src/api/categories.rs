use crate::api::ApiClient;
use crate::error::ClientError;
use crate::model::{Category, CategoryDraft, Id};

/// `/categories` endpoints.
pub struct CategoriesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> CategoriesApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Category>, ClientError> {
        self.client.get("/categories").await
    }

    pub async fn create(&self, draft: &CategoryDraft) -> Result<Category, ClientError> {
        self.client.post("/categories", draft).await
    }

    pub async fn update(&self, id: Id, draft: &CategoryDraft) -> Result<Category, ClientError> {
        self.client.put(&format!("/categories/{}", id), draft).await
    }

    pub async fn delete(&self, id: Id) -> Result<(), ClientError> {
        self.client.delete(&format!("/categories/{}", id)).await?;
        Ok(())
    }
}

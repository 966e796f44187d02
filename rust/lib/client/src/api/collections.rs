use crate::api::ApiClient;
use crate::error::ClientError;
use crate::model::{Collection, CollectionUpdate, Id, NewCollection};

/// `/collections` endpoints.
pub struct CollectionsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> CollectionsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Collection>, ClientError> {
        self.client.get("/collections").await
    }

    pub async fn create(&self, req: &NewCollection) -> Result<Collection, ClientError> {
        self.client.post("/collections", req).await
    }

    pub async fn update(&self, id: Id, update: &CollectionUpdate) -> Result<Collection, ClientError> {
        self.client.put(&format!("/collections/{}", id), update).await
    }

    pub async fn delete(&self, id: Id) -> Result<(), ClientError> {
        self.client.delete(&format!("/collections/{}", id)).await?;
        Ok(())
    }
}

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::model::{Id, Novel, NovelDraft, NovelPage};

/// `/novels` endpoints.
pub struct NovelsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> NovelsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, page: u32, size: u32) -> Result<NovelPage, ClientError> {
        let page = page.to_string();
        let size = size.to_string();
        self.client
            .get_with_query("/novels", &[("page", page.as_str()), ("size", size.as_str())])
            .await
    }

    /// Look a novel up by its source URL (the dedup identity).
    pub async fn find_by_source_url(&self, source_url: &str) -> Result<NovelPage, ClientError> {
        self.client
            .get_with_query("/novels", &[("source_url", source_url)])
            .await
    }

    pub async fn get(&self, id: Id) -> Result<Novel, ClientError> {
        self.client.get(&format!("/novels/{}", id)).await
    }

    pub async fn create(&self, draft: &NovelDraft) -> Result<Novel, ClientError> {
        self.client.post("/novels", draft).await
    }
}

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::model::{RankingData, RankingSummary};

/// `/rankings` endpoints. Fetching triggers the backend scraper.
pub struct RankingsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> RankingsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<RankingSummary>, ClientError> {
        self.client.get("/rankings").await
    }

    pub async fn list_site(&self, site: &str) -> Result<Vec<RankingSummary>, ClientError> {
        self.client.get(&format!("/rankings/{}", site)).await
    }

    pub async fn get(&self, site: &str, ranking_type: &str) -> Result<RankingData, ClientError> {
        self.client
            .get(&format!("/rankings/{}/{}", site, ranking_type))
            .await
    }

    pub async fn fetch(&self, site: &str, ranking_type: &str) -> Result<(), ClientError> {
        self.client
            .post_empty(&format!("/rankings/fetch/{}/{}", site, ranking_type))
            .await?;
        Ok(())
    }

    pub async fn fetch_all(&self) -> Result<(), ClientError> {
        self.client.post_empty("/rankings/fetch-all").await?;
        Ok(())
    }
}

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::model::{AuthResponse, LoginRequest, RegisterRequest, User};

/// `/auth/*` endpoints.
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn login(&self, req: &LoginRequest) -> Result<AuthResponse, ClientError> {
        self.client.post("/auth/login", req).await
    }

    pub async fn register(&self, req: &RegisterRequest) -> Result<AuthResponse, ClientError> {
        self.client.post("/auth/register", req).await
    }

    pub async fn me(&self) -> Result<User, ClientError> {
        self.client.get("/auth/me").await
    }
}

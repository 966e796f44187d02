//! Backend API: the gateway plus one thin facade per resource.

pub mod auth;
pub mod categories;
pub mod collections;
pub mod gateway;
pub mod novels;
pub mod rankings;

pub use auth::AuthApi;
pub use categories::CategoriesApi;
pub use collections::CollectionsApi;
pub use gateway::{unwrap_envelope, ApiClient, TokenSource, DEFAULT_BASE_URL};
pub use novels::NovelsApi;
pub use rankings::RankingsApi;

impl ApiClient {
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    pub fn novels(&self) -> NovelsApi<'_> {
        NovelsApi::new(self)
    }

    pub fn collections(&self) -> CollectionsApi<'_> {
        CollectionsApi::new(self)
    }

    pub fn categories(&self) -> CategoriesApi<'_> {
        CategoriesApi::new(self)
    }

    pub fn rankings(&self) -> RankingsApi<'_> {
        RankingsApi::new(self)
    }
}

//! The shared novel catalogue.

use tracing::warn;

use crate::app::App;
use crate::model::{Id, Novel, NovelPage};
use crate::route::{self, Notice};

/// Page size the backend uses when none is given.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// One page of the catalogue, newest first. Pages start at 0.
pub async fn handle_list(app: &App, page: u32, size: u32) -> Option<NovelPage> {
    let size = size.max(1);
    match app.api.novels().list(page, size).await {
        Ok(found) => Some(found),
        Err(e) => {
            warn!(page, size, error = %e, "cannot list novels");
            route::notify(&app.store, Notice::error(e.user_message()));
            None
        }
    }
}

pub async fn handle_show(app: &App, id: Id) -> Option<Novel> {
    match app.api.novels().get(id).await {
        Ok(novel) => Some(novel),
        Err(e) => {
            warn!(novel_id = id, error = %e, "cannot load novel");
            route::notify(&app.store, Notice::error(e.user_message()));
            None
        }
    }
}

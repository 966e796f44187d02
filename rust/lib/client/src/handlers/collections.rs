//! Collections view and the edit dialog.

use tracing::{debug, warn};

use crate::app::App;
use crate::error::ClientError;
use crate::model::{Collection, CollectionUpdate, Id};
use crate::route::{self, Notice, Route};
use crate::state::{CollectionsPage, EditCollectionForm, PagePhase};

/// Highest rating the edit dialog accepts.
pub const MAX_RATING: u8 = 10;

/// Search and category filters, combined with AND.
///
/// The search matches a case-insensitive substring of the title or the
/// author; an empty search matches everything. The category, when set,
/// must match exactly.
pub fn filter_collections<'a>(
    items: &'a [Collection],
    search: &str,
    category: Option<Id>,
) -> Vec<&'a Collection> {
    let needle = search.trim().to_lowercase();
    items
        .iter()
        .filter(|c| {
            needle.is_empty()
                || c.novel.title.to_lowercase().contains(&needle)
                || c.novel
                    .author
                    .as_deref()
                    .is_some_and(|a| a.to_lowercase().contains(&needle))
        })
        .filter(|c| category.is_none() || c.category_id == category)
        .collect()
}

/// Load collections and categories together.
pub async fn handle_load(app: &App) -> bool {
    if route::open(&app.store, Route::Collections) != Route::Collections {
        return false;
    }
    app.store.update::<CollectionsPage, _>(|page| {
        page.phase = PagePhase::Loading;
        page.error = None;
    });

    let collections_api = app.api.collections();
    let categories_api = app.api.categories();
    let (items, categories) = tokio::join!(collections_api.list(), categories_api.list());
    match (items, categories) {
        (Ok(items), Ok(categories)) => {
            debug!(count = items.len(), "collections loaded");
            app.store.update::<CollectionsPage, _>(|page| {
                page.phase = PagePhase::Loaded;
                page.items = items;
                page.categories = categories;
            });
            true
        }
        (Err(e), _) | (_, Err(e)) => {
            warn!(error = %e, "cannot load collections");
            app.store.update::<CollectionsPage, _>(|page| {
                page.phase = PagePhase::Error;
                page.error = Some(e.user_message());
            });
            false
        }
    }
}

/// Change the search text and category filter.
pub fn handle_set_filter(app: &App, search: &str, category: Option<Id>) -> Vec<Collection> {
    let page = app.store.update::<CollectionsPage, _>(|page| {
        page.search = search.to_string();
        page.category = category;
    });
    page.visible().into_iter().cloned().collect()
}

/// Delete a collection. The caller has already confirmed.
///
/// The entry leaves the list at once and is put back if the backend
/// refuses.
pub async fn handle_delete(app: &App, id: Id) -> bool {
    if !route::require(&app.store, Route::Collections) {
        return false;
    }

    let mut removed = None;
    app.store.update::<CollectionsPage, _>(|page| {
        if let Some(pos) = page.items.iter().position(|c| c.id == id) {
            removed = Some((pos, page.items.remove(pos)));
        }
    });

    match app.api.collections().delete(id).await {
        Ok(()) => {
            debug!(collection_id = id, "collection deleted");
            true
        }
        Err(e) => {
            warn!(collection_id = id, error = %e, "delete failed");
            if let Some((pos, item)) = removed {
                app.store.update::<CollectionsPage, _>(|page| {
                    let pos = pos.min(page.items.len());
                    page.items.insert(pos, item);
                });
            }
            route::notify(&app.store, Notice::error(e.user_message()));
            false
        }
    }
}

/// Save the edit dialog.
pub async fn handle_update(app: &App, id: Id, update: &CollectionUpdate) -> Option<Collection> {
    if !route::require(&app.store, Route::Collections) {
        return None;
    }

    if let Err(e) = validate_update(update) {
        app.store.put(EditCollectionForm {
            collection_id: Some(id),
            phase: PagePhase::Error,
            error: Some(e.user_message()),
        });
        return None;
    }

    app.store.put(EditCollectionForm {
        collection_id: Some(id),
        phase: PagePhase::Submitting,
        error: None,
    });

    match app.api.collections().update(id, update).await {
        Ok(updated) => {
            app.store.put(EditCollectionForm {
                collection_id: Some(id),
                phase: PagePhase::Loaded,
                error: None,
            });
            app.store.update::<CollectionsPage, _>(|page| {
                if let Some(slot) = page.items.iter_mut().find(|c| c.id == id) {
                    *slot = updated.clone();
                }
            });
            Some(updated)
        }
        Err(e) => {
            warn!(collection_id = id, error = %e, "update failed");
            app.store.put(EditCollectionForm {
                collection_id: Some(id),
                phase: PagePhase::Error,
                error: Some(e.user_message()),
            });
            route::notify(&app.store, Notice::error(e.user_message()));
            None
        }
    }
}

fn validate_update(update: &CollectionUpdate) -> Result<(), ClientError> {
    if update.is_empty() {
        return Err(ClientError::validation("nothing to update"));
    }
    if update.rating.is_some_and(|r| r > MAX_RATING) {
        return Err(ClientError::validation("rating must be between 0 and 10"));
    }
    Ok(())
}

//! Category management.

use tracing::{debug, warn};

use crate::app::App;
use crate::model::{Category, CategoryDraft, Id};
use crate::route::{self, Notice, Route};
use crate::state::{CategoriesPage, PagePhase};

pub async fn handle_load(app: &App) -> bool {
    if route::open(&app.store, Route::Categories) != Route::Categories {
        return false;
    }
    app.store.update::<CategoriesPage, _>(|page| {
        page.phase = PagePhase::Loading;
        page.error = None;
    });

    match app.api.categories().list().await {
        Ok(items) => {
            app.store.update::<CategoriesPage, _>(|page| {
                page.phase = PagePhase::Loaded;
                page.items = items;
            });
            true
        }
        Err(e) => {
            warn!(error = %e, "cannot load categories");
            app.store.update::<CategoriesPage, _>(|page| {
                page.phase = PagePhase::Error;
                page.error = Some(e.user_message());
            });
            false
        }
    }
}

/// Create (`id == None`) or update a category.
///
/// A blank colour falls back to the default. Duplicate names come back
/// from the backend and are shown as a notice.
pub async fn handle_save(app: &App, id: Option<Id>, draft: &CategoryDraft) -> Option<Category> {
    if !route::require(&app.store, Route::Categories) {
        return None;
    }

    let mut draft = draft.clone();
    draft.name = draft.name.trim().to_string();
    if draft.name.is_empty() {
        route::notify(&app.store, Notice::error("category name is required"));
        return None;
    }
    if draft.color.trim().is_empty() {
        draft.color = Category::DEFAULT_COLOR.to_string();
    }

    app.store.update::<CategoriesPage, _>(|page| page.phase = PagePhase::Submitting);
    let result = match id {
        Some(id) => app.api.categories().update(id, &draft).await,
        None => app.api.categories().create(&draft).await,
    };

    match result {
        Ok(saved) => {
            debug!(category_id = saved.id, "category saved");
            app.store.update::<CategoriesPage, _>(|page| {
                page.phase = PagePhase::Loaded;
                match page.items.iter_mut().find(|c| c.id == saved.id) {
                    Some(slot) => *slot = saved.clone(),
                    None => page.items.push(saved.clone()),
                }
            });
            Some(saved)
        }
        Err(e) => {
            warn!(error = %e, duplicate = e.is_duplicate(), "category save failed");
            app.store.update::<CategoriesPage, _>(|page| page.phase = PagePhase::Loaded);
            route::notify(&app.store, Notice::error(e.user_message()));
            None
        }
    }
}

/// Delete a category. The caller has already confirmed.
pub async fn handle_delete(app: &App, id: Id) -> bool {
    if !route::require(&app.store, Route::Categories) {
        return false;
    }

    let mut removed = None;
    app.store.update::<CategoriesPage, _>(|page| {
        if let Some(pos) = page.items.iter().position(|c| c.id == id) {
            removed = Some((pos, page.items.remove(pos)));
        }
    });

    match app.api.categories().delete(id).await {
        Ok(()) => true,
        Err(e) => {
            warn!(category_id = id, error = %e, "delete failed");
            if let Some((pos, item)) = removed {
                app.store.update::<CategoriesPage, _>(|page| {
                    let pos = pos.min(page.items.len());
                    page.items.insert(pos, item);
                });
            }
            route::notify(&app.store, Notice::error(e.user_message()));
            false
        }
    }
}

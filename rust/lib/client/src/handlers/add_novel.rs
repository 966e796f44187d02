//! Add a novel by hand and file it straight into the collections.

use tracing::{info, warn};

use crate::app::App;
use crate::model::{Collection, Id, NewCollection, NovelDraft};
use crate::route::{self, Notice, Route};
use crate::site::infer_source_site;
use crate::state::{AddNovelForm, PagePhase};

/// Open the form and load the categories it offers.
pub async fn handle_open(app: &App) -> bool {
    if route::open(&app.store, Route::AddNovel) != Route::AddNovel {
        return false;
    }
    app.store.put(AddNovelForm::default());
    match app.api.categories().list().await {
        Ok(categories) => {
            app.store.put(AddNovelForm {
                phase: PagePhase::Loaded,
                categories,
                error: None,
            });
            true
        }
        Err(e) => {
            warn!(error = %e, "cannot load categories");
            app.store.put(AddNovelForm {
                phase: PagePhase::Error,
                categories: Vec::new(),
                error: Some(e.user_message()),
            });
            false
        }
    }
}

/// Create the novel, then the collection, then show the collections.
///
/// Title and source URL are required; a missing source site is inferred
/// from the URL.
pub async fn handle_add_novel(
    app: &App,
    draft: &NovelDraft,
    category_id: Option<Id>,
) -> Option<Collection> {
    if !route::require(&app.store, Route::AddNovel) {
        return None;
    }

    let mut draft = draft.clone();
    draft.title = draft.title.trim().to_string();
    draft.source_url = draft.source_url.trim().to_string();
    if draft.title.is_empty() || draft.source_url.is_empty() {
        set_form(app, PagePhase::Error, Some("title and source URL are required".into()));
        return None;
    }
    if draft.source_site.as_deref().map_or(true, |s| s.trim().is_empty()) {
        draft.source_site = Some(infer_source_site(&draft.source_url).to_string());
    }

    set_form(app, PagePhase::Submitting, None);

    let result = async {
        let novel = app.api.novels().create(&draft).await?;
        app.api
            .collections()
            .create(&NewCollection { novel_id: novel.id, category_id })
            .await
    }
    .await;

    match result {
        Ok(collection) => {
            info!(title = %draft.title, "novel added");
            set_form(app, PagePhase::Loaded, None);
            route::notify(&app.store, Notice::success(format!("Added \"{}\"", draft.title)));
            route::navigate(&app.store, Route::Collections);
            Some(collection)
        }
        Err(e) => {
            warn!(title = %draft.title, error = %e, "add novel failed");
            set_form(app, PagePhase::Error, Some(e.user_message()));
            None
        }
    }
}

fn set_form(app: &App, phase: PagePhase, error: Option<String>) {
    app.store.update::<AddNovelForm, _>(|form| {
        form.phase = phase;
        form.error = error;
    });
}

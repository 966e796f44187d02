//! Home view: monthly rankings, recent collections, collect-from-ranking.

use std::cmp::Reverse;

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::app::App;
use crate::model::{Collection, NovelInfo, RankingData, RankingSummary, MONTHLY_RANKING};
use crate::pending::{collect_draft, PendingCollect};
use crate::route::{self, Notice, Route};
use crate::state::{collect_key, HomePage};

/// How many collections the home view lists.
pub const RECENT_LIMIT: usize = 5;

#[derive(Debug)]
pub enum CollectOutcome {
    /// Not logged in: the intent was stashed and the user sent to login.
    Deferred,
    Collected(Collection),
    /// Already in the user's collections.
    Duplicate,
    Failed,
}

/// Load every monthly ranking.
///
/// Rankings are fetched concurrently; one that fails is left out rather
/// than failing the page.
pub async fn handle_load_rankings(app: &App) -> Vec<RankingData> {
    app.store.update::<HomePage, _>(|home| home.loading_rankings = true);

    let summaries = match app.api.rankings().list().await {
        Ok(s) => s,
        Err(e) => {
            warn!(error = %e, "cannot load ranking summaries");
            Vec::new()
        }
    };

    let rankings_api = app.api.rankings();
    let api = &rankings_api;
    let fetches = summaries
        .iter()
        .filter(|s| s.ranking_type == MONTHLY_RANKING)
        .map(|s| async move {
            let result = api.get(&s.site_name, &s.ranking_type).await;
            (s.site_name.as_str(), result)
        });

    let rankings: Vec<RankingData> = join_all(fetches)
        .await
        .into_iter()
        .filter_map(|(site, result)| match result {
            Ok(ranking) => Some(ranking),
            Err(e) => {
                warn!(site = %site, error = %e, "cannot load ranking");
                None
            }
        })
        .collect();

    debug!(count = rankings.len(), "rankings loaded");
    app.store.update::<HomePage, _>(|home| {
        home.rankings = rankings.clone();
        home.loading_rankings = false;
    });
    rankings
}

/// The five most recently updated collections. Empty when logged out.
pub async fn handle_load_recent(app: &App) -> Vec<Collection> {
    if !app.session.is_authenticated() {
        app.store.update::<HomePage, _>(|home| home.recent.clear());
        return Vec::new();
    }

    app.store.update::<HomePage, _>(|home| home.loading_recent = true);
    let recent = match app.api.collections().list().await {
        Ok(items) => most_recent(items, RECENT_LIMIT),
        Err(e) => {
            warn!(error = %e, "cannot load recent collections");
            Vec::new()
        }
    };
    app.store.update::<HomePage, _>(|home| {
        home.recent = recent.clone();
        home.loading_recent = false;
    });
    recent
}

/// Newest `updated_at` first; entries without a timestamp go last.
pub fn most_recent(mut items: Vec<Collection>, limit: usize) -> Vec<Collection> {
    items.sort_by_key(|c| Reverse(c.updated_at));
    items.truncate(limit);
    items
}

/// Collect a ranking entry.
///
/// Logged out, the entry is captured in the pending queue and the user
/// is sent to login; the collect is replayed after authentication.
pub async fn handle_collect(app: &App, novel: &NovelInfo) -> CollectOutcome {
    let intent = PendingCollect::from_ranking(novel);

    if !app.session.is_authenticated() {
        if let Err(e) = app.pending.capture(&intent) {
            warn!(error = %e, "cannot stash pending collect");
            route::notify(&app.store, Notice::error(e.user_message()));
            return CollectOutcome::Failed;
        }
        route::navigate(&app.store, Route::Login);
        return CollectOutcome::Deferred;
    }

    let key = collect_key(&novel.title, &novel.author);
    app.store.update::<HomePage, _>(|home| {
        home.collecting.insert(key.clone());
    });

    let result = collect_draft(&app.api, &intent.to_draft(), None).await;

    app.store.update::<HomePage, _>(|home| {
        home.collecting.remove(&key);
    });

    match result {
        Ok(collection) => {
            info!(title = %novel.title, "collected");
            route::notify(&app.store, Notice::success(format!("Collected \"{}\"", novel.title)));
            CollectOutcome::Collected(collection)
        }
        Err(e) if e.is_duplicate() => {
            route::notify(
                &app.store,
                Notice::info(format!("\"{}\" is already in your collections", novel.title)),
            );
            CollectOutcome::Duplicate
        }
        Err(e) => {
            warn!(title = %novel.title, error = %e, "collect failed");
            route::notify(&app.store, Notice::error("collect failed, please try again later"));
            CollectOutcome::Failed
        }
    }
}

/// One ranking list, for display or for picking an entry to collect.
pub async fn handle_show_ranking(app: &App, site: &str, ranking_type: &str) -> Option<RankingData> {
    match app.api.rankings().get(site, ranking_type).await {
        Ok(ranking) => Some(ranking),
        Err(e) => {
            warn!(site, ranking_type, error = %e, "cannot load ranking");
            route::notify(&app.store, Notice::error(e.user_message()));
            None
        }
    }
}

/// Every ranking list one site offers.
pub async fn handle_site_rankings(app: &App, site: &str) -> Option<Vec<RankingSummary>> {
    match app.api.rankings().list_site(site).await {
        Ok(summaries) => Some(summaries),
        Err(e) => {
            warn!(site, error = %e, "cannot list site rankings");
            route::notify(&app.store, Notice::error(e.user_message()));
            None
        }
    }
}

/// Ask the backend to scrape one ranking now.
pub async fn handle_fetch_ranking(app: &App, site: &str, ranking_type: &str) -> bool {
    match app.api.rankings().fetch(site, ranking_type).await {
        Ok(()) => {
            route::notify(&app.store, Notice::success(format!("fetched {}/{}", site, ranking_type)));
            true
        }
        Err(e) => {
            warn!(site, ranking_type, error = %e, "ranking fetch failed");
            route::notify(&app.store, Notice::error(e.user_message()));
            false
        }
    }
}

/// Ask the backend to scrape every ranking.
pub async fn handle_fetch_all(app: &App) -> bool {
    match app.api.rankings().fetch_all().await {
        Ok(()) => {
            route::notify(&app.store, Notice::success("fetched all rankings"));
            true
        }
        Err(e) => {
            warn!(error = %e, "ranking fetch-all failed");
            route::notify(&app.store, Notice::error(e.user_message()));
            false
        }
    }
}

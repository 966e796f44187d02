//! `shuxiang collections ...`

use anyhow::Result;
use shuxiang_client::handlers::{add_novel, collections};
use shuxiang_client::model::{Collection, CollectionUpdate, Id, NovelDraft};
use shuxiang_client::state::{AddNovelForm, CollectionsPage, EditCollectionForm};
use shuxiang_client::App;

use super::{clip, confirm, failure, print_json, require_login, Output};

pub async fn list(app: &App, search: Option<&str>, category: Option<Id>, output: Output) -> Result<()> {
    require_login(app)?;
    if !collections::handle_load(app).await {
        let page = app.store.read::<CollectionsPage>().unwrap_or_default();
        anyhow::bail!(page.error.unwrap_or_else(|| "cannot load collections".into()));
    }
    let visible = collections::handle_set_filter(app, search.unwrap_or(""), category);

    match output {
        Output::Json => print_json(&visible)?,
        Output::Table => print_table(app, &visible),
    }
    Ok(())
}

fn print_table(app: &App, items: &[Collection]) {
    let page = app.store.read::<CollectionsPage>().unwrap_or_default();
    let category_name = |c: &Collection| -> String {
        c.effective_category_id()
            .and_then(|id| page.categories.iter().find(|cat| cat.id == id))
            .map(|cat| cat.name.clone())
            .unwrap_or_default()
    };

    println!(
        "{:>6}  {:<28}  {:<14}  {:<10}  {:<10}  {:>6}  {:>7}",
        "ID", "TITLE", "AUTHOR", "CATEGORY", "STATUS", "RATING", "CHAPTER"
    );
    for c in items {
        println!(
            "{:>6}  {:<28}  {:<14}  {:<10}  {:<10}  {:>6}  {:>7}",
            c.id,
            clip(&c.novel.title, 28),
            clip(c.novel.author.as_deref().unwrap_or(""), 14),
            clip(&category_name(c), 10),
            c.reading_status.as_str(),
            c.rating.map(|r| format!("{:.1}", r)).unwrap_or_else(|| "-".into()),
            c.current_chapter,
        );
    }
    println!("{} shown", items.len());
}

pub async fn add(app: &App, draft: NovelDraft, category: Option<Id>) -> Result<()> {
    require_login(app)?;
    let opened = add_novel::handle_open(app).await;
    let form = app.store.read::<AddNovelForm>().unwrap_or_default();
    if !opened {
        anyhow::bail!(form.error.unwrap_or_else(|| "cannot open the add form".into()));
    }
    if let Some(id) = category {
        if !form.categories.iter().any(|c| c.id == id) {
            anyhow::bail!("No category with id {}.", id);
        }
    }
    if add_novel::handle_add_novel(app, &draft, category).await.is_none() {
        let form = app.store.read::<AddNovelForm>().unwrap_or_default();
        anyhow::bail!(form.error.unwrap_or_else(|| "add failed".into()));
    }
    Ok(())
}

pub async fn edit(app: &App, id: Id, update: CollectionUpdate) -> Result<()> {
    require_login(app)?;
    match collections::handle_update(app, id, &update).await {
        Some(saved) => {
            println!("Updated collection {} ({}).", saved.id, saved.novel.title);
            Ok(())
        }
        None => {
            let form = app.store.read::<EditCollectionForm>().unwrap_or_default();
            anyhow::bail!(form.error.unwrap_or_else(|| "update failed".into()))
        }
    }
}

pub async fn delete(app: &App, id: Id, yes: bool) -> Result<()> {
    require_login(app)?;
    if !confirm(&format!("Delete collection {}?", id), yes)? {
        println!("Cancelled.");
        return Ok(());
    }
    if !collections::handle_delete(app, id).await {
        return Err(failure(app));
    }
    println!("Deleted collection {}.", id);
    Ok(())
}

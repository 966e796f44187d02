//! `shuxiang categories ...`

use anyhow::Result;
use shuxiang_client::handlers::categories;
use shuxiang_client::model::{CategoryDraft, Id};
use shuxiang_client::state::CategoriesPage;
use shuxiang_client::App;

use super::{confirm, failure, print_json, require_login, Output};

async fn load(app: &App) -> Result<CategoriesPage> {
    require_login(app)?;
    if !categories::handle_load(app).await {
        let page = app.store.read::<CategoriesPage>().unwrap_or_default();
        anyhow::bail!(page.error.unwrap_or_else(|| "cannot load categories".into()));
    }
    Ok(app.store.read::<CategoriesPage>().unwrap_or_default())
}

pub async fn list(app: &App, output: Output) -> Result<()> {
    let page = load(app).await?;
    match output {
        Output::Json => print_json(&page.items)?,
        Output::Table => {
            println!("{:>6}  {:<20}  {:<8}  {}", "ID", "NAME", "COLOR", "ICON");
            for c in &page.items {
                println!(
                    "{:>6}  {:<20}  {:<8}  {}",
                    c.id,
                    c.name,
                    c.color(),
                    c.icon.as_deref().unwrap_or("")
                );
            }
        }
    }
    Ok(())
}

pub async fn add(app: &App, name: String, color: Option<String>, icon: Option<String>) -> Result<()> {
    require_login(app)?;
    let mut draft = CategoryDraft::new(name);
    if let Some(color) = color {
        draft.color = color;
    }
    draft.icon = icon;

    let saved = categories::handle_save(app, None, &draft)
        .await
        .ok_or_else(|| failure(app))?;
    println!("Created category {} ({}).", saved.id, saved.name);
    Ok(())
}

/// Change a category; fields not given keep their current value.
pub async fn edit(
    app: &App,
    id: Id,
    name: Option<String>,
    color: Option<String>,
    icon: Option<String>,
) -> Result<()> {
    let page = load(app).await?;
    let Some(current) = page.items.iter().find(|c| c.id == id) else {
        anyhow::bail!("No category with id {}.", id);
    };

    let draft = CategoryDraft {
        name: name.unwrap_or_else(|| current.name.clone()),
        color: color.unwrap_or_else(|| current.color().to_string()),
        icon: icon.or_else(|| current.icon.clone()),
    };
    let saved = categories::handle_save(app, Some(id), &draft)
        .await
        .ok_or_else(|| failure(app))?;
    println!("Updated category {} ({}).", saved.id, saved.name);
    Ok(())
}

pub async fn delete(app: &App, id: Id, yes: bool) -> Result<()> {
    require_login(app)?;
    if !confirm(&format!("Delete category {}?", id), yes)? {
        println!("Cancelled.");
        return Ok(());
    }
    if !categories::handle_delete(app, id).await {
        return Err(failure(app));
    }
    println!("Deleted category {}.", id);
    Ok(())
}

//! View state for each page, published to the flux store.
//!
//! Every struct here sits at its own `page/*` path. Handlers write them;
//! front-ends render from them.

use std::collections::BTreeSet;

use shuxiang_flux::State;

use crate::model::{Category, Collection, Id, RankingData};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PagePhase {
    #[default]
    Loading,
    Loaded,
    Submitting,
    Error,
}

/// Login form: `busy` while the request is out, inline `error` after.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub busy: bool,
    pub error: Option<String>,
}

impl State for LoginForm {
    const PATH: &'static str = "page/login";
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterForm {
    pub busy: bool,
    pub error: Option<String>,
}

impl State for RegisterForm {
    const PATH: &'static str = "page/register";
}

/// Home view: monthly rankings, recent collections, collects in flight.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomePage {
    pub rankings: Vec<RankingData>,
    pub loading_rankings: bool,
    pub recent: Vec<Collection>,
    pub loading_recent: bool,
    /// Keys (`title-author`) of ranking entries being collected.
    pub collecting: BTreeSet<String>,
}

impl State for HomePage {
    const PATH: &'static str = "page/home";
}

/// Key identifying a ranking entry while a collect is in flight.
pub fn collect_key(title: &str, author: &str) -> String {
    format!("{}-{}", title, author)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionsPage {
    pub phase: PagePhase,
    pub items: Vec<Collection>,
    pub categories: Vec<Category>,
    pub search: String,
    pub category: Option<Id>,
    pub error: Option<String>,
}

impl State for CollectionsPage {
    const PATH: &'static str = "page/collections";
}

impl CollectionsPage {
    /// Items that pass the current search and category filter.
    pub fn visible(&self) -> Vec<&Collection> {
        crate::handlers::collections::filter_collections(&self.items, &self.search, self.category)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoriesPage {
    pub phase: PagePhase,
    pub items: Vec<Category>,
    pub error: Option<String>,
}

impl State for CategoriesPage {
    const PATH: &'static str = "page/categories";
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddNovelForm {
    pub phase: PagePhase,
    pub categories: Vec<Category>,
    pub error: Option<String>,
}

impl State for AddNovelForm {
    const PATH: &'static str = "page/add-novel";
}

/// Edit dialog for one collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditCollectionForm {
    pub collection_id: Option<Id>,
    pub phase: PagePhase,
    pub error: Option<String>,
}

impl State for EditCollectionForm {
    const PATH: &'static str = "page/edit-collection";
}

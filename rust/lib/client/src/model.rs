//! Wire types for the backend REST API.
//!
//! Novels, collections and categories use snake_case field names; the
//! ranking endpoints use camelCase. Optional fields tolerate both absence
//! and explicit `null`.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

pub type Id = i64;

/// Treat `null` the same as a missing field.
fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

// ── Auth ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Id,
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

// ── Novels ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Novel {
    pub id: Id,
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cover_url: Option<String>,
    pub source_url: String,
    #[serde(default)]
    pub source_site: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_chapters: u32,
    #[serde(default)]
    pub status: Option<String>,
}

/// Fields sent to `POST /novels`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NovelDraft {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    pub source_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_site: Option<String>,
    #[serde(default)]
    pub total_chapters: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Page of novels as returned by `GET /novels`.
#[derive(Debug, Clone, Deserialize)]
pub struct NovelPage {
    #[serde(default)]
    pub content: Vec<Novel>,
    #[serde(rename = "totalElements", default)]
    pub total_elements: u64,
}

// ── Categories ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: Id,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_id: Id,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

impl Category {
    pub const DEFAULT_COLOR: &'static str = "#3b82f6";

    pub fn color(&self) -> &str {
        self.color.as_deref().unwrap_or(Self::DEFAULT_COLOR)
    }
}

/// Body of `POST /categories` and `PUT /categories/:id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDraft {
    pub name: String,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl CategoryDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: Category::DEFAULT_COLOR.to_string(),
            icon: None,
        }
    }
}

// ── Collections ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingStatus {
    #[default]
    Reading,
    Completed,
    Dropped,
}

impl ReadingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingStatus::Reading => "reading",
            ReadingStatus::Completed => "completed",
            ReadingStatus::Dropped => "dropped",
        }
    }
}

impl fmt::Display for ReadingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReadingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reading" => Ok(ReadingStatus::Reading),
            "completed" => Ok(ReadingStatus::Completed),
            "dropped" => Ok(ReadingStatus::Dropped),
            other => Err(format!(
                "unknown reading status '{}' (expected reading, completed or dropped)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: Id,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_id: Id,
    pub novel: Novel,
    #[serde(default)]
    pub category_id: Option<Id>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reading_status: ReadingStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub current_chapter: u32,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl Collection {
    /// Category id, falling back to the embedded category.
    pub fn effective_category_id(&self) -> Option<Id> {
        self.category_id.or_else(|| self.category.as_ref().map(|c| c.id))
    }
}

/// Body of `POST /collections`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCollection {
    pub novel_id: Id,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Id>,
}

/// Partial body of `PUT /collections/:id`. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CollectionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading_status: Option<ReadingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_chapter: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CollectionUpdate {
    pub fn is_empty(&self) -> bool {
        *self == CollectionUpdate::default()
    }
}

// ── Rankings ────────────────────────────────────────────────────────

/// One entry of a scraped ranking list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NovelInfo {
    pub rank: u32,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(default)]
    pub cover_url: Option<String>,
    pub source_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub total_chapters: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingData {
    pub site_name: String,
    pub ranking_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub novels: Vec<NovelInfo>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingSummary {
    pub site_name: String,
    pub ranking_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub novel_count: u32,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Ranking type shown on the home view.
pub const MONTHLY_RANKING: &str = "monthly";

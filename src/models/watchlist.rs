use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CatalogMedia, MediaType};
use crate::error::{AppError, AppResult};

/// Watch progress of a saved title
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WatchStatus {
    #[default]
    PlanToWatch,
    Watching,
    Watched,
}

impl WatchStatus {
    /// All statuses in display order
    pub const ALL: [WatchStatus; 3] = [
        WatchStatus::PlanToWatch,
        WatchStatus::Watching,
        WatchStatus::Watched,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            WatchStatus::PlanToWatch => "Plan to Watch",
            WatchStatus::Watching => "Watching",
            WatchStatus::Watched => "Watched",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WatchStatus::PlanToWatch => "plan_to_watch",
            WatchStatus::Watching => "watching",
            WatchStatus::Watched => "watched",
        }
    }
}

/// One saved title inside a watchlist
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchlistItem {
    pub id: String,
    pub tmdb_id: i64,
    pub media_type: MediaType,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub status: WatchStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_at: Option<DateTime<Utc>>,
}

impl WatchlistItem {
    pub fn matches(&self, tmdb_id: i64, media_type: MediaType) -> bool {
        self.tmdb_id == tmdb_id && self.media_type == media_type
    }
}

/// A named, profile-owned collection of saved titles
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Watchlist {
    pub id: String,
    #[serde(rename = "user_id", default)]
    pub owner_profile_id: String,
    pub name: String,
    #[serde(default)]
    pub items: Vec<WatchlistItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Watchlist {
    pub fn find_item(&self, tmdb_id: i64, media_type: MediaType) -> Option<&WatchlistItem> {
        self.items.iter().find(|i| i.matches(tmdb_id, media_type))
    }

    pub fn item_mut(&mut self, item_id: &str) -> Option<&mut WatchlistItem> {
        self.items.iter_mut().find(|i| i.id == item_id)
    }

    /// Removes an item by id, returning whether anything was removed
    pub fn remove_item(&mut self, item_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id != item_id);
        self.items.len() != before
    }
}

/// A saved title together with the watchlist holding it
#[derive(Debug, Clone, PartialEq)]
pub struct SavedEntry {
    pub watchlist: Watchlist,
    pub item: WatchlistItem,
}

/// Scans watchlists in held order and returns the first one holding the title.
pub fn find_by_media(
    watchlists: &[Watchlist],
    tmdb_id: i64,
    media_type: MediaType,
) -> Option<(&Watchlist, &WatchlistItem)> {
    watchlists
        .iter()
        .find_map(|w| w.find_item(tmdb_id, media_type).map(|item| (w, item)))
}

/// Request body for creating a watchlist
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewWatchlist {
    pub user_id: String,
    pub name: String,
}

/// Request body for adding a title to a watchlist
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewWatchlistItem {
    pub tmdb_id: i64,
    pub media_type: MediaType,
    pub title: String,
    pub poster_path: Option<String>,
    #[serde(default)]
    pub status: WatchStatus,
}

impl NewWatchlistItem {
    /// Links a catalog title by reference
    pub fn from_media(media: &CatalogMedia, status: WatchStatus) -> AppResult<Self> {
        let media_type = media.kind().ok_or_else(|| {
            AppError::InvalidInput(format!(
                "{} is not a movie or tv title (media_type {:?})",
                media.id, media.media_type
            ))
        })?;

        Ok(Self {
            tmdb_id: media.id,
            media_type,
            title: media.display_title().to_string(),
            poster_path: media.poster_path.clone(),
            status,
        })
    }
}

/// Partial item update; unset fields are left out of the request body
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ItemUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<WatchStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watchlist_id: Option<String>,
}

impl ItemUpdate {
    pub fn status(status: WatchStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

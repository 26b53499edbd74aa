/// Remote API client abstraction
///
/// Every operation maps to exactly one HTTP call against the backend's `/api`
/// surface and either resolves with the decoded payload or fails with an
/// [`AppError`](crate::error::AppError). Implementations hold no state beyond
/// their connection settings: no retries, no caching.
use crate::{
    error::AppResult,
    models::{
        ExternalRatings, GenreList, Health, MediaPage, MediaType, MovieDetails, NewWatchlistItem,
        Profile, ProviderList, TvDetails, WatchStatus, Watchlist, WatchlistItem,
    },
};

pub mod catalog;
pub mod client;

pub use catalog::{
    sort_providers, CatalogList, DiscoverFilters, TimeWindow, TrendingScope, POPULAR_PROVIDER_IDS,
};
pub use client::HttpApiClient;

/// Typed operations of the CineVault backend
///
/// The stores only talk to the backend through this trait, so they can be
/// driven by a mock in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CineVaultApi: Send + Sync {
    // ---- profiles ----

    async fn list_profiles(&self) -> AppResult<Vec<Profile>>;

    async fn get_profile(&self, id: &str) -> AppResult<Profile>;

    async fn create_profile(&self, name: &str, avatar_color: &str) -> AppResult<Profile>;

    async fn delete_profile(&self, id: &str) -> AppResult<()>;

    // ---- watchlists ----

    async fn list_watchlists(&self, owner_profile_id: &str) -> AppResult<Vec<Watchlist>>;

    async fn get_watchlist(&self, id: &str) -> AppResult<Watchlist>;

    async fn create_watchlist(&self, owner_profile_id: &str, name: &str) -> AppResult<Watchlist>;

    /// Renames a watchlist; the backend takes the name as a query parameter
    async fn rename_watchlist(&self, id: &str, name: &str) -> AppResult<()>;

    async fn delete_watchlist(&self, id: &str) -> AppResult<()>;

    // ---- watchlist items ----

    /// Adds a title to a watchlist.
    ///
    /// A title already present in that list is rejected by the backend with a
    /// client error (see [`AppError::is_duplicate`](crate::error::AppError::is_duplicate)).
    async fn add_item(&self, watchlist_id: &str, item: &NewWatchlistItem)
        -> AppResult<WatchlistItem>;

    async fn update_item_status(
        &self,
        watchlist_id: &str,
        item_id: &str,
        status: WatchStatus,
    ) -> AppResult<()>;

    async fn remove_item(&self, watchlist_id: &str, item_id: &str) -> AppResult<()>;

    // ---- catalog ----

    async fn genres(&self, media_type: MediaType) -> AppResult<GenreList>;

    async fn trending(
        &self,
        scope: TrendingScope,
        window: TimeWindow,
        page: u32,
    ) -> AppResult<MediaPage>;

    async fn catalog_list(&self, list: CatalogList, page: u32) -> AppResult<MediaPage>;

    /// Multi-search over movies and TV; empty queries are rejected locally
    async fn search(&self, query: &str, page: u32) -> AppResult<MediaPage>;

    async fn discover(
        &self,
        media_type: MediaType,
        filters: &DiscoverFilters,
        page: u32,
    ) -> AppResult<MediaPage>;

    async fn movie_details(&self, id: i64) -> AppResult<MovieDetails>;

    async fn tv_details(&self, id: i64) -> AppResult<TvDetails>;

    async fn watch_providers(&self, watch_region: &str) -> AppResult<ProviderList>;

    /// IMDb/Rotten Tomatoes/Metacritic ratings. Returns `None` without a
    /// request when no IMDb id is known.
    async fn external_ratings(&self, imdb_id: &str) -> AppResult<Option<ExternalRatings>>;

    async fn health(&self) -> AppResult<Health>;
}

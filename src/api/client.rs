/// reqwest implementation of [`CineVaultApi`]
///
/// All paths are relative to `<backend>/api`. Non-success statuses become
/// `AppError::Client` / `AppError::Server` carrying the backend's `detail`
/// message; transport failures become `AppError::Network` / `AppError::Timeout`.
use std::time::Duration;

use reqwest::{Client as HttpClient, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::{
    api::{CatalogList, CineVaultApi, DiscoverFilters, TimeWindow, TrendingScope},
    config::Config,
    error::{AppError, AppResult},
    models::{
        ExternalRatings, GenreList, Health, ItemUpdate, MediaPage, MediaType, MovieDetails,
        NewProfile, NewWatchlist, NewWatchlistItem, Profile, ProviderList, TvDetails,
        WatchStatus, Watchlist, WatchlistItem,
    },
};

#[derive(Clone)]
pub struct HttpApiClient {
    http_client: HttpClient,
    api_url: String,
    timeout: Duration,
}

impl HttpApiClient {
    /// Creates a client for `api_url` (the backend origin plus `/api`)
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(config.api_base(), config.request_timeout())
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// Sends a request and returns the body of a successful response
    async fn execute(&self, request: RequestBuilder) -> AppResult<String> {
        let response = request
            .send()
            .await
            .map_err(|e| AppError::from_transport(e, self.timeout))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::from_transport(e, self.timeout))?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), body = %body, "CineVault API error");
            return Err(AppError::from_status(status.as_u16(), &body));
        }

        Ok(body)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> AppResult<T> {
        let body = self.execute(request).await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(error = %e, response = %body, "Failed to deserialize API response");
            AppError::Decode(e.to_string())
        })
    }

    /// For endpoints that only acknowledge (`{"message": ...}`)
    async fn send_ack(&self, request: RequestBuilder) -> AppResult<()> {
        self.execute(request).await.map(|_| ())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> AppResult<T> {
        tracing::debug!(path = %path, "GET");
        self.send_json(self.http_client.get(self.url(path)).query(query))
            .await
    }

    /// Sends a partial item update (status and/or a target watchlist)
    pub async fn update_item(
        &self,
        watchlist_id: &str,
        item_id: &str,
        update: &ItemUpdate,
    ) -> AppResult<()> {
        let url = self.url(&format!("/watchlists/{}/items/{}", watchlist_id, item_id));
        self.send_ack(self.http_client.put(url).json(update)).await
    }
}

#[async_trait::async_trait]
impl CineVaultApi for HttpApiClient {
    async fn list_profiles(&self) -> AppResult<Vec<Profile>> {
        self.get_json("/users", &[]).await
    }

    async fn get_profile(&self, id: &str) -> AppResult<Profile> {
        self.get_json(&format!("/users/{}", id), &[]).await
    }

    async fn create_profile(&self, name: &str, avatar_color: &str) -> AppResult<Profile> {
        let body = NewProfile::new(name, avatar_color);
        let profile: Profile = self
            .send_json(self.http_client.post(self.url("/users")).json(&body))
            .await?;

        tracing::info!(profile_id = %profile.id, name = %profile.name, "Profile created");
        Ok(profile)
    }

    async fn delete_profile(&self, id: &str) -> AppResult<()> {
        self.send_ack(self.http_client.delete(self.url(&format!("/users/{}", id))))
            .await
    }

    async fn list_watchlists(&self, owner_profile_id: &str) -> AppResult<Vec<Watchlist>> {
        self.get_json("/watchlists", &[("user_id", owner_profile_id.to_string())])
            .await
    }

    async fn get_watchlist(&self, id: &str) -> AppResult<Watchlist> {
        self.get_json(&format!("/watchlists/{}", id), &[]).await
    }

    async fn create_watchlist(&self, owner_profile_id: &str, name: &str) -> AppResult<Watchlist> {
        let body = NewWatchlist {
            user_id: owner_profile_id.to_string(),
            name: name.to_string(),
        };
        self.send_json(self.http_client.post(self.url("/watchlists")).json(&body))
            .await
    }

    async fn rename_watchlist(&self, id: &str, name: &str) -> AppResult<()> {
        let request = self
            .http_client
            .put(self.url(&format!("/watchlists/{}", id)))
            .query(&[("name", name)]);
        self.send_ack(request).await
    }

    async fn delete_watchlist(&self, id: &str) -> AppResult<()> {
        self.send_ack(
            self.http_client
                .delete(self.url(&format!("/watchlists/{}", id))),
        )
        .await
    }

    async fn add_item(
        &self,
        watchlist_id: &str,
        item: &NewWatchlistItem,
    ) -> AppResult<WatchlistItem> {
        let url = self.url(&format!("/watchlists/{}/items", watchlist_id));
        self.send_json(self.http_client.post(url).json(item)).await
    }

    async fn update_item_status(
        &self,
        watchlist_id: &str,
        item_id: &str,
        status: WatchStatus,
    ) -> AppResult<()> {
        self.update_item(watchlist_id, item_id, &ItemUpdate::status(status))
            .await
    }

    async fn remove_item(&self, watchlist_id: &str, item_id: &str) -> AppResult<()> {
        let url = self.url(&format!("/watchlists/{}/items/{}", watchlist_id, item_id));
        self.send_ack(self.http_client.delete(url)).await
    }

    async fn genres(&self, media_type: MediaType) -> AppResult<GenreList> {
        self.get_json("/tmdb/genres", &[("media_type", media_type.to_string())])
            .await
    }

    async fn trending(
        &self,
        scope: TrendingScope,
        window: TimeWindow,
        page: u32,
    ) -> AppResult<MediaPage> {
        self.get_json(
            "/tmdb/trending",
            &[
                ("media_type", scope.as_str().to_string()),
                ("time_window", window.as_str().to_string()),
                ("page", page.to_string()),
            ],
        )
        .await
    }

    async fn catalog_list(&self, list: CatalogList, page: u32) -> AppResult<MediaPage> {
        self.get_json(list.path(), &[("page", page.to_string())])
            .await
    }

    async fn search(&self, query: &str, page: u32) -> AppResult<MediaPage> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let results: MediaPage = self
            .get_json(
                "/tmdb/search",
                &[("query", query.to_string()), ("page", page.to_string())],
            )
            .await?;

        tracing::info!(
            query = %query,
            results = results.results.len(),
            "Title search completed"
        );

        Ok(results)
    }

    async fn discover(
        &self,
        media_type: MediaType,
        filters: &DiscoverFilters,
        page: u32,
    ) -> AppResult<MediaPage> {
        self.get_json(
            &format!("/tmdb/discover/{}", media_type),
            &filters.to_query(page),
        )
        .await
    }

    async fn movie_details(&self, id: i64) -> AppResult<MovieDetails> {
        self.get_json(&format!("/tmdb/movie/{}", id), &[]).await
    }

    async fn tv_details(&self, id: i64) -> AppResult<TvDetails> {
        self.get_json(&format!("/tmdb/tv/{}", id), &[]).await
    }

    async fn watch_providers(&self, watch_region: &str) -> AppResult<ProviderList> {
        self.get_json(
            "/tmdb/watch-providers",
            &[("watch_region", watch_region.to_string())],
        )
        .await
    }

    async fn external_ratings(&self, imdb_id: &str) -> AppResult<Option<ExternalRatings>> {
        let imdb_id = imdb_id.trim();
        if imdb_id.is_empty() {
            return Ok(None);
        }

        self.get_json(&format!("/omdb/{}", imdb_id), &[])
            .await
            .map(Some)
    }

    async fn health(&self) -> AppResult<Health> {
        self.get_json("/health", &[]).await
    }
}

/// Catalog query parameters and provider ordering
///
/// The backend proxies TMDB; these types describe which listing to ask for and
/// which discover filters to send. Only filters that are set go on the wire.
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::{MediaType, WatchProvider};

pub const DEFAULT_SORT: &str = "popularity.desc";
pub const DEFAULT_WATCH_REGION: &str = "US";

/// Providers pinned to the top of provider pickers, in display order
/// (Netflix, Disney+, Prime Video, Apple TV+, Hulu, Peacock, ...)
pub const POPULAR_PROVIDER_IDS: [i64; 10] = [8, 337, 9, 350, 15, 386, 387, 531, 1899, 283];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendingScope {
    #[default]
    All,
    Movie,
    Tv,
}

impl TrendingScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendingScope::All => "all",
            TrendingScope::Movie => "movie",
            TrendingScope::Tv => "tv",
        }
    }
}

impl From<MediaType> for TrendingScope {
    fn from(media_type: MediaType) -> Self {
        match media_type {
            MediaType::Movie => TrendingScope::Movie,
            MediaType::Tv => TrendingScope::Tv,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    Day,
    #[default]
    Week,
}

impl TimeWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
        }
    }
}

/// Fixed catalog listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogList {
    NowPlaying,
    Upcoming,
    PopularMovies,
    TopRatedMovies,
    PopularTv,
    TopRatedTv,
    OnTheAir,
}

impl CatalogList {
    /// Path below `/api`
    pub fn path(&self) -> &'static str {
        match self {
            CatalogList::NowPlaying => "/tmdb/movie/now-playing",
            CatalogList::Upcoming => "/tmdb/movie/upcoming",
            CatalogList::PopularMovies => "/tmdb/movie/popular",
            CatalogList::TopRatedMovies => "/tmdb/movie/top-rated",
            CatalogList::PopularTv => "/tmdb/tv/popular",
            CatalogList::TopRatedTv => "/tmdb/tv/top-rated",
            CatalogList::OnTheAir => "/tmdb/tv/on-the-air",
        }
    }

    pub fn media_type(&self) -> MediaType {
        match self {
            CatalogList::NowPlaying
            | CatalogList::Upcoming
            | CatalogList::PopularMovies
            | CatalogList::TopRatedMovies => MediaType::Movie,
            CatalogList::PopularTv | CatalogList::TopRatedTv | CatalogList::OnTheAir => {
                MediaType::Tv
            }
        }
    }
}

/// Filter set for `/tmdb/discover/{type}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoverFilters {
    pub sort_by: String,
    pub with_genres: Option<String>,
    pub year: Option<i32>,
    pub vote_average_gte: Option<f64>,
    pub vote_average_lte: Option<f64>,
    pub with_watch_providers: Option<String>,
    pub with_original_language: Option<String>,
    pub watch_region: String,
}

impl Default for DiscoverFilters {
    fn default() -> Self {
        Self {
            sort_by: DEFAULT_SORT.to_string(),
            with_genres: None,
            year: None,
            vote_average_gte: None,
            vote_average_lte: None,
            with_watch_providers: None,
            with_original_language: None,
            watch_region: DEFAULT_WATCH_REGION.to_string(),
        }
    }
}

impl DiscoverFilters {
    pub fn sort_by(mut self, sort_by: impl Into<String>) -> Self {
        self.sort_by = sort_by.into();
        self
    }

    pub fn genre(mut self, genre_id: i64) -> Self {
        self.with_genres = Some(genre_id.to_string());
        self
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Rating window on TMDB's 0-10 scale; bounds at the ends of the scale are dropped
    pub fn rating_between(mut self, min: f64, max: f64) -> Self {
        self.vote_average_gte = (min > 0.0).then_some(min);
        self.vote_average_lte = (max < 10.0).then_some(max);
        self
    }

    pub fn provider(mut self, provider_id: i64, watch_region: impl Into<String>) -> Self {
        self.with_watch_providers = Some(provider_id.to_string());
        self.watch_region = watch_region.into();
        self
    }

    pub fn original_language(mut self, language: impl Into<String>) -> Self {
        self.with_original_language = Some(language.into());
        self
    }

    /// True when anything differs from an unfiltered, popularity-sorted browse
    pub fn has_active_filters(&self) -> bool {
        self.sort_by != DEFAULT_SORT
            || self.with_genres.is_some()
            || self.year.is_some()
            || self.vote_average_gte.is_some()
            || self.vote_average_lte.is_some()
            || self.with_watch_providers.is_some()
            || self.with_original_language.is_some()
    }

    /// Query parameters for the given page
    pub fn to_query(&self, page: u32) -> Vec<(&'static str, String)> {
        let mut query = vec![("page", page.to_string()), ("sort_by", self.sort_by.clone())];

        if let Some(genres) = &self.with_genres {
            query.push(("with_genres", genres.clone()));
        }
        if let Some(year) = self.year {
            query.push(("year", year.to_string()));
        }
        if let Some(gte) = self.vote_average_gte {
            query.push(("vote_average_gte", gte.to_string()));
        }
        if let Some(lte) = self.vote_average_lte {
            query.push(("vote_average_lte", lte.to_string()));
        }
        if let Some(providers) = &self.with_watch_providers {
            query.push(("with_watch_providers", providers.clone()));
            // region only matters alongside a provider filter
            query.push(("watch_region", self.watch_region.clone()));
        }
        if let Some(language) = &self.with_original_language {
            query.push(("with_original_language", language.clone()));
        }

        query
    }
}

/// Orders providers for display: the `popular` ids first in the order given,
/// then everything else alphabetically by name.
pub fn sort_providers(mut providers: Vec<WatchProvider>, popular: &[i64]) -> Vec<WatchProvider> {
    let rank = |p: &WatchProvider| popular.iter().position(|id| *id == p.provider_id);

    providers.sort_by(|a, b| match (rank(a), rank(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a
            .provider_name
            .to_lowercase()
            .cmp(&b.provider_name.to_lowercase()),
    });

    providers
}

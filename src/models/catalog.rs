use serde::{Deserialize, Serialize};

use super::MediaType;

/// TMDB limits paging to 500 pages regardless of the reported total
pub const MAX_BROWSABLE_PAGES: u32 = 500;

// ============================================================================
// Catalog listings
// ============================================================================

/// A movie or TV title as normalized by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogMedia {
    pub id: i64,
    /// "movie" or "tv" for titles; trending may also report other kinds
    #[serde(default = "default_media_type")]
    pub media_type: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<u64>,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub genre_ids: Vec<i64>,
    #[serde(default)]
    pub genres: Vec<Genre>,
}

fn default_media_type() -> String {
    "movie".to_string()
}

impl CatalogMedia {
    /// The media type if this is a movie or TV title
    pub fn kind(&self) -> Option<MediaType> {
        self.media_type.parse().ok()
    }

    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.original_title.as_deref())
            .unwrap_or_default()
    }

    /// Release (or first air) year, e.g. "2010"
    pub fn year(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .and_then(|d| d.get(..4))
    }
}

/// One page of catalog results
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MediaPage {
    #[serde(default)]
    pub results: Vec<CatalogMedia>,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u64,
}

fn first_page() -> u32 {
    1
}

impl MediaPage {
    /// Total pages a caller can actually page through
    pub fn browsable_pages(&self) -> u32 {
        self.total_pages.min(MAX_BROWSABLE_PAGES)
    }

    pub fn has_more(&self) -> bool {
        self.page < self.browsable_pages()
    }

    /// Narrows a mixed search page down to one media type
    pub fn retain_media_type(&mut self, media_type: MediaType) {
        self.results.retain(|m| m.kind() == Some(media_type));
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenreList {
    #[serde(default)]
    pub genres: Vec<Genre>,
}

/// A streaming provider (Netflix, Hulu, ...)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WatchProvider {
    pub provider_id: i64,
    pub provider_name: String,
    #[serde(default)]
    pub logo_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderList {
    #[serde(default)]
    pub providers: Vec<WatchProvider>,
}

// ============================================================================
// Details
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CastMember {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CrewMember {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub job: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
}

/// Where a title can be streamed, rented or bought
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StreamingOffers {
    #[serde(default)]
    pub flatrate: Vec<WatchProvider>,
    #[serde(default)]
    pub rent: Vec<WatchProvider>,
    #[serde(default)]
    pub buy: Vec<WatchProvider>,
}

impl StreamingOffers {
    pub fn is_empty(&self) -> bool {
        self.flatrate.is_empty() && self.rent.is_empty() && self.buy.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    #[serde(flatten)]
    pub media: CatalogMedia,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub budget: Option<u64>,
    #[serde(default)]
    pub revenue: Option<u64>,
    #[serde(default)]
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
    #[serde(default)]
    pub trailer_url: Option<String>,
    #[serde(default)]
    pub streaming: StreamingOffers,
    #[serde(default)]
    pub recommendations: Vec<CatalogMedia>,
}

impl MovieDetails {
    /// Runtime formatted as "2h 19m" (or "45m" under an hour)
    pub fn formatted_runtime(&self) -> Option<String> {
        self.runtime.filter(|m| *m > 0).map(format_runtime)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Network {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub logo_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TvDetails {
    #[serde(flatten)]
    pub media: CatalogMedia,
    #[serde(default)]
    pub number_of_seasons: Option<u32>,
    #[serde(default)]
    pub number_of_episodes: Option<u32>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub episode_run_time: Vec<u32>,
    #[serde(default)]
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub networks: Vec<Network>,
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
    #[serde(default)]
    pub trailer_url: Option<String>,
    #[serde(default)]
    pub streaming: StreamingOffers,
    #[serde(default)]
    pub recommendations: Vec<CatalogMedia>,
}

fn format_runtime(minutes: u32) -> String {
    let (hours, mins) = (minutes / 60, minutes % 60);
    if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{}m", mins)
    }
}

// ============================================================================
// Ratings & health
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImdbRating {
    pub value: String,
    #[serde(default)]
    pub votes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RatingValue {
    pub value: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RatingSet {
    #[serde(default)]
    pub imdb: Option<ImdbRating>,
    #[serde(default)]
    pub rotten_tomatoes: Option<RatingValue>,
    #[serde(default)]
    pub metacritic: Option<RatingValue>,
}

/// IMDb, Rotten Tomatoes and Metacritic ratings for a title
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExternalRatings {
    #[serde(default)]
    pub ratings: Option<RatingSet>,
    #[serde(default)]
    pub rated: Option<String>,
    #[serde(default)]
    pub awards: Option<String>,
    #[serde(default)]
    pub box_office: Option<String>,
}

/// Backend liveness report
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Health {
    pub status: String,
    #[serde(default)]
    pub tmdb_api: Option<String>,
    #[serde(default)]
    pub omdb_api: Option<String>,
}

impl Health {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

//! In-process stand-in for the CineVault backend.
//!
//! Serves the `/api` REST surface from in-memory state, records every request
//! line, and can be told to fail mutations or delay responses.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, Request, State},
    http::{Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use cinevault_client::models::{
    ItemUpdate, NewProfile, NewWatchlist, NewWatchlistItem, Profile, Watchlist, WatchlistItem,
};

/// Shared fake backend state
#[derive(Clone, Default)]
pub struct FakeBackend {
    pub inner: Arc<RwLock<BackendState>>,
}

#[derive(Default)]
pub struct BackendState {
    pub users: Vec<Profile>,
    pub watchlists: Vec<Watchlist>,
    /// "METHOD /path?query" for every request received
    pub requests: Vec<String>,
    /// When set, every non-GET request fails with this status
    pub fail_mutations: Option<StatusCode>,
    /// When set, every request is delayed by this long
    pub delay: Option<Duration>,
}

type ApiError = (StatusCode, Json<Value>);
type HandlerResult<T> = Result<Json<T>, ApiError>;

fn detail(status: StatusCode, message: &str) -> ApiError {
    (status, Json(json!({ "detail": message })))
}

fn ack(message: &str) -> HandlerResult<Value> {
    Ok(Json(json!({ "message": message })))
}

impl FakeBackend {
    /// Starts the backend on an ephemeral port and returns it with its `/api` base URL
    pub async fn spawn() -> (Self, String) {
        let backend = FakeBackend::default();
        let app = create_router(backend.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (backend, format!("http://{}/api", addr))
    }

    pub async fn requests(&self) -> Vec<String> {
        self.inner.read().await.requests.clone()
    }

    pub async fn fail_mutations(&self, status: Option<StatusCode>) {
        self.inner.write().await.fail_mutations = status;
    }

    pub async fn set_delay(&self, delay: Option<Duration>) {
        self.inner.write().await.delay = delay;
    }

    pub async fn seed_user(&self, id: &str, name: &str) -> Profile {
        let profile = Profile {
            id: id.to_string(),
            name: name.to_string(),
            avatar_color: "#6366f1".to_string(),
            created_at: Some(chrono::Utc::now()),
        };
        self.inner.write().await.users.push(profile.clone());
        profile
    }

    pub async fn seed_watchlist(&self, id: &str, user_id: &str, name: &str) -> Watchlist {
        let watchlist = Watchlist {
            id: id.to_string(),
            owner_profile_id: user_id.to_string(),
            name: name.to_string(),
            items: Vec::new(),
            created_at: Some(chrono::Utc::now()),
        };
        self.inner.write().await.watchlists.push(watchlist.clone());
        watchlist
    }

    pub async fn watchlist(&self, id: &str) -> Option<Watchlist> {
        let state = self.inner.read().await;
        state.watchlists.iter().find(|w| w.id == id).cloned()
    }
}

/// Creates the fake backend router
pub fn create_router(backend: FakeBackend) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(middleware::from_fn_with_state(backend.clone(), intercept))
        .with_state(backend)
}

fn api_routes() -> Router<FakeBackend> {
    Router::new()
        .route("/health", get(health_check))
        // Profiles
        .route("/users", get(list_users).post(create_user))
        .route("/users/:id", get(get_user).delete(delete_user))
        // Watchlists
        .route("/watchlists", get(list_watchlists).post(create_watchlist))
        .route(
            "/watchlists/:id",
            get(get_watchlist).put(rename_watchlist).delete(delete_watchlist),
        )
        .route("/watchlists/:id/items", axum::routing::post(add_item))
        .route(
            "/watchlists/:id/items/:item_id",
            axum::routing::put(update_item).delete(remove_item),
        )
        // Catalog
        .route("/tmdb/genres", get(genres))
        .route("/tmdb/trending", get(media_page))
        .route("/tmdb/movie/now-playing", get(media_page))
        .route("/tmdb/movie/upcoming", get(media_page))
        .route("/tmdb/movie/popular", get(media_page))
        .route("/tmdb/movie/top-rated", get(media_page))
        .route("/tmdb/tv/popular", get(media_page))
        .route("/tmdb/tv/top-rated", get(media_page))
        .route("/tmdb/tv/on-the-air", get(media_page))
        .route("/tmdb/search", get(search))
        .route("/tmdb/discover/:media_type", get(media_page))
        .route("/tmdb/movie/:id", get(movie_details))
        .route("/tmdb/tv/:id", get(tv_details))
        .route("/tmdb/watch-providers", get(watch_providers))
        .route("/omdb/:imdb_id", get(omdb))
}

/// Records the request line, then applies injected delay/failure
async fn intercept(State(backend): State<FakeBackend>, request: Request, next: Next) -> Response {
    let line = format!("{} {}", request.method(), request.uri());
    let (delay, fail) = {
        let mut state = backend.inner.write().await;
        state.requests.push(line);
        (state.delay, state.fail_mutations)
    };

    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    if let Some(status) = fail {
        if request.method() != Method::GET {
            return detail(status, "injected failure").into_response();
        }
    }

    next.run(request).await
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "tmdb_api": "configured",
        "omdb_api": "not_configured"
    }))
}

// ---- profiles ----

async fn list_users(State(backend): State<FakeBackend>) -> Json<Vec<Profile>> {
    Json(backend.inner.read().await.users.clone())
}

async fn create_user(
    State(backend): State<FakeBackend>,
    Json(body): Json<NewProfile>,
) -> HandlerResult<Profile> {
    let profile = Profile {
        id: Uuid::new_v4().to_string(),
        name: body.name,
        avatar_color: body.avatar_color,
        created_at: Some(chrono::Utc::now()),
    };
    backend.inner.write().await.users.push(profile.clone());
    Ok(Json(profile))
}

async fn get_user(
    State(backend): State<FakeBackend>,
    Path(id): Path<String>,
) -> HandlerResult<Profile> {
    let state = backend.inner.read().await;
    state
        .users
        .iter()
        .find(|u| u.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "User not found"))
}

async fn delete_user(
    State(backend): State<FakeBackend>,
    Path(id): Path<String>,
) -> HandlerResult<Value> {
    let mut state = backend.inner.write().await;
    let before = state.users.len();
    state.users.retain(|u| u.id != id);
    if state.users.len() == before {
        return Err(detail(StatusCode::NOT_FOUND, "User not found"));
    }
    state.watchlists.retain(|w| w.owner_profile_id != id);
    ack("User deleted")
}

// ---- watchlists ----

#[derive(Deserialize)]
struct OwnerQuery {
    user_id: String,
}

async fn list_watchlists(
    State(backend): State<FakeBackend>,
    Query(query): Query<OwnerQuery>,
) -> Json<Vec<Watchlist>> {
    let state = backend.inner.read().await;
    Json(
        state
            .watchlists
            .iter()
            .filter(|w| w.owner_profile_id == query.user_id)
            .cloned()
            .collect(),
    )
}

async fn create_watchlist(
    State(backend): State<FakeBackend>,
    Json(body): Json<NewWatchlist>,
) -> HandlerResult<Watchlist> {
    let watchlist = Watchlist {
        id: Uuid::new_v4().to_string(),
        owner_profile_id: body.user_id,
        name: body.name,
        items: Vec::new(),
        created_at: Some(chrono::Utc::now()),
    };
    backend.inner.write().await.watchlists.push(watchlist.clone());
    Ok(Json(watchlist))
}

async fn get_watchlist(
    State(backend): State<FakeBackend>,
    Path(id): Path<String>,
) -> HandlerResult<Watchlist> {
    backend
        .watchlist(&id)
        .await
        .map(Json)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Watchlist not found"))
}

#[derive(Deserialize)]
struct NameQuery {
    name: String,
}

async fn rename_watchlist(
    State(backend): State<FakeBackend>,
    Path(id): Path<String>,
    Query(query): Query<NameQuery>,
) -> HandlerResult<Value> {
    let mut state = backend.inner.write().await;
    let watchlist = state
        .watchlists
        .iter_mut()
        .find(|w| w.id == id)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Watchlist not found"))?;
    watchlist.name = query.name;
    ack("Watchlist updated")
}

async fn delete_watchlist(
    State(backend): State<FakeBackend>,
    Path(id): Path<String>,
) -> HandlerResult<Value> {
    let mut state = backend.inner.write().await;
    let before = state.watchlists.len();
    state.watchlists.retain(|w| w.id != id);
    if state.watchlists.len() == before {
        return Err(detail(StatusCode::NOT_FOUND, "Watchlist not found"));
    }
    ack("Watchlist deleted")
}

// ---- items ----

async fn add_item(
    State(backend): State<FakeBackend>,
    Path(id): Path<String>,
    Json(body): Json<NewWatchlistItem>,
) -> HandlerResult<WatchlistItem> {
    let mut state = backend.inner.write().await;
    let watchlist = state
        .watchlists
        .iter_mut()
        .find(|w| w.id == id)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Watchlist not found"))?;

    if watchlist.find_item(body.tmdb_id, body.media_type).is_some() {
        return Err(detail(StatusCode::BAD_REQUEST, "Item already in watchlist"));
    }

    let item = WatchlistItem {
        id: Uuid::new_v4().to_string(),
        tmdb_id: body.tmdb_id,
        media_type: body.media_type,
        title: body.title,
        poster_path: body.poster_path,
        status: body.status,
        added_at: Some(chrono::Utc::now()),
    };
    watchlist.items.push(item.clone());
    Ok(Json(item))
}

async fn update_item(
    State(backend): State<FakeBackend>,
    Path((id, item_id)): Path<(String, String)>,
    Json(body): Json<ItemUpdate>,
) -> HandlerResult<Value> {
    let mut state = backend.inner.write().await;
    let item = state
        .watchlists
        .iter_mut()
        .find(|w| w.id == id)
        .and_then(|w| w.item_mut(&item_id))
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Item not found"))?;

    if let Some(status) = body.status {
        item.status = status;
    }
    ack("Item updated")
}

async fn remove_item(
    State(backend): State<FakeBackend>,
    Path((id, item_id)): Path<(String, String)>,
) -> HandlerResult<Value> {
    let mut state = backend.inner.write().await;
    let removed = state
        .watchlists
        .iter_mut()
        .find(|w| w.id == id)
        .map(|w| w.remove_item(&item_id))
        .unwrap_or(false);

    if !removed {
        return Err(detail(StatusCode::NOT_FOUND, "Item not found"));
    }
    ack("Item removed")
}

// ---- catalog ----

fn media(id: i64, media_type: &str, title: &str) -> Value {
    json!({
        "id": id,
        "media_type": media_type,
        "title": title,
        "poster_path": format!("https://image.tmdb.org/t/p/w342/{}.jpg", id),
        "release_date": "1999-10-15",
        "vote_average": 8.4,
        "genre_ids": [18]
    })
}

async fn genres() -> Json<Value> {
    Json(json!({ "genres": [{"id": 28, "name": "Action"}, {"id": 18, "name": "Drama"}] }))
}

async fn media_page(Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    let page: u32 = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    Json(json!({
        "results": [media(550, "movie", "Fight Club"), media(1399, "tv", "Game of Thrones")],
        "page": page,
        "total_pages": 38_112,
        "total_results": 762_240
    }))
}

async fn search(Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    let q = query.get("query").cloned().unwrap_or_default();
    Json(json!({
        "results": [media(550, "movie", &q), media(1399, "tv", &q)],
        "page": 1,
        "total_pages": 1,
        "total_results": 2
    }))
}

async fn movie_details(Path(id): Path<i64>) -> HandlerResult<Value> {
    if id != 550 {
        return Err(detail(StatusCode::NOT_FOUND, "Movie not found"));
    }
    let mut details = media(550, "movie", "Fight Club");
    details["runtime"] = json!(139);
    details["imdb_id"] = json!("tt0137523");
    details["trailer_url"] = json!("https://www.youtube.com/embed/qtRKdVHc-cE");
    details["cast"] = json!([{"id": 819, "name": "Edward Norton", "character": "The Narrator"}]);
    details["crew"] = json!([{"id": 7467, "name": "David Fincher", "job": "Director", "department": "Directing"}]);
    details["streaming"] = json!({
        "flatrate": [{"provider_id": 8, "provider_name": "Netflix"}],
        "rent": [],
        "buy": [{"provider_id": 2, "provider_name": "Apple TV"}]
    });
    details["recommendations"] = json!([media(807, "movie", "Se7en")]);
    Ok(Json(details))
}

async fn tv_details(Path(id): Path<i64>) -> HandlerResult<Value> {
    if id != 1399 {
        return Err(detail(StatusCode::NOT_FOUND, "TV show not found"));
    }
    let mut details = media(1399, "tv", "Game of Thrones");
    details["number_of_seasons"] = json!(8);
    details["number_of_episodes"] = json!(73);
    details["episode_run_time"] = json!([60]);
    details["networks"] = json!([{"id": 49, "name": "HBO"}]);
    Ok(Json(details))
}

async fn watch_providers() -> Json<Value> {
    Json(json!({
        "providers": [
            {"provider_id": 300, "provider_name": "Pluto TV"},
            {"provider_id": 8, "provider_name": "Netflix"},
            {"provider_id": 2, "provider_name": "Apple TV"},
            {"provider_id": 337, "provider_name": "Disney Plus"}
        ]
    }))
}

async fn omdb(Path(imdb_id): Path<String>) -> Json<Value> {
    if imdb_id != "tt0137523" {
        return Json(json!({ "ratings": null }));
    }
    Json(json!({
        "ratings": {
            "imdb": {"value": "8.8", "votes": "2400000"},
            "rotten_tomatoes": {"value": "79%"},
            "metacritic": {"value": "67/100"}
        },
        "rated": "R",
        "awards": "Nominated for 1 Oscar.",
        "box_office": "$37,030,102"
    }))
}

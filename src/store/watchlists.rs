use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    api::CineVaultApi,
    error::{AppError, AppResult},
    models::{
        find_by_media, MediaType, NewWatchlistItem, SavedEntry, WatchStatus, Watchlist,
        WatchlistItem,
    },
    store::SessionStore,
};

/// The active profile's watchlists
///
/// Every mutation awaits the backend first and only then patches the held
/// collection to mirror what the backend just did. Failed calls leave the
/// collection untouched and hand the error back to the caller.
#[derive(Clone)]
pub struct WatchlistStore {
    api: Arc<dyn CineVaultApi>,
    session: SessionStore,
    inner: Arc<RwLock<WatchlistState>>,
}

#[derive(Debug, Default)]
struct WatchlistState {
    /// Profile whose watchlists are held
    owner: Option<String>,
    /// Bumped whenever the owner changes; patches from an older scope are dropped
    generation: u64,
    watchlists: Vec<Watchlist>,
    loading: bool,
}

impl WatchlistStore {
    pub fn new(api: Arc<dyn CineVaultApi>, session: SessionStore) -> Self {
        Self {
            api,
            session,
            inner: Arc::new(RwLock::new(WatchlistState::default())),
        }
    }

    /// Aligns the store with the session's active profile.
    ///
    /// On a profile change the held watchlists are dropped immediately; the
    /// new profile's watchlists are then fetched. With no active profile the
    /// store stays empty and no request is made.
    pub async fn sync(&self) {
        let target = self.session.active().await.map(|p| p.id);

        let generation = {
            let mut state = self.inner.write().await;
            if state.owner == target {
                return;
            }
            state.generation += 1;
            state.owner = target.clone();
            state.watchlists.clear();
            state.loading = target.is_some();
            state.generation
        };

        match target {
            Some(owner) => self.load(owner, generation).await,
            None => tracing::debug!("No active profile, watchlists cleared"),
        }
    }

    /// Applies [`sync`](Self::sync) on every active-profile change until the
    /// returned future is dropped.
    pub async fn follow_session(&self) {
        let mut changes = self.session.subscribe();
        self.sync().await;
        while changes.changed().await.is_ok() {
            self.sync().await;
        }
    }

    /// Refetches the current owner's watchlists
    pub async fn refresh(&self) {
        let (owner, generation) = {
            let state = self.inner.read().await;
            (state.owner.clone(), state.generation)
        };

        if let Some(owner) = owner {
            self.load(owner, generation).await;
        }
    }

    async fn load(&self, owner: String, generation: u64) {
        {
            let mut state = self.inner.write().await;
            if state.generation != generation {
                return;
            }
            state.loading = true;
        }

        let fetched = self.api.list_watchlists(&owner).await;

        let mut state = self.inner.write().await;
        if state.generation != generation {
            tracing::debug!(profile_id = %owner, "Discarding watchlists of a previous profile");
            return;
        }

        match fetched {
            Ok(watchlists) => {
                tracing::info!(
                    profile_id = %owner,
                    watchlists = watchlists.len(),
                    "Watchlists loaded"
                );
                state.watchlists = watchlists;
            }
            Err(e) => {
                tracing::error!(error = %e, profile_id = %owner, "Failed to fetch watchlists");
            }
        }
        state.loading = false;
    }

    async fn current_generation(&self) -> u64 {
        self.inner.read().await.generation
    }

    /// Applies a reconciliation patch unless the owning scope changed while
    /// the request was in flight.
    async fn patch<F>(&self, generation: u64, apply: F)
    where
        F: FnOnce(&mut Vec<Watchlist>),
    {
        let mut state = self.inner.write().await;
        if state.generation != generation {
            tracing::debug!("Profile changed during request, skipping local patch");
            return;
        }
        apply(&mut state.watchlists);
    }

    /// Creates a watchlist for the session's active profile; `Ok(None)` when
    /// nobody is active.
    ///
    /// A store still holding another profile's lists is synced first, so the
    /// new list lands in the active profile's collection.
    pub async fn create(&self, name: &str) -> AppResult<Option<Watchlist>> {
        let Some(active) = self.session.active().await else {
            return Ok(None);
        };

        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidInput(
                "Watchlist name cannot be empty".to_string(),
            ));
        }

        if self.owner().await.as_deref() != Some(active.id.as_str()) {
            self.sync().await;
        }

        // only patch a collection that belongs to the profile the list was created for
        let generation = {
            let state = self.inner.read().await;
            (state.owner.as_deref() == Some(active.id.as_str())).then_some(state.generation)
        };

        let watchlist = self.api.create_watchlist(&active.id, name).await?;
        tracing::info!(
            watchlist_id = %watchlist.id,
            profile_id = %active.id,
            name = %watchlist.name,
            "Watchlist created"
        );

        if let Some(generation) = generation {
            let created = watchlist.clone();
            self.patch(generation, move |lists| lists.push(created)).await;
        }
        Ok(Some(watchlist))
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let generation = self.current_generation().await;
        self.api.delete_watchlist(id).await?;

        self.patch(generation, |lists| lists.retain(|w| w.id != id))
            .await;
        Ok(())
    }

    /// Renames a watchlist; its items are left alone
    pub async fn rename(&self, id: &str, name: &str) -> AppResult<()> {
        let generation = self.current_generation().await;
        self.api.rename_watchlist(id, name).await?;

        self.patch(generation, |lists| {
            if let Some(list) = lists.iter_mut().find(|w| w.id == id) {
                list.name = name.to_string();
            }
        })
        .await;
        Ok(())
    }

    /// Adds a title; duplicates are rejected by the backend, not checked here
    pub async fn add_item(
        &self,
        watchlist_id: &str,
        item: &NewWatchlistItem,
    ) -> AppResult<WatchlistItem> {
        let generation = self.current_generation().await;
        let added = self.api.add_item(watchlist_id, item).await?;

        tracing::info!(
            watchlist_id = %watchlist_id,
            item_id = %added.id,
            tmdb_id = added.tmdb_id,
            media_type = %added.media_type,
            "Item added"
        );

        let patched = added.clone();
        self.patch(generation, move |lists| {
            if let Some(list) = lists.iter_mut().find(|w| w.id == watchlist_id) {
                list.items.push(patched);
            }
        })
        .await;
        Ok(added)
    }

    pub async fn remove_item(&self, watchlist_id: &str, item_id: &str) -> AppResult<()> {
        let generation = self.current_generation().await;
        self.api.remove_item(watchlist_id, item_id).await?;

        self.patch(generation, |lists| {
            if let Some(list) = lists.iter_mut().find(|w| w.id == watchlist_id) {
                list.remove_item(item_id);
            }
        })
        .await;
        Ok(())
    }

    pub async fn update_item_status(
        &self,
        watchlist_id: &str,
        item_id: &str,
        status: WatchStatus,
    ) -> AppResult<()> {
        let generation = self.current_generation().await;
        self.api
            .update_item_status(watchlist_id, item_id, status)
            .await?;

        self.patch(generation, |lists| {
            if let Some(item) = lists
                .iter_mut()
                .find(|w| w.id == watchlist_id)
                .and_then(|w| w.item_mut(item_id))
            {
                item.status = status;
            }
        })
        .await;
        Ok(())
    }

    /// Reads the held watchlists, or nothing if they belong to a profile that
    /// is no longer active.
    async fn read_scoped<R>(&self, read: impl FnOnce(&[Watchlist]) -> R) -> R {
        let active = self.session.active().await.map(|p| p.id);
        let state = self.inner.read().await;
        if state.owner == active {
            read(&state.watchlists)
        } else {
            let empty: &[Watchlist] = &[];
            read(empty)
        }
    }

    /// First saved occurrence of a catalog title across all held watchlists.
    /// This is what "already saved" means throughout the UI.
    pub async fn find_by_media(&self, tmdb_id: i64, media_type: MediaType) -> Option<SavedEntry> {
        self.read_scoped(|lists| {
            find_by_media(lists, tmdb_id, media_type).map(|(watchlist, item)| SavedEntry {
                watchlist: watchlist.clone(),
                item: item.clone(),
            })
        })
        .await
    }

    pub async fn watchlists(&self) -> Vec<Watchlist> {
        self.read_scoped(|lists| lists.to_vec()).await
    }

    pub async fn watchlist(&self, id: &str) -> Option<Watchlist> {
        self.read_scoped(|lists| lists.iter().find(|w| w.id == id).cloned())
            .await
    }

    pub async fn is_loading(&self) -> bool {
        self.inner.read().await.loading
    }

    /// Profile whose watchlists are currently held
    pub async fn owner(&self) -> Option<String> {
        self.inner.read().await.owner.clone()
    }
}

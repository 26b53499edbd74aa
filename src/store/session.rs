use std::sync::Arc;

use tokio::sync::{watch, RwLock};

use crate::{
    api::CineVaultApi,
    error::{AppError, AppResult},
    models::Profile,
    storage::{LocalStorage, StorageKey},
};

/// Known profiles and the currently active one
///
/// Cheap to clone; clones share state. The active profile id is the only
/// piece of state persisted across restarts.
#[derive(Clone)]
pub struct SessionStore {
    api: Arc<dyn CineVaultApi>,
    storage: Arc<dyn LocalStorage>,
    inner: Arc<RwLock<SessionState>>,
    active_tx: Arc<watch::Sender<Option<Profile>>>,
}

#[derive(Debug, Default)]
struct SessionState {
    profiles: Vec<Profile>,
    /// Always an element of `profiles` when set
    active: Option<Profile>,
    ready: bool,
}

impl SessionStore {
    pub fn new(api: Arc<dyn CineVaultApi>, storage: Arc<dyn LocalStorage>) -> Self {
        let (active_tx, _) = watch::channel(None);
        Self {
            api,
            storage,
            inner: Arc::new(RwLock::new(SessionState::default())),
            active_tx: Arc::new(active_tx),
        }
    }

    /// Loads the profile list and restores the persisted selection.
    ///
    /// Never fails: a failed fetch is logged, leaves the store without
    /// profiles and still marks it ready.
    pub async fn initialize(&self) {
        self.load_profiles().await;
    }

    /// Refetches the profile list. An active profile that no longer exists
    /// on the backend is deselected.
    pub async fn refresh(&self) {
        self.load_profiles().await;
    }

    async fn load_profiles(&self) {
        let fetched = self.api.list_profiles().await;
        let saved_id = self.saved_profile_id();

        let active = {
            let mut state = self.inner.write().await;
            match fetched {
                Ok(profiles) => {
                    let current_id = state.active.as_ref().map(|p| p.id.clone());
                    let restored = [saved_id.as_deref(), current_id.as_deref()]
                        .into_iter()
                        .flatten()
                        .find_map(|id| profiles.iter().find(|p| p.id == id))
                        .cloned();

                    tracing::info!(
                        profiles = profiles.len(),
                        active = ?restored.as_ref().map(|p| &p.id),
                        "Profiles loaded"
                    );

                    state.profiles = profiles;
                    state.active = restored;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to fetch profiles");
                }
            }
            state.ready = true;
            state.active.clone()
        };

        self.publish(active);
    }

    fn saved_profile_id(&self) -> Option<String> {
        self.storage
            .get(StorageKey::ActiveProfile)
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to read saved profile id");
                None
            })
    }

    /// Makes `profile` active and remembers it across restarts.
    ///
    /// Fails with `NotFound` if the profile is not among the loaded profiles.
    pub async fn select(&self, profile: &Profile) -> AppResult<()> {
        let selected = {
            let mut state = self.inner.write().await;
            let known = state
                .profiles
                .iter()
                .find(|p| p.id == profile.id)
                .cloned()
                .ok_or_else(|| AppError::NotFound(format!("profile {}", profile.id)))?;
            state.active = Some(known.clone());
            known
        };

        if let Err(e) = self.storage.set(StorageKey::ActiveProfile, &selected.id) {
            tracing::warn!(error = %e, profile_id = %selected.id, "Failed to persist active profile");
        }

        tracing::debug!(profile_id = %selected.id, "Profile selected");
        self.publish(Some(selected));
        Ok(())
    }

    /// Clears the active profile and forgets the persisted selection
    pub async fn logout(&self) {
        self.inner.write().await.active = None;
        self.forget_selection();
    }

    fn forget_selection(&self) {
        if let Err(e) = self.storage.remove(StorageKey::ActiveProfile) {
            tracing::warn!(error = %e, "Failed to clear persisted profile");
        }

        self.publish(None);
    }

    pub async fn create(&self, name: &str, avatar_color: &str) -> AppResult<Profile> {
        let profile = self.api.create_profile(name, avatar_color).await?;
        self.inner.write().await.profiles.push(profile.clone());
        Ok(profile)
    }

    /// Deletes a profile; removing the active profile also logs out
    pub async fn remove(&self, id: &str) -> AppResult<()> {
        self.api.delete_profile(id).await?;

        // active is cleared under the same guard so it never outlives its profile
        let was_active = {
            let mut state = self.inner.write().await;
            state.profiles.retain(|p| p.id != id);
            let was_active = state.active.as_ref().is_some_and(|p| p.id == id);
            if was_active {
                state.active = None;
            }
            was_active
        };

        tracing::info!(profile_id = %id, was_active, "Profile removed");

        if was_active {
            self.forget_selection();
        }
        Ok(())
    }

    pub async fn profiles(&self) -> Vec<Profile> {
        self.inner.read().await.profiles.clone()
    }

    pub async fn active(&self) -> Option<Profile> {
        self.inner.read().await.active.clone()
    }

    /// False until the first profile load has finished (successfully or not)
    pub async fn is_ready(&self) -> bool {
        self.inner.read().await.ready
    }

    /// Receiver notified whenever the active profile changes
    pub fn subscribe(&self) -> watch::Receiver<Option<Profile>> {
        self.active_tx.subscribe()
    }

    fn publish(&self, active: Option<Profile>) {
        self.active_tx.send_if_modified(|current| {
            if *current == active {
                false
            } else {
                *current = active;
                true
            }
        });
    }
}

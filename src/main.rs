use std::sync::Arc;

use cinevault_client::{
    api::CineVaultApi, logging, storage::FileStorage, Config, HttpApiClient, SessionStore,
    WatchlistStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    logging::init_tracing(&config.log_filter)?;

    let api: Arc<dyn CineVaultApi> = Arc::new(HttpApiClient::from_config(&config)?);
    let storage = Arc::new(FileStorage::new(&config.storage_path));

    match api.health().await {
        Ok(health) => tracing::info!(
            status = %health.status,
            tmdb = ?health.tmdb_api,
            omdb = ?health.omdb_api,
            "Backend reachable"
        ),
        Err(e) => tracing::warn!(error = %e, api_url = %config.api_base(), "Backend health check failed"),
    }

    if let Ok(list) = api.watch_providers(&config.watch_region).await {
        tracing::debug!(
            region = %config.watch_region,
            providers = list.providers.len(),
            "Watch providers available"
        );
    }

    // Restore the session
    let session = SessionStore::new(api.clone(), storage);
    session.initialize().await;

    let watchlists = WatchlistStore::new(api, session.clone());
    watchlists.sync().await;

    let Some(active) = session.active().await else {
        let profiles = session.profiles().await;
        println!("No active profile ({} known)", profiles.len());
        for profile in profiles {
            println!("  {} {}", profile.id, profile.name);
        }
        return Ok(());
    };

    println!("Active profile: {} ({})", active.name, active.id);
    for list in watchlists.watchlists().await {
        println!("{} [{} items]", list.name, list.items.len());
        for item in &list.items {
            println!(
                "  {:<14} {} ({} {})",
                item.status.label(),
                item.title,
                item.media_type,
                item.tmdb_id
            );
        }
    }

    Ok(())
}

//! Client-side state held for the presentation layer.
//!
//! [`SessionStore`] owns the profile list and the active profile;
//! [`WatchlistStore`] holds the active profile's watchlists and follows
//! the session whenever the active profile changes.

pub mod session;
pub mod watchlists;

pub use session::SessionStore;
pub use watchlists::WatchlistStore;

//! Application state shared across handlers.

use std::sync::Arc;

use wishlist_core::{WishlistRules, WishlistStore};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Holds the rules engine built over whichever
/// store was selected at start-up.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    rules: WishlistRules,
}

impl AppState {
    /// Create application state over an injected store.
    #[must_use]
    pub fn new(store: Arc<dyn WishlistStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                rules: WishlistRules::new(store),
            }),
        }
    }

    /// Get a reference to the wishlist rules engine.
    #[must_use]
    pub fn rules(&self) -> &WishlistRules {
        &self.inner.rules
    }
}

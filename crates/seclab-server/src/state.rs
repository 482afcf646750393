// SPDX-License-Identifier: Apache-2.0

//! Shared handler state.

use std::sync::Arc;

use seclab_core::{ResourceLocator, UserStore};

/// State handed to every handler. Cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    /// User database handle.
    pub store: UserStore,
    /// Downloads directory and its allow-list.
    pub locator: Arc<ResourceLocator>,
}

impl AppState {
    /// Bundles an initialized store and a locator.
    #[must_use]
    pub fn new(store: UserStore, locator: ResourceLocator) -> Self {
        Self {
            store,
            locator: Arc::new(locator),
        }
    }
}

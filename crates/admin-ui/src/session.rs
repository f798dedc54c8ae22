use std::sync::Arc;

use admin_client::{login, Access, ApiClient, Screen, SessionState, SessionStore};
use admin_types::{AuthToken, User};
use leptos::prelude::*;

use crate::storage::BrowserStorage;

type Store = Arc<SessionStore<BrowserStorage>>;

/// Session handle shared through context.
///
/// `state` mirrors the store so views re-render on login, logout and
/// profile changes. Until [`SessionContext::restore`] has run (browser only)
/// the state is "restoring", which the route guard renders as a wait.
#[derive(Clone, Copy)]
pub struct SessionContext {
    state: RwSignal<SessionState>,
    store: StoredValue<Option<Store>, LocalStorage>,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(SessionState::restoring()),
            store: StoredValue::new_local(None),
        }
    }

    /// Reads the persisted token and starts the profile fetch.
    pub fn restore(&self) {
        #[cfg(feature = "hydrate")]
        {
            let origin = window().location().origin().unwrap_or_default();
            match ApiClient::new(&origin) {
                Ok(client) => {
                    let store = Arc::new(SessionStore::restore(BrowserStorage, client));
                    self.store.set_value(Some(store));
                    self.sync();
                    self.refresh();
                }
                Err(e) => {
                    leptos::logging::warn!("cannot build API client for {origin}: {e}");
                    self.state.set(SessionState::default());
                }
            }
        }
    }

    fn sync(&self) {
        if let Some(store) = self.store.get_value() {
            self.state.set(store.state());
        }
    }

    fn refresh(&self) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(store) = self.store.get_value() {
                let state = self.state;
                wasm_bindgen_futures::spawn_local(async move {
                    store.refresh_profile().await;
                    state.set(store.state());
                });
            }
        }
    }

    pub fn access(&self) -> Access {
        self.state.with(Access::of)
    }

    pub fn token(&self) -> Option<AuthToken> {
        self.state.with(|state| state.token.clone())
    }

    pub fn user(&self) -> Option<User> {
        self.state.with(|state| state.user.clone())
    }

    /// Client snapshot for the current token. `None` before restore.
    pub fn client(&self) -> Option<ApiClient> {
        self.store
            .with_value(|store| store.as_ref().map(|store| store.client()))
    }

    pub fn logout(&self) {
        if let Some(store) = self.store.get_value() {
            store.logout();
            self.sync();
        }
    }

    /// Signs in and returns the screen to land on.
    pub async fn sign_in(&self, username: String, password: String) -> Result<Screen, String> {
        let Some(store) = self.store.get_value() else {
            return Err(login::NETWORK_ERROR.to_string());
        };
        let landing = login::sign_in(&store, &username, &password).await?;
        self.sync();
        self.refresh();
        Ok(landing)
    }
}

use admin_types::{AuthToken, Role, User};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::client::ApiClient;
use crate::storage::TokenStorage;

/// Snapshot of the authentication state.
///
/// `user` is only ever set while `token` is set and the profile fetch for
/// that token succeeded. `epoch` moves forward on every token change so a
/// profile reply can be matched to the token it was requested with.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub token: Option<AuthToken>,
    pub user: Option<User>,
    /// A profile fetch (or the initial restore) has not finished yet.
    pub pending: bool,
    pub epoch: u64,
}

impl SessionState {
    /// State used before the persisted token has been read.
    pub fn restoring() -> Self {
        Self {
            pending: true,
            ..Self::default()
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|user| user.role)
    }
}

/// Owns the session token, persists it and keeps the derived profile.
///
/// Observers either take [`SessionStore::state`] snapshots or follow changes
/// through [`SessionStore::subscribe`].
pub struct SessionStore<S> {
    storage: S,
    client: ApiClient,
    state: watch::Sender<SessionState>,
}

impl<S: TokenStorage> SessionStore<S> {
    /// Empty session; nothing is read from `storage`.
    pub fn new(storage: S, client: ApiClient) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self {
            storage,
            client: client.with_token(None),
            state,
        }
    }

    /// Session seeded from the persisted token. Storage that cannot be read
    /// counts as "no session".
    pub fn restore(storage: S, client: ApiClient) -> Self {
        let token = match storage.load() {
            Ok(token) => token.filter(|t| !t.is_empty()).map(AuthToken),
            Err(e) => {
                warn!("failed to read persisted session token: {e}");
                None
            }
        };
        info!("session restored (authenticated: {})", token.is_some());

        let store = Self::new(storage, client);
        store.state.send_modify(|state| {
            state.pending = token.is_some();
            state.token = token;
        });
        store
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn token(&self) -> Option<AuthToken> {
        self.state.borrow().token.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    /// Client snapshot carrying the current token.
    pub fn client(&self) -> ApiClient {
        self.client.with_token(self.token())
    }

    /// Client snapshot without credentials, for the login call itself.
    pub fn anonymous_client(&self) -> ApiClient {
        self.client.clone()
    }

    /// Adopts `token`. The profile is fetched separately through
    /// [`SessionStore::refresh_profile`].
    pub fn login(&self, token: AuthToken) {
        self.set_token(Some(token));
    }

    pub fn logout(&self) {
        self.set_token(None);
    }

    fn set_token(&self, token: Option<AuthToken>) {
        let persisted = match &token {
            Some(token) => self.storage.save(token.as_str()),
            None => self.storage.remove(),
        };
        if let Err(e) = persisted {
            warn!("failed to update persisted session token: {e}");
        }

        self.state.send_modify(|state| {
            state.pending = token.is_some();
            state.token = token;
            state.user = None;
            state.epoch += 1;
        });
        debug!("session token changed (epoch {})", self.state.borrow().epoch);
    }

    /// Fetches `/users/me` for the current token. Any failure leaves the
    /// token in place and clears the user. Returns the user that was applied.
    pub async fn refresh_profile(&self) -> Option<User> {
        let (epoch, client) = {
            let state = self.state.borrow();
            (state.epoch, self.client.with_token(state.token.clone()))
        };

        let user = match client.token() {
            None => None,
            Some(_) => match client.current_user().await {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!("failed to fetch current user: {e}");
                    None
                }
            },
        };

        if self.finish_refresh(epoch, user.clone()) {
            user
        } else {
            debug!("discarding profile for stale session epoch {epoch}");
            None
        }
    }

    /// Applies a profile result unless the token changed since `epoch`.
    pub(crate) fn finish_refresh(&self, epoch: u64, user: Option<User>) -> bool {
        self.state.send_if_modified(|state| {
            if state.epoch != epoch {
                return false;
            }
            state.user = if state.token.is_some() { user } else { None };
            state.pending = false;
            true
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, StorageError};

    struct BrokenStorage;

    impl TokenStorage for BrokenStorage {
        fn load(&self) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("disabled".into()))
        }
        fn save(&self, _token: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disabled".into()))
        }
        fn remove(&self) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disabled".into()))
        }
    }

    fn client() -> ApiClient {
        ApiClient::new("http://127.0.0.1:9").unwrap()
    }

    fn admin() -> User {
        User {
            uuid: "u-1".into(),
            username: "root".into(),
            role: Role::Admin,
        }
    }

    #[test]
    fn login_sets_header_and_persists() {
        let storage = MemoryStorage::new();
        let store = SessionStore::new(storage.clone(), client());

        for token in ["a", "b", "token with spaces"] {
            store.login(AuthToken::new(token));
            assert_eq!(
                store.client().authorization(),
                Some(format!("Bearer {token}"))
            );
            assert_eq!(storage.get().as_deref(), Some(token));
            assert!(store.state().pending);
        }
    }

    #[test]
    fn logout_clears_everything_from_any_state() {
        let storage = MemoryStorage::with_token("old");
        let store = SessionStore::restore(storage.clone(), client());
        assert!(store.finish_refresh(store.state().epoch, Some(admin())));
        assert!(store.user().is_some());

        store.logout();
        let state = store.state();
        assert_eq!(state.token, None);
        assert_eq!(state.user, None);
        assert!(!state.pending);
        assert_eq!(storage.get(), None);
        assert_eq!(store.client().authorization(), None);

        store.logout();
        assert_eq!(store.state().token, None);
        assert_eq!(storage.get(), None);
    }

    #[test]
    fn restore_reads_persisted_token() {
        let store = SessionStore::restore(MemoryStorage::with_token("saved"), client());
        let state = store.state();
        assert_eq!(state.token, Some(AuthToken::new("saved")));
        assert_eq!(state.user, None);
        assert!(state.pending);
    }

    #[test]
    fn restore_ignores_empty_entry() {
        let store = SessionStore::restore(MemoryStorage::with_token(""), client());
        assert_eq!(store.state().token, None);
        assert!(!store.state().pending);
    }

    #[test]
    fn unreadable_storage_means_no_session() {
        let store = SessionStore::restore(BrokenStorage, client());
        assert_eq!(store.state(), SessionState::default());

        // writes fail quietly too
        store.login(AuthToken::new("t"));
        assert_eq!(store.client().authorization().as_deref(), Some("Bearer t"));
        store.logout();
        assert_eq!(store.token(), None);
    }

    #[test]
    fn stale_profile_is_discarded() {
        let store = SessionStore::new(MemoryStorage::new(), client());
        store.login(AuthToken::new("first"));
        let staleEpoch = store.state().epoch;
        store.login(AuthToken::new("second"));

        assert!(!store.finish_refresh(staleEpoch, Some(admin())));
        assert_eq!(store.user(), None);
        assert!(store.state().pending);

        assert!(store.finish_refresh(store.state().epoch, Some(admin())));
        assert_eq!(store.user(), Some(admin()));
        assert!(!store.state().pending);
    }

    #[test]
    fn profile_never_outlives_token() {
        let store = SessionStore::new(MemoryStorage::new(), client());
        store.login(AuthToken::new("t"));
        assert!(store.finish_refresh(store.state().epoch, Some(admin())));
        store.logout();
        assert!(store.finish_refresh(store.state().epoch, Some(admin())));
        assert_eq!(store.user(), None);
    }

    #[tokio::test]
    async fn refresh_without_token_skips_the_network() {
        let store = SessionStore::new(MemoryStorage::new(), client());
        assert_eq!(store.refresh_profile().await, None);
        assert!(!store.state().pending);
    }

    #[tokio::test]
    async fn subscribers_see_token_changes() {
        let store = SessionStore::new(MemoryStorage::new(), client());
        let mut rx = store.subscribe();

        store.login(AuthToken::new("t"));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().token, Some(AuthToken::new("t")));

        store.logout();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().token, None);
    }
}

use admin_client::storage::TOKEN_KEY;
use admin_client::{StorageError, TokenStorage};

/// `window.localStorage`, holding the raw token under [`TOKEN_KEY`].
///
/// Outside the browser every call reports the storage as unavailable.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
fn local_storage() -> Result<web_sys::Storage, StorageError> {
    let window =
        web_sys::window().ok_or_else(|| StorageError::Unavailable("no window".into()))?;
    window
        .local_storage()
        .map_err(|e| StorageError::Unavailable(format!("{e:?}")))?
        .ok_or_else(|| StorageError::Unavailable("localStorage is disabled".into()))
}

#[cfg(not(feature = "hydrate"))]
fn unavailable<T>() -> Result<T, StorageError> {
    Err(StorageError::Unavailable("not running in a browser".into()))
}

impl TokenStorage for BrowserStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?
                .get_item(TOKEN_KEY)
                .map_err(|e| StorageError::Failed(format!("{e:?}")))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            unavailable()
        }
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?
                .set_item(TOKEN_KEY, token)
                .map_err(|e| StorageError::Failed(format!("{e:?}")))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = token;
            unavailable()
        }
    }

    fn remove(&self) -> Result<(), StorageError> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?
                .remove_item(TOKEN_KEY)
                .map_err(|e| StorageError::Failed(format!("{e:?}")))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            unavailable()
        }
    }
}

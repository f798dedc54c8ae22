use std::sync::{Arc, Mutex};

/// Key under which the raw token is persisted.
pub const TOKEN_KEY: &str = "authToken";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage operation failed: {0}")]
    Failed(String),
}

/// Durable home of the session token. Holds at most one entry.
pub trait TokenStorage {
    fn load(&self) -> Result<Option<String>, StorageError>;
    fn save(&self, token: &str) -> Result<(), StorageError>;
    fn remove(&self) -> Result<(), StorageError>;
}

/// In-process storage. Clones share the same entry.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entry: Arc<Mutex<Option<String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            entry: Arc::new(Mutex::new(Some(token.to_string()))),
        }
    }

    pub fn get(&self) -> Option<String> {
        self.entry.lock().ok().and_then(|entry| entry.clone())
    }
}

impl TokenStorage for MemoryStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        let entry = self
            .entry
            .lock()
            .map_err(|e| StorageError::Failed(e.to_string()))?;
        Ok(entry.clone())
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        let mut entry = self
            .entry
            .lock()
            .map_err(|e| StorageError::Failed(e.to_string()))?;
        *entry = Some(token.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<(), StorageError> {
        let mut entry = self
            .entry
            .lock()
            .map_err(|e| StorageError::Failed(e.to_string()))?;
        *entry = None;
        Ok(())
    }
}

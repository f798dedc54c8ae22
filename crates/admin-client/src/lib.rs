#![allow(non_snake_case)]

pub mod client;
pub mod error;
pub mod guard;
pub mod lifetime;
pub mod login;
pub mod session;
pub mod storage;
pub mod users;

pub use client::ApiClient;
pub use error::{ApiError, ErrorKind};
pub use guard::{resolve, Access, RouteDecision, Screen};
pub use lifetime::ViewLifetime;
pub use session::{SessionState, SessionStore};
pub use storage::{MemoryStorage, StorageError, TokenStorage};
pub use users::UserDirectory;

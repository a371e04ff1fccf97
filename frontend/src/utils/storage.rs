use thiserror::Error;
use web_sys::{Storage, Window};

use crate::state::auth::AuthSession;

pub const TOKEN_KEY: &str = "token";
pub const ROLES_KEY: &str = "roles";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("No window object")]
    NoWindow,
    #[error("No localStorage")]
    Unavailable,
    #[error("localStorage access failed for `{0}`")]
    Access(&'static str),
    #[error("malformed roles entry: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub fn window() -> Result<Window, StorageError> {
    // Host builds (server rendering, tests) have no browser to talk to.
    if cfg!(not(target_arch = "wasm32")) {
        return Err(StorageError::NoWindow);
    }
    web_sys::window().ok_or(StorageError::NoWindow)
}

pub fn local_storage() -> Result<Storage, StorageError> {
    window()?
        .local_storage()
        .map_err(|_| StorageError::Unavailable)?
        .ok_or(StorageError::Unavailable)
}

pub fn load_session() -> Result<AuthSession, StorageError> {
    let storage = local_storage()?;
    let token = storage
        .get_item(TOKEN_KEY)
        .map_err(|_| StorageError::Access(TOKEN_KEY))?;
    let roles = storage
        .get_item(ROLES_KEY)
        .map_err(|_| StorageError::Access(ROLES_KEY))?;
    AuthSession::from_stored(token, roles.as_deref())
}

pub fn save_session(session: &AuthSession) -> Result<(), StorageError> {
    let storage = local_storage()?;
    match session.token.as_deref() {
        Some(token) => storage
            .set_item(TOKEN_KEY, token)
            .map_err(|_| StorageError::Access(TOKEN_KEY))?,
        None => storage
            .remove_item(TOKEN_KEY)
            .map_err(|_| StorageError::Access(TOKEN_KEY))?,
    }
    storage
        .set_item(ROLES_KEY, &serde_json::to_string(&session.roles)?)
        .map_err(|_| StorageError::Access(ROLES_KEY))
}

pub fn clear_session() -> Result<(), StorageError> {
    let storage = local_storage()?;
    for key in [TOKEN_KEY, ROLES_KEY] {
        storage
            .remove_item(key)
            .map_err(|_| StorageError::Access(key))?;
    }
    Ok(())
}

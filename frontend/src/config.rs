use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;

pub const DEFAULT_LOGIN_PATH: &str = "/login";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub login_path: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("login_path must be an absolute path, got `{0}`")]
    RelativeLoginPath(String),
}

impl RuntimeConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn resolved_login_path(&self) -> Result<String, ConfigError> {
        match self.login_path.as_deref().map(str::trim) {
            None | Some("") => Ok(DEFAULT_LOGIN_PATH.to_string()),
            Some(path) if path.starts_with('/') => Ok(path.to_string()),
            Some(path) => Err(ConfigError::RelativeLoginPath(path.to_string())),
        }
    }
}

static LOGIN_PATH: OnceLock<String> = OnceLock::new();

#[cfg(target_arch = "wasm32")]
fn snapshot_from_globals() -> Option<RuntimeConfig> {
    // Expect optional global object: window.__FOOD_APP_CONFIG = { login_path: "..." }
    let w = web_sys::window()?;
    let any = js_sys::Reflect::get(&w, &"__FOOD_APP_CONFIG".into()).ok()?;
    if any.is_undefined() || any.is_null() {
        return None;
    }
    let raw = js_sys::JSON::stringify(&any).ok()?.as_string()?;
    match RuntimeConfig::from_json(&raw) {
        Ok(cfg) => Some(cfg),
        Err(err) => {
            log::warn!("ignoring unreadable __FOOD_APP_CONFIG: {err}");
            None
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn snapshot_from_globals() -> Option<RuntimeConfig> {
    None
}

fn resolve(cfg: Option<RuntimeConfig>) -> String {
    let cfg = cfg.unwrap_or_default();
    cfg.resolved_login_path().unwrap_or_else(|err| {
        log::warn!("{err}; using {DEFAULT_LOGIN_PATH}");
        DEFAULT_LOGIN_PATH.to_string()
    })
}

/// Route unauthenticated visitors are sent to.
pub fn login_path() -> &'static str {
    LOGIN_PATH.get_or_init(|| resolve(snapshot_from_globals()))
}

use percent_encoding::{percent_decode_str, utf8_percent_encode, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

/// Query parameter carrying the origin when history state is unavailable.
pub const FROM_PARAM: &str = "from";

/// The location a visitor attempted to reach.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationRequest {
    pub path: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub search: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub hash: String,
}

impl NavigationRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = normalize_prefix(search.into(), '?');
        self
    }

    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = normalize_prefix(hash.into(), '#');
        self
    }

    /// Path, query and fragment joined back into a navigable href.
    pub fn href(&self) -> String {
        format!("{}{}{}", self.path, self.search, self.hash)
    }

    /// Splits a same-origin href. Anything that is not a local absolute path
    /// (`https://...`, `//host/...`) is rejected.
    pub fn from_href(href: &str) -> Option<Self> {
        if !href.starts_with('/') || href.starts_with("//") {
            return None;
        }
        let (rest, hash) = match href.find('#') {
            Some(idx) => href.split_at(idx),
            None => (href, ""),
        };
        let (path, search) = match rest.find('?') {
            Some(idx) => rest.split_at(idx),
            None => (rest, ""),
        };
        Some(Self {
            path: path.to_string(),
            search: search.to_string(),
            hash: hash.to_string(),
        })
    }

    /// Reads the origin back out of a `from` query parameter.
    pub fn from_query(search: &str) -> Option<Self> {
        search
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == FROM_PARAM)
            .and_then(|(_, value)| percent_decode_str(value).decode_utf8().ok())
            .and_then(|href| Self::from_href(&href))
    }
}

fn normalize_prefix(value: String, prefix: char) -> String {
    if value.is_empty() || value.starts_with(prefix) {
        value
    } else {
        format!("{prefix}{value}")
    }
}

/// History state attached to a login redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectState {
    pub from: NavigationRequest,
}

impl RedirectState {
    pub fn to_json(&self) -> String {
        // A struct of plain strings always serializes.
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

/// What the router must do instead of rendering a guarded view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectInstruction {
    pub destination: String,
    /// Replace the current history entry so going back does not loop into the guard.
    pub replace: bool,
    pub state: RedirectState,
}

impl RedirectInstruction {
    pub fn to_login(login_path: impl Into<String>, from: NavigationRequest) -> Self {
        Self {
            destination: login_path.into(),
            replace: true,
            state: RedirectState { from },
        }
    }

    pub fn from_location(&self) -> &NavigationRequest {
        &self.state.from
    }

    /// Destination with the origin folded into the query string, for
    /// redirects that cannot attach history state (HTTP 302 during server rendering).
    pub fn href_with_origin(&self) -> String {
        let from = utf8_percent_encode(&self.state.from.href(), NON_ALPHANUMERIC).to_string();
        let separator = if self.destination.contains('?') { '&' } else { '?' };
        format!("{}{separator}{FROM_PARAM}={from}", self.destination)
    }
}

/// Where to send a visitor once they have signed in.
pub fn resume_path(from: Option<&NavigationRequest>, login_path: &str) -> String {
    match from {
        Some(request) if !request.path.is_empty() && request.path != login_path => request.href(),
        _ => "/".to_string(),
    }
}

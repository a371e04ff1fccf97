use crate::{guard::Authorizer, utils::storage};
use leptos::*;
use serde::{Deserialize, Serialize};

pub type AuthContext = (ReadSignal<AuthSession>, WriteSignal<AuthSession>);

/// Authorities issued by the backend login endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Customer,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Customer => "CUSTOMER",
            Role::Admin => "ADMIN",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthSession {
    pub token: Option<String>,
    pub roles: Vec<String>,
}

impl AuthSession {
    pub fn new<I, R>(token: impl Into<String>, roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        Self {
            token: Some(token.into()),
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    /// Rebuilds a session from the raw `token` and `roles` storage entries.
    pub fn from_stored(
        token: Option<String>,
        roles: Option<&str>,
    ) -> Result<Self, storage::StorageError> {
        let roles = match roles {
            Some(raw) if !raw.trim().is_empty() => serde_json::from_str::<Vec<String>>(raw)?,
            _ => Vec::new(),
        };
        Ok(Self { token, roles })
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|token| !token.is_empty())
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.is_authenticated()
            && self
                .roles
                .iter()
                .any(|name| name.trim().eq_ignore_ascii_case(role.as_str()))
    }
}

/// Reads the session signal on every call, so guards never see a cached answer.
#[derive(Debug, Clone, Copy)]
pub struct RoleAuthorizer {
    session: ReadSignal<AuthSession>,
    role: Role,
}

impl RoleAuthorizer {
    pub fn new(session: ReadSignal<AuthSession>, role: Role) -> Self {
        Self { session, role }
    }

    pub fn role(&self) -> Role {
        self.role
    }
}

impl Authorizer for RoleAuthorizer {
    fn is_authorized(&self) -> bool {
        self.session.with(|session| session.has_role(self.role))
    }
}

fn create_auth_context() -> AuthContext {
    let session = match storage::load_session() {
        Ok(session) => session,
        Err(err) => {
            log::warn!("falling back to anonymous session: {err}");
            AuthSession::default()
        }
    };
    create_signal(session)
}

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let ctx = create_auth_context();
    provide_context::<AuthContext>(ctx);
    view! { <>{children()}</> }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| create_signal(AuthSession::default()))
}

/// Persists a freshly issued session and publishes it to every guard.
pub fn sign_in(session: AuthSession, set_auth: WriteSignal<AuthSession>) {
    if let Err(err) = storage::save_session(&session) {
        log::warn!("session not persisted: {err}");
    }
    set_auth.set(session);
}

pub fn sign_out(set_auth: WriteSignal<AuthSession>) {
    if let Err(err) = storage::clear_session() {
        log::warn!("stored session not cleared: {err}");
    }
    set_auth.set(AuthSession::default());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::with_runtime;
    use crate::utils::storage::StorageError;

    #[test]
    fn use_auth_returns_anonymous_session_without_context() {
        with_runtime(|| {
            let (session, _set_session) = use_auth();
            let snapshot = session.get();
            assert!(!snapshot.is_authenticated());
            assert!(snapshot.roles.is_empty());
        });
    }

    #[test]
    fn roles_match_case_insensitively_and_require_a_token() {
        let session = AuthSession::new("jwt", ["customer", " ADMIN "]);
        assert!(session.has_role(Role::Customer));
        assert!(session.has_role(Role::Admin));

        let tokenless = AuthSession {
            token: None,
            roles: vec!["ADMIN".into()],
        };
        assert!(!tokenless.has_role(Role::Admin));

        let empty_token = AuthSession::new("", ["ADMIN"]);
        assert!(!empty_token.is_authenticated());
    }

    #[test]
    fn stored_roles_are_parsed_as_json_array() {
        let session =
            AuthSession::from_stored(Some("jwt".into()), Some(r#"["CUSTOMER"]"#)).unwrap();
        assert_eq!(session.roles, vec!["CUSTOMER".to_string()]);

        let missing = AuthSession::from_stored(Some("jwt".into()), None).unwrap();
        assert!(missing.roles.is_empty());

        let err = AuthSession::from_stored(Some("jwt".into()), Some("ADMIN")).unwrap_err();
        assert!(matches!(err, StorageError::Malformed(_)));
    }

    #[test]
    fn role_serializes_with_backend_authority_names() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), r#""ADMIN""#);
        let parsed: Role = serde_json::from_str(r#""CUSTOMER""#).unwrap();
        assert_eq!(parsed, Role::Customer);
        assert_eq!(Role::Customer.to_string(), "CUSTOMER");
    }

    #[test]
    fn role_authorizer_follows_session_updates() {
        with_runtime(|| {
            let (session, set_session) = create_signal(AuthSession::default());
            let admin = RoleAuthorizer::new(session, Role::Admin);
            assert_eq!(admin.role(), Role::Admin);
            assert!(!admin.is_authorized());

            set_session.set(AuthSession::new("jwt", ["ADMIN"]));
            assert!(admin.is_authorized());

            set_session.set(AuthSession::new("jwt", ["CUSTOMER"]));
            assert!(!admin.is_authorized());
        });
    }

    #[test]
    fn sign_in_and_out_publish_session_without_browser_storage() {
        with_runtime(|| {
            let (session, set_session) = create_signal(AuthSession::default());
            sign_in(AuthSession::new("jwt", ["CUSTOMER"]), set_session);
            assert!(session.get().has_role(Role::Customer));

            sign_out(set_session);
            assert_eq!(session.get(), AuthSession::default());
        });
    }
}

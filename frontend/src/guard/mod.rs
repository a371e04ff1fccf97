//! Framework-independent route guard.
//!
//! A [`RouteGuard`] asks its [`Authorizer`] once per evaluation and either
//! hands the protected content back untouched or produces a
//! [`RedirectInstruction`] to the login route. It keeps no state between
//! evaluations, so every navigation sees the authorization as it is right now.

pub mod navigation;

pub use navigation::{
    resume_path, NavigationRequest, RedirectInstruction, RedirectState, FROM_PARAM,
};

/// Answers whether the current visitor may see protected content.
pub trait Authorizer {
    fn is_authorized(&self) -> bool;
}

impl<F> Authorizer for F
where
    F: Fn() -> bool,
{
    fn is_authorized(&self) -> bool {
        self()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome<V> {
    Render(V),
    Redirect(RedirectInstruction),
}

impl<V> GuardOutcome<V> {
    pub fn is_render(&self) -> bool {
        matches!(self, GuardOutcome::Render(_))
    }

    pub fn redirect(&self) -> Option<&RedirectInstruction> {
        match self {
            GuardOutcome::Redirect(redirect) => Some(redirect),
            GuardOutcome::Render(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RouteGuard<A> {
    authorizer: A,
    login_path: String,
}

impl<A: Authorizer> RouteGuard<A> {
    pub fn new(authorizer: A, login_path: impl Into<String>) -> Self {
        Self {
            authorizer,
            login_path: login_path.into(),
        }
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn evaluate<V>(&self, content: V, current: NavigationRequest) -> GuardOutcome<V> {
        if self.authorizer.is_authorized() {
            GuardOutcome::Render(content)
        } else {
            GuardOutcome::Redirect(RedirectInstruction::to_login(
                self.login_path.clone(),
                current,
            ))
        }
    }
}

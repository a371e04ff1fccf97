use crate::{
    config,
    guard::{
        resume_path, GuardOutcome, NavigationRequest, RedirectInstruction, RedirectState,
        RouteGuard,
    },
    state::auth::{use_auth, AuthSession, Role, RoleAuthorizer},
};
use leptos::*;
use leptos_router::{use_location, Location, NavigateOptions, Redirect, State};

/// Renders `children` only while the session holds `role`; otherwise replaces
/// the current history entry with the login route, remembering where the
/// visitor was headed.
///
/// Only the decision is tracked: query or hash changes and session writes that
/// keep the decision do not rebuild the protected view.
#[component]
pub fn ProtectedRoute(role: Role, children: ChildrenFn) -> impl IntoView {
    let (auth, _) = use_auth();
    let location = use_location();
    let outcome = guard_outcome(auth, role, move || current_request(&location));
    view! {
        <Show
            when=move || outcome.with(GuardOutcome::is_render)
            fallback=move || match outcome.get() {
                GuardOutcome::Redirect(redirect) => redirect_view(&redirect),
                GuardOutcome::Render(()) => ().into_view(),
            }
        >
            {children()}
        </Show>
    }
}

/// Same check as the admin guard: customer pages were gated on the admin
/// predicate, so this keeps admitting exactly those sessions. Use
/// `<ProtectedRoute role=Role::Customer>` to require the customer authority.
#[component]
pub fn CustomerRoute(children: ChildrenFn) -> impl IntoView {
    view! { <ProtectedRoute role=Role::Admin>{children()}</ProtectedRoute> }
}

#[component]
pub fn AdminRoute(children: ChildrenFn) -> impl IntoView {
    view! { <ProtectedRoute role=Role::Admin>{children()}</ProtectedRoute> }
}

/// The location a guard redirected from, read on the login page from the
/// history state or, after a server redirect, the `from` query parameter.
pub fn use_return_location() -> Option<NavigationRequest> {
    let location = use_location();
    let state = location.state.get_untracked();
    decode_history_state(&state)
        .or_else(|| NavigationRequest::from_query(&location.search.get_untracked()))
}

/// Path to navigate to after a successful login.
pub fn use_resume_path() -> String {
    resume_path(use_return_location().as_ref(), config::login_path())
}

/// Memoized decision for `role`. Recomputes when the session changes and only
/// notifies when the decision itself changes; `current` is read untracked.
fn guard_outcome(
    session: ReadSignal<AuthSession>,
    role: Role,
    current: impl Fn() -> NavigationRequest + 'static,
) -> Memo<GuardOutcome<()>> {
    let guard = RouteGuard::new(RoleAuthorizer::new(session, role), config::login_path());
    create_memo(move |_| guard.evaluate((), untrack(&current)))
}

fn current_request(location: &Location) -> NavigationRequest {
    NavigationRequest::new(location.pathname.get_untracked())
        .with_search(location.search.get_untracked())
        .with_hash(location.hash.get_untracked())
}

fn redirect_view(redirect: &RedirectInstruction) -> View {
    let options = navigate_options(redirect);
    view! { <Redirect path=redirect_target(redirect) options=options/> }.into_view()
}

fn navigate_options(redirect: &RedirectInstruction) -> NavigateOptions {
    NavigateOptions {
        replace: redirect.replace,
        state: history_state(&redirect.state),
        ..NavigateOptions::default()
    }
}

#[cfg(target_arch = "wasm32")]
fn redirect_target(redirect: &RedirectInstruction) -> String {
    redirect.destination.clone()
}

// A server redirect is a plain 302, so the origin rides in the query string.
#[cfg(not(target_arch = "wasm32"))]
fn redirect_target(redirect: &RedirectInstruction) -> String {
    redirect.href_with_origin()
}

#[cfg(target_arch = "wasm32")]
fn history_state(state: &RedirectState) -> State {
    State(Some(wasm_bindgen::JsValue::from_str(&state.to_json())))
}

#[cfg(not(target_arch = "wasm32"))]
fn history_state(_state: &RedirectState) -> State {
    State(None)
}

fn decode_history_state(state: &State) -> Option<NavigationRequest> {
    let raw = state.0.as_ref()?.as_string()?;
    RedirectState::from_json(&raw).map(|state| state.from)
}

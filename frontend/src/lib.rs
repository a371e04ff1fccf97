//! Route guards for the food-app frontend.
//!
//! Wrap a routed view in [`CustomerRoute`] or [`AdminRoute`] (or a
//! [`ProtectedRoute`] with an explicit [`Role`]) inside an [`AuthProvider`]:
//!
//! ```ignore
//! view! {
//!     <AuthProvider>
//!         <Router>
//!             <Routes>
//!                 <Route path="/orders" view=|| view! { <CustomerRoute><OrdersPage/></CustomerRoute> }/>
//!                 <Route path="/admin" view=|| view! { <AdminRoute><AdminPage/></AdminRoute> }/>
//!             </Routes>
//!         </Router>
//!     </AuthProvider>
//! }
//! ```

pub mod components;
pub mod config;
pub mod guard;
pub mod state;
mod test_support;
pub mod utils;

pub use components::guard::{
    use_resume_path, use_return_location, AdminRoute, CustomerRoute, ProtectedRoute,
};
pub use guard::{Authorizer, GuardOutcome, NavigationRequest, RedirectInstruction, RouteGuard};
pub use state::auth::{use_auth, AuthProvider, AuthSession, Role, RoleAuthorizer};

/// Routes panics and `log` records to the browser console.
#[cfg(target_arch = "wasm32")]
pub fn install_browser_hooks() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        web_sys::console::warn_1(&"console logger already installed".into());
    }
}

use leptos::*;
use leptos_router::{provide_server_redirect, Router, RouterIntegrationContext, ServerIntegration};
use std::{cell::RefCell, rc::Rc};

use super::helpers::with_runtime;

pub struct RenderedRoute {
    pub html: String,
    pub redirect: Option<String>,
}

/// Server-renders `view` inside a router positioned at `path`, capturing any redirect.
pub fn render_at<F, N>(path: &str, view: F) -> RenderedRoute
where
    F: FnOnce() -> N + 'static,
    N: IntoView + 'static,
{
    let redirect = Rc::new(RefCell::new(None::<String>));
    let full_path = format!("http://localhost{path}");
    leptos_reactive::suppress_resource_load(true);
    let html = with_runtime({
        let redirect = Rc::clone(&redirect);
        move || {
            provide_context(RouterIntegrationContext::new(ServerIntegration {
                path: full_path,
            }));
            provide_server_redirect(move |to: &str| {
                redirect.borrow_mut().replace(to.to_string());
            });
            view! { <Router>{view()}</Router> }
                .into_view()
                .render_to_string()
                .to_string()
        }
    });
    leptos_reactive::suppress_resource_load(false);
    let redirect = redirect.borrow().clone();
    RenderedRoute { html, redirect }
}

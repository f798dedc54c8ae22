use admin_client::{resolve, RouteDecision, Screen};
use leptos::prelude::*;
use leptos_router::components::Redirect;

use crate::session::SessionContext;

fn decide(requested: Option<Screen>) -> impl Fn() -> RouteDecision + Copy + Send + Sync {
    let session = expect_context::<SessionContext>();
    let access = Memo::new(move |_| session.access());
    move || resolve(requested, access.get())
}

#[component]
fn Restoring() -> impl IntoView {
    view! {
        <div class="loading">
            <div class="spinner"></div>
            "Loading session..."
        </div>
    }
}

/// Renders `children` only when the session may see `screen`.
#[component]
pub fn Guarded(screen: Screen, children: ChildrenFn) -> impl IntoView {
    let decision = decide(Some(screen));

    move || match decision() {
        RouteDecision::Render(_) => children().into_any(),
        RouteDecision::Redirect(target) => view! { <Redirect path=target.path() /> }.into_any(),
        RouteDecision::Wait => view! { <Restoring /> }.into_any(),
    }
}

/// Target of unknown paths and `/`.
#[component]
pub fn FallbackRedirect() -> impl IntoView {
    let decision = decide(None);

    move || match decision() {
        RouteDecision::Redirect(target) | RouteDecision::Render(target) => {
            view! { <Redirect path=target.path() /> }.into_any()
        }
        RouteDecision::Wait => view! { <Restoring /> }.into_any(),
    }
}

use admin_client::Screen;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::nav::Nav;
use crate::session::SessionContext;

#[component]
pub fn TopBar() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let navigate = use_navigate();

    let handleLogout = move |_: leptos::ev::MouseEvent| {
        session.logout();
        navigate(Screen::Login.path(), Default::default());
    };

    view! {
        <header class="top-bar">
            <span class="top-bar-title">"Users"</span>
            <button class="btn btn-secondary" on:click=handleLogout>
                "Log out"
            </button>
        </header>
    }
}

/// Frame shared by every signed-in screen.
#[component]
pub fn AppLayout(children: Children) -> impl IntoView {
    view! {
        <div class="app-layout">
            <Nav />
            <div class="main-column">
                <TopBar />
                <main class="main-content">{children()}</main>
            </div>
        </div>
    }
}

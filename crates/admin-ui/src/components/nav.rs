use admin_client::{Access, Screen};
use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::session::SessionContext;

/// Side navigation. Only admins get it; other users have a single screen.
#[component]
pub fn Nav() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let pathname = use_location().pathname;

    let isAdmin = move || session.access() == Access::Admin;
    let itemClass = move |screen: Screen| {
        if pathname.get() == screen.path() {
            "nav-item active"
        } else {
            "nav-item"
        }
    };

    view! {
        <Show when=isAdmin>
            <nav class="nav-sidebar">
                <div class="nav-brand">
                    <div class="brand-icon">"A"</div>
                    <span class="brand-text">"User Admin"</span>
                </div>
                <ul class="nav-links">
                    <li class=move || itemClass(Screen::Users)>
                        <a href=Screen::Users.path()>
                            <span class="nav-icon">"\u{2630}"</span>
                            <span>"Manage Users"</span>
                        </a>
                    </li>
                    <li class=move || itemClass(Screen::Account)>
                        <a href=Screen::Account.path()>
                            <span class="nav-icon">"\u{263A}"</span>
                            <span>"My Account"</span>
                        </a>
                    </li>
                </ul>
            </nav>
        </Show>
    }
}

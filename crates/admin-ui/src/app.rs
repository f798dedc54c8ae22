use admin_client::Screen;
use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{
    components::{Route, Router, Routes},
    StaticSegment,
};

use crate::components::guard::{FallbackRedirect, Guarded};
use crate::components::layout::AppLayout;
use crate::components::toast::ToastProvider;
use crate::pages::account::MyAccountPage;
use crate::pages::login::LoginPage;
use crate::pages::users::UsersPage;
use crate::session::SessionContext;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <link rel="icon" href="/favicon.svg" type="image/svg+xml" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <MetaTags />
            </head>
            <body>
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = SessionContext::new();
    provide_context(session);
    // effects only run in the browser, after hydration
    Effect::new(move |_| session.restore());

    view! {
        <Stylesheet id="leptos" href="/pkg/admin-console.css" />
        <Title text="User Administration" />
        <ToastProvider>
            <Router>
                <Routes fallback=|| view! { <FallbackRedirect /> }.into_any()>
                    <Route path=StaticSegment("") view=FallbackRedirect />
                    <Route path=StaticSegment("login") view=LoginView />
                    <Route path=StaticSegment("account") view=AccountView />
                    <Route path=StaticSegment("users") view=UsersView />
                </Routes>
            </Router>
        </ToastProvider>
    }
}

#[component]
fn LoginView() -> impl IntoView {
    view! {
        <Guarded screen=Screen::Login>
            <LoginPage />
        </Guarded>
    }
}

#[component]
fn AccountView() -> impl IntoView {
    view! {
        <Guarded screen=Screen::Account>
            <AppLayout>
                <MyAccountPage />
            </AppLayout>
        </Guarded>
    }
}

#[component]
fn UsersView() -> impl IntoView {
    view! {
        <Guarded screen=Screen::Users>
            <AppLayout>
                <UsersPage />
            </AppLayout>
        </Guarded>
    }
}

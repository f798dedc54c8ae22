use admin_client::ViewLifetime;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::session::SessionContext;

#[component]
pub fn LoginPage() -> impl IntoView {
    #[allow(unused_variables)]
    let session = expect_context::<SessionContext>();
    #[allow(unused_variables)]
    let navigate = use_navigate();
    let lifetime = ViewLifetime::new();
    on_cleanup({
        let lifetime = lifetime.clone();
        move || lifetime.end()
    });

    let (username, setUsername) = signal(String::new());
    let (password, setPassword) = signal(String::new());
    #[allow(unused_variables)]
    let (error, setError) = signal(Option::<String>::None);
    let (isLoading, setIsLoading) = signal(false);

    let handleSubmit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        // one request at a time
        if isLoading.get_untracked() {
            return;
        }
        setIsLoading.set(true);
        setError.set(None);

        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen_futures::spawn_local;

            let lifetime = lifetime.clone();
            let navigate = navigate.clone();
            let user = username.get_untracked();
            let pass = password.get_untracked();
            spawn_local(async move {
                let Some(result) = lifetime.run(session.sign_in(user, pass)).await else {
                    return;
                };
                setIsLoading.set(false);
                match result {
                    Ok(landing) => navigate(landing.path(), Default::default()),
                    Err(message) => setError.set(Some(message)),
                }
            });
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <div class="login-header">
                    <div class="login-icon">"A"</div>
                    <h1>"Admin Login"</h1>
                    <p>"Sign in to manage users"</p>
                </div>

                {move || {
                    error.get().map(|message| view! { <div class="login-error">{message}</div> })
                }}

                <form on:submit=handleSubmit>
                    <div class="form-group">
                        <label for="username">"Username"</label>
                        <input
                            type="text"
                            id="username"
                            name="username"
                            autocomplete="username"
                            required
                            prop:value=move || username.get()
                            on:input=move |ev| setUsername.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label for="password">"Password"</label>
                        <input
                            type="password"
                            id="password"
                            name="password"
                            autocomplete="current-password"
                            required
                            prop:value=move || password.get()
                            on:input=move |ev| setPassword.set(event_target_value(&ev))
                        />
                    </div>
                    <button type="submit" class="btn btn-primary" disabled=move || isLoading.get()>
                        {move || if isLoading.get() { "Logging in..." } else { "Login" }}
                    </button>
                </form>
            </div>
        </div>
    }
}

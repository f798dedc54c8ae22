use leptos::prelude::*;

use crate::session::SessionContext;

const UNKNOWN: &str = "\u{2014}";

#[component]
pub fn MyAccountPage() -> impl IntoView {
    let session = expect_context::<SessionContext>();

    let username = move || {
        session
            .user()
            .map(|user| user.username)
            .unwrap_or_else(|| UNKNOWN.to_string())
    };
    let role = move || {
        session
            .user()
            .map(|user| user.role.to_string())
            .unwrap_or_else(|| UNKNOWN.to_string())
    };

    view! {
        <div class="dashboard-header">
            <h1>"My Account"</h1>
        </div>
        <div class="card account-card">
            <div class="stat-pair">
                <span class="stat-label">"Username"</span>
                <span class="stat-value account-username">{username}</span>
            </div>
            <div class="stat-pair">
                <span class="stat-label">"Role"</span>
                <span class="stat-value">{role}</span>
            </div>
        </div>
    }
}

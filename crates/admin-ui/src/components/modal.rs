use leptos::prelude::*;

/// Centered dialog over a dimmed backdrop. Visibility is up to the caller.
#[component]
pub fn Modal(
    /// Heading of the dialog
    title: String,
    /// Body and action buttons
    children: Children,
) -> impl IntoView {
    view! {
        <div class="modal-backdrop">
            <div class="modal card" role="dialog" aria-modal="true">
                <div class="card-title">{title}</div>
                {children()}
            </div>
        </div>
    }
}

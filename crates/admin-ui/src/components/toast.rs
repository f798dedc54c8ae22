use std::time::Duration;

use leptos::prelude::*;

const TOAST_LIFETIME: Duration = Duration::from_secs(5);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Info,
    Error,
}

impl ToastLevel {
    fn class(self) -> &'static str {
        match self {
            ToastLevel::Success => "toast toast-success",
            ToastLevel::Info => "toast toast-info",
            ToastLevel::Error => "toast toast-error",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub level: ToastLevel,
}

/// Queue of transient notices, shared through context.
#[derive(Clone, Copy)]
pub struct ToastContext {
    queue: RwSignal<Vec<Toast>>,
    nextId: StoredValue<u64>,
}

impl ToastContext {
    fn new() -> Self {
        Self {
            queue: RwSignal::new(Vec::new()),
            nextId: StoredValue::new(0),
        }
    }

    /// Shows `message` until dismissed or for five seconds, whichever is first.
    pub fn push(&self, message: impl Into<String>, level: ToastLevel) {
        let id = self.nextId.get_value();
        self.nextId.set_value(id + 1);

        self.queue.update(|queue| {
            queue.push(Toast {
                id,
                message: message.into(),
                level,
            })
        });

        let ctx = *self;
        set_timeout(move || ctx.dismiss(id), TOAST_LIFETIME);
    }

    pub fn dismiss(&self, id: u64) {
        self.queue.update(|queue| queue.retain(|toast| toast.id != id));
    }

    fn visible(&self) -> Vec<Toast> {
        self.queue.get()
    }
}

#[component]
fn ToastItem(toast: Toast) -> impl IntoView {
    let ctx = expect_context::<ToastContext>();
    let id = toast.id;

    view! {
        <div class=toast.level.class() role="status">
            <span class="toast-message">{toast.message}</span>
            <button class="toast-close" aria-label="Dismiss" on:click=move |_| ctx.dismiss(id)>
                "\u{00D7}"
            </button>
        </div>
    }
}

/// Wraps the app, providing [`ToastContext`] and the container toasts render into.
#[component]
pub fn ToastProvider(children: Children) -> impl IntoView {
    let ctx = ToastContext::new();
    provide_context(ctx);

    view! {
        {children()}
        <div class="toast-container">
            <For each=move || ctx.visible() key=|toast| toast.id let:toast>
                <ToastItem toast=toast />
            </For>
        </div>
    }
}

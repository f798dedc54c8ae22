use admin_client::{Screen, UserDirectory, ViewLifetime};
use admin_types::{Role, User};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::modal::Modal;
use crate::components::toast::{ToastContext, ToastLevel};
use crate::session::SessionContext;

#[component]
pub fn UsersPage() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    #[allow(unused_variables)]
    let toasts = expect_context::<ToastContext>();
    let navigate = use_navigate();
    let lifetime = ViewLifetime::new();
    on_cleanup({
        let lifetime = lifetime.clone();
        move || lifetime.end()
    });

    let directory = RwSignal::new(UserDirectory::default());
    #[allow(unused_variables)]
    let (loading, setLoading) = signal(true);
    let createOpen = RwSignal::new(false);
    let (deleteTarget, setDeleteTarget) = signal(Option::<User>::None);
    #[allow(unused_variables)]
    let (deleting, setDeleting) = signal(false);

    let load = {
        #[allow(unused_variables)]
        let lifetime = lifetime.clone();
        move || {
            #[cfg(feature = "hydrate")]
            {
                use wasm_bindgen_futures::spawn_local;

                let Some(client) = session.client().filter(|c| c.token().is_some()) else {
                    return;
                };
                let lifetime = lifetime.clone();
                setLoading.set(true);
                spawn_local(async move {
                    let mut current = directory.get_untracked();
                    let work = async move {
                        let result = current.load(&client).await;
                        (current, result)
                    };
                    let Some((current, result)) = lifetime.run(work).await else {
                        return;
                    };
                    directory.set(current);
                    setLoading.set(false);
                    if let Err(message) = result {
                        toasts.push(message, ToastLevel::Error);
                    }
                });
            }
        }
    };

    // reload whenever the session token changes
    let token = Memo::new(move |_| session.token());
    Effect::new(move |_| {
        token.track();
        load();
    });

    let confirmDelete = {
        #[allow(unused_variables)]
        let lifetime = lifetime.clone();
        move |_: leptos::ev::MouseEvent| {
            let Some(target) = deleteTarget.get_untracked() else {
                return;
            };
            if deleting.get_untracked() {
                return;
            }

            #[cfg(feature = "hydrate")]
            {
                use wasm_bindgen_futures::spawn_local;

                let Some(client) = session.client() else {
                    return;
                };
                let lifetime = lifetime.clone();
                setDeleting.set(true);
                spawn_local(async move {
                    let mut current = directory.get_untracked();
                    let work = async move {
                        let result = current.delete(&client, &target.uuid).await;
                        (current, result)
                    };
                    let Some((current, result)) = lifetime.run(work).await else {
                        return;
                    };
                    setDeleting.set(false);
                    setDeleteTarget.set(None);
                    match result {
                        Ok(notice) => {
                            directory.update(|dir| dir.adopt_list(current));
                            toasts.push(notice, ToastLevel::Success)
                        }
                        Err(message) => toasts.push(message, ToastLevel::Error),
                    }
                });
            }
            #[cfg(not(feature = "hydrate"))]
            {
                let _ = target;
            }
        }
    };

    let handleLogout = move |_: leptos::ev::MouseEvent| {
        session.logout();
        navigate(Screen::Login.path(), Default::default());
    };

    view! {
        <div class="dashboard-header page-toolbar">
            <div>
                <h1>"User Management"</h1>
                <p class="subtitle">"Accounts registered with the backend"</p>
            </div>
            <div class="toolbar-actions">
                <button class="btn btn-ghost" on:click=move |_| createOpen.set(true)>
                    "+ Create New User"
                </button>
                <button class="btn btn-secondary" on:click=handleLogout>
                    "Logout"
                </button>
            </div>
        </div>

        {move || {
            if loading.get() {
                return view! {
                    <div class="loading">
                        <div class="spinner"></div>
                        "Loading users..."
                    </div>
                }
                    .into_any();
            }
            match directory.with(|dir| dir.load_error.clone()) {
                Some(message) => {
                    view! {
                        <div class="card">
                            <p class="login-error">{message}</p>
                        </div>
                    }
                        .into_any()
                }
                None => view! { <UserTable directory=directory on_delete=setDeleteTarget /> }.into_any(),
            }
        }}

        <Show when=move || createOpen.get()>
            <CreateUserDialog open=createOpen directory=directory lifetime=lifetime.clone() />
        </Show>

        {move || {
            let confirmDelete = confirmDelete.clone();
            deleteTarget
                .get()
                .map(|target| {
                    view! {
                        <Modal title="Confirm Deletion".to_string()>
                            <p class="modal-body">
                                {format!(
                                    "Are you sure you want to delete \"{}\"? This action cannot be undone.",
                                    target.username,
                                )}
                            </p>
                            <div class="modal-actions">
                                <button
                                    class="btn btn-ghost"
                                    on:click=move |_| setDeleteTarget.set(None)
                                >
                                    "Cancel"
                                </button>
                                <button
                                    class="btn btn-danger"
                                    disabled=move || deleting.get()
                                    on:click=confirmDelete
                                >
                                    {move || if deleting.get() { "Deleting..." } else { "Delete" }}
                                </button>
                            </div>
                        </Modal>
                    }
                })
        }}
    }
}

#[component]
fn UserTable(directory: RwSignal<UserDirectory>, on_delete: WriteSignal<Option<User>>) -> impl IntoView {
    view! {
        <div class="card">
            <table>
                <thead>
                    <tr>
                        <th>"UUID"</th>
                        <th>"Username"</th>
                        <th>"Role"</th>
                        <th class="cell-actions">"Actions"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        directory
                            .with(|dir| {
                                dir.users
                                    .iter()
                                    .map(|user| {
                                        let deletable = dir.can_delete(user);
                                        let row = user.clone();
                                        view! {
                                            <tr>
                                                <td class="cell-uuid">{user.uuid.clone()}</td>
                                                <td>{user.username.clone()}</td>
                                                <td>{user.role.to_string()}</td>
                                                <td class="cell-actions">
                                                    {deletable
                                                        .then(|| {
                                                            view! {
                                                                <button
                                                                    class="btn btn-danger btn-sm"
                                                                    on:click=move |_| on_delete.set(Some(row.clone()))
                                                                >
                                                                    "Delete"
                                                                </button>
                                                            }
                                                        })}
                                                </td>
                                            </tr>
                                        }
                                    })
                                    .collect_view()
                            })
                    }}
                </tbody>
            </table>
        </div>
    }
}

#[component]
fn CreateUserDialog(
    open: RwSignal<bool>,
    directory: RwSignal<UserDirectory>,
    lifetime: ViewLifetime,
) -> impl IntoView {
    #[allow(unused_variables)]
    let session = expect_context::<SessionContext>();
    #[allow(unused_variables)]
    let toasts = expect_context::<ToastContext>();

    let (username, setUsername) = signal(String::new());
    let (password, setPassword) = signal(String::new());
    let (role, setRole) = signal(Role::User);
    #[allow(unused_variables)]
    let (error, setError) = signal(Option::<String>::None);
    #[allow(unused_variables)]
    let (creating, setCreating) = signal(false);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if creating.get_untracked() {
            return;
        }

        #[cfg(feature = "hydrate")]
        {
            use admin_types::CreateUserRequest;
            use wasm_bindgen_futures::spawn_local;

            let Some(client) = session.client() else {
                return;
            };
            let request = CreateUserRequest {
                username: username.get_untracked(),
                password: password.get_untracked(),
                role: role.get_untracked(),
            };
            let lifetime = lifetime.clone();
            setCreating.set(true);
            setError.set(None);
            spawn_local(async move {
                let mut current = directory.get_untracked();
                let work = async move {
                    let result = current.create(&client, &request).await;
                    (current, result)
                };
                let Some((current, result)) = lifetime.run(work).await else {
                    return;
                };
                setCreating.set(false);
                match result {
                    Ok(notice) => {
                        directory.update(|dir| dir.adopt_list(current));
                        open.set(false);
                        toasts.push(notice, ToastLevel::Success);
                    }
                    Err(message) => setError.set(Some(message)),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&lifetime, directory);
        }
    };

    view! {
        <Modal title="Create New User".to_string()>
            <form on:submit=submit>
                {move || {
                    error.get().map(|message| view! { <div class="login-error">{message}</div> })
                }}
                <div class="form-group">
                    <label for="new-username">"Username"</label>
                    <input
                        type="text"
                        id="new-username"
                        required
                        prop:value=move || username.get()
                        on:input=move |ev| setUsername.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="new-password">"Password"</label>
                    <input
                        type="password"
                        id="new-password"
                        autocomplete="new-password"
                        required
                        prop:value=move || password.get()
                        on:input=move |ev| setPassword.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="new-role">"Role"</label>
                    <select
                        id="new-role"
                        prop:value=move || role.get().as_str()
                        on:change=move |ev| {
                            setRole.set(event_target_value(&ev).parse().unwrap_or_default())
                        }
                    >
                        <option value="user">"User"</option>
                        <option value="admin">"Admin"</option>
                    </select>
                </div>
                <div class="modal-actions">
                    <button type="button" class="btn btn-ghost" on:click=move |_| open.set(false)>
                        "Cancel"
                    </button>
                    <button type="submit" class="btn btn-primary" disabled=move || creating.get()>
                        {move || if creating.get() { "Creating..." } else { "Create User" }}
                    </button>
                </div>
            </form>
        </Modal>
    }
}

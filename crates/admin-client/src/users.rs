use admin_types::{CreateUserRequest, User};
use tracing::{info, warn};

use crate::client::ApiClient;

pub const USER_CREATED: &str = "User created";
pub const USER_DELETED: &str = "User deleted";
pub const FETCH_USERS_FAILED: &str = "Failed to fetch users";
pub const FETCH_ME_FAILED: &str = "Failed to fetch current user";
pub const CREATE_FAILED: &str = "Failed to create user";
pub const DELETE_FAILED: &str = "Failed to delete";
pub const DELETE_SELF_REFUSED: &str = "You cannot delete your own account";
pub const DELETE_PROFILE_UNKNOWN: &str = "Your account is still loading, try again";

/// Read-through cache of the user list for one page view.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserDirectory {
    pub users: Vec<User>,
    /// The caller's own profile, used to hide the self-delete action.
    pub me: Option<User>,
    /// Message from the last failed list fetch.
    pub load_error: Option<String>,
}

impl UserDirectory {
    /// Fetches the list and the caller's profile concurrently. A failed
    /// profile fetch is returned as a notice; a failed list fetch lands in
    /// `load_error`.
    pub async fn load(&mut self, client: &ApiClient) -> Result<(), String> {
        let (usersResult, meResult) = futures::join!(client.list_users(), client.current_user());

        self.apply_list(usersResult);
        match meResult {
            Ok(me) => {
                self.me = Some(me);
                Ok(())
            }
            Err(e) => {
                warn!("failed to fetch current user: {e}");
                self.me = None;
                Err(e.user_message(FETCH_ME_FAILED))
            }
        }
    }

    pub async fn reload(&mut self, client: &ApiClient) {
        let result = client.list_users().await;
        self.apply_list(result);
    }

    fn apply_list(&mut self, result: crate::error::Result<Vec<User>>) {
        match result {
            Ok(users) => {
                self.users = users;
                self.load_error = None;
            }
            Err(e) => {
                warn!("failed to fetch users: {e}");
                self.load_error = Some(e.user_message(FETCH_USERS_FAILED));
            }
        }
    }

    /// Rows other than the caller's own can be deleted. Until the caller's
    /// profile is known no row is deletable.
    pub fn can_delete(&self, row: &User) -> bool {
        self.refusal(&row.uuid).is_none()
    }

    /// Why `uuid` may not be deleted from this view, if it may not.
    fn refusal(&self, uuid: &str) -> Option<&'static str> {
        match &self.me {
            None => Some(DELETE_PROFILE_UNKNOWN),
            Some(me) if me.uuid == uuid => Some(DELETE_SELF_REFUSED),
            Some(_) => None,
        }
    }

    /// Takes the list state of a copy that ran `create` or `delete`.
    /// `me` stays as loaded here, so an overlapping page load keeps its profile.
    pub fn adopt_list(&mut self, refreshed: UserDirectory) {
        self.users = refreshed.users;
        self.load_error = refreshed.load_error;
    }

    pub fn find(&self, uuid: &str) -> Option<&User> {
        self.users.iter().find(|user| user.uuid == uuid)
    }

    /// Creates a user and refreshes the list. `Ok` carries the notice to show.
    pub async fn create(
        &mut self,
        client: &ApiClient,
        request: &CreateUserRequest,
    ) -> Result<&'static str, String> {
        match client.create_user(request).await {
            Ok(created) => {
                info!("created user {} ({})", created.username, created.role);
                self.reload(client).await;
                Ok(USER_CREATED)
            }
            Err(e) => {
                warn!("failed to create user {}: {e}", request.username);
                Err(e.user_message(CREATE_FAILED))
            }
        }
    }

    /// Deletes a confirmed row. The list is left untouched when the request
    /// fails or is refused locally.
    pub async fn delete(&mut self, client: &ApiClient, uuid: &str) -> Result<&'static str, String> {
        if let Some(reason) = self.refusal(uuid) {
            return Err(reason.to_string());
        }

        match client.delete_user(uuid).await {
            Ok(()) => {
                info!("deleted user {uuid}");
                self.users.retain(|user| user.uuid != uuid);
                self.reload(client).await;
                Ok(USER_DELETED)
            }
            Err(e) => {
                warn!("failed to delete user {uuid}: {e}");
                Err(e.user_message(DELETE_FAILED))
            }
        }
    }
}

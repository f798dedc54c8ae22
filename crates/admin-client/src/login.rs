use admin_types::{AuthToken, LoginRequest, LoginResponse, Role};
use tracing::{info, warn};

use crate::client::ApiClient;
use crate::error::ErrorKind;
use crate::guard::Screen;
use crate::session::SessionStore;
use crate::storage::TokenStorage;

pub const LOGIN_FAILED: &str = "Failed to log in";
pub const NETWORK_ERROR: &str = "Network error";

/// Posts credentials. The error is the text to show next to the form.
pub async fn authenticate(
    client: &ApiClient,
    username: &str,
    password: &str,
) -> Result<LoginResponse, String> {
    let request = LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    };

    match client.login(&request).await {
        Ok(response) if !response.token.is_empty() => Ok(response),
        Ok(_) => Err(LOGIN_FAILED.to_string()),
        Err(e) => {
            warn!("login for {username} failed: {e}");
            let fallback = match e.kind() {
                ErrorKind::Network => NETWORK_ERROR,
                _ => LOGIN_FAILED,
            };
            Err(e.user_message(fallback))
        }
    }
}

/// Where a freshly signed-in user lands.
pub fn landing_screen(role: Role) -> Screen {
    if role.is_admin() {
        Screen::Users
    } else {
        Screen::Account
    }
}

/// Authenticates and adopts the returned token for every successful login.
/// The profile refresh is left to the caller.
pub async fn sign_in<S: TokenStorage>(
    store: &SessionStore<S>,
    username: &str,
    password: &str,
) -> Result<Screen, String> {
    let response = authenticate(&store.anonymous_client(), username, password).await?;
    info!("signed in as {username} ({})", response.role);
    store.login(AuthToken(response.token));
    Ok(landing_screen(response.role))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_admins_land_on_user_management() {
        assert_eq!(landing_screen(Role::Admin), Screen::Users);
        assert_eq!(landing_screen(Role::User), Screen::Account);
    }

    #[tokio::test]
    async fn unreachable_backend_reports_network_error() {
        // port 9 (discard) is closed on test hosts
        let client = ApiClient::new("http://127.0.0.1:9").unwrap();
        let result = authenticate(&client, "root", "pw").await;
        assert_eq!(result, Err(NETWORK_ERROR.to_string()));
    }
}

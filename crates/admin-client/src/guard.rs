use crate::session::SessionState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Screen {
    Login,
    Account,
    Users,
}

impl Screen {
    pub fn path(self) -> &'static str {
        match self {
            Screen::Login => "/login",
            Screen::Account => "/account",
            Screen::Users => "/users",
        }
    }
}

/// What the current session may see.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Anonymous,
    /// Token present, role not known yet.
    Pending,
    Member,
    Admin,
}

impl Access {
    pub fn of(state: &SessionState) -> Access {
        if state.token.is_none() {
            return if state.pending {
                Access::Pending
            } else {
                Access::Anonymous
            };
        }
        match state.role() {
            Some(role) if role.is_admin() => Access::Admin,
            Some(_) => Access::Member,
            None if state.pending => Access::Pending,
            // token kept after a failed profile fetch
            None => Access::Member,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteDecision {
    Render(Screen),
    Redirect(Screen),
    Wait,
}

/// Decides what a request for `requested` shows. `None` is an unknown path.
pub fn resolve(requested: Option<Screen>, access: Access) -> RouteDecision {
    use RouteDecision::{Redirect, Render, Wait};

    match (access, requested) {
        (Access::Pending, _) => Wait,
        (Access::Anonymous, Some(Screen::Login)) => Render(Screen::Login),
        (Access::Anonymous, _) => Redirect(Screen::Login),
        (Access::Member, Some(Screen::Account)) => Render(Screen::Account),
        (Access::Admin, Some(screen @ (Screen::Account | Screen::Users))) => Render(screen),
        (Access::Member | Access::Admin, _) => Redirect(Screen::Account),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use admin_types::{AuthToken, Role, User};

    fn state(token: Option<&str>, role: Option<Role>, pending: bool) -> SessionState {
        SessionState {
            token: token.map(AuthToken::new),
            user: role.map(|role| User {
                uuid: "u-1".into(),
                username: "someone".into(),
                role,
            }),
            pending,
            epoch: 1,
        }
    }

    const ALL: [Option<Screen>; 4] = [
        None,
        Some(Screen::Login),
        Some(Screen::Account),
        Some(Screen::Users),
    ];

    #[test]
    fn anonymous_only_reaches_login() {
        for requested in ALL {
            let expected = if requested == Some(Screen::Login) {
                RouteDecision::Render(Screen::Login)
            } else {
                RouteDecision::Redirect(Screen::Login)
            };
            assert_eq!(resolve(requested, Access::Anonymous), expected);
        }
    }

    #[test]
    fn member_only_reaches_account() {
        for requested in ALL {
            let expected = if requested == Some(Screen::Account) {
                RouteDecision::Render(Screen::Account)
            } else {
                RouteDecision::Redirect(Screen::Account)
            };
            assert_eq!(resolve(requested, Access::Member), expected);
        }
    }

    #[test]
    fn admin_reaches_both_views() {
        assert_eq!(
            resolve(Some(Screen::Users), Access::Admin),
            RouteDecision::Render(Screen::Users)
        );
        assert_eq!(
            resolve(Some(Screen::Account), Access::Admin),
            RouteDecision::Render(Screen::Account)
        );
        assert_eq!(
            resolve(None, Access::Admin),
            RouteDecision::Redirect(Screen::Account)
        );
    }

    #[test]
    fn pending_waits_everywhere() {
        for requested in ALL {
            assert_eq!(resolve(requested, Access::Pending), RouteDecision::Wait);
        }
    }

    #[test]
    fn access_follows_session_state() {
        assert_eq!(Access::of(&state(None, None, false)), Access::Anonymous);
        assert_eq!(Access::of(&SessionState::restoring()), Access::Pending);
        assert_eq!(Access::of(&state(Some("t"), None, true)), Access::Pending);
        assert_eq!(Access::of(&state(Some("t"), None, false)), Access::Member);
        assert_eq!(
            Access::of(&state(Some("t"), Some(Role::User), false)),
            Access::Member
        );
        assert_eq!(
            Access::of(&state(Some("t"), Some(Role::Admin), false)),
            Access::Admin
        );
    }
}

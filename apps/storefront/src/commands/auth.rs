//! # Auth Commands
//!
//! Sign in, sign out and navigation.

use serde::Serialize;
use tracing::debug;

use storefront_core::User;

use crate::error::ApiError;
use crate::routing::View;
use crate::state::Session;

/// Who is signed in and where they landed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: Option<User>,
    pub view: View,
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        SessionResponse {
            user: session.user().cloned(),
            view: session.view(),
        }
    }
}

/// Checks credentials and starts a session.
///
/// A failed attempt leaves any current session untouched.
pub fn login(session: &mut Session, username: &str, password: &str) -> Result<SessionResponse, ApiError> {
    debug!(username = %username, "login command");
    let user = session.store().users().authenticate(username, password)?;
    session.sign_in(user);
    Ok(SessionResponse::from(&*session))
}

/// Ends the session. Returns how many reserved units went back to stock.
pub fn logout(session: &mut Session) -> usize {
    debug!("logout command");
    session.sign_out()
}

pub fn whoami(session: &Session) -> SessionResponse {
    SessionResponse::from(session)
}

/// Navigates to a view, redirecting to Login when not allowed.
pub fn navigate(session: &mut Session, view: View) -> SessionResponse {
    debug!(requested = %view, "navigate command");
    session.navigate(view);
    SessionResponse::from(&*session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use storefront_store::Storefront;

    #[test]
    fn test_login_routes_by_role() {
        let mut session = Session::new(Storefront::seeded().unwrap());

        let response = login(&mut session, "admin", "admin").unwrap();
        assert_eq!(response.view, View::AdminConsole);

        let response = login(&mut session, "John", "john").unwrap();
        assert_eq!(response.view, View::Shop);
        assert_eq!(response.user.unwrap().username, "John");
    }

    #[test]
    fn test_failed_login_keeps_session() {
        let mut session = Session::new(Storefront::seeded().unwrap());
        login(&mut session, "Mark", "mark").unwrap();

        let err = login(&mut session, "Mark", "wrong").unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthFailure);
        assert_eq!(whoami(&session).user.unwrap().username, "Mark");
    }

    #[test]
    fn test_navigate_signed_out() {
        let mut session = Session::new(Storefront::seeded().unwrap());
        assert_eq!(navigate(&mut session, View::Shop).view, View::Login);
    }
}

//! Looks up the logged-in user stored by the login page.

use crate::config::{LOGIN_PAGE, SESSION_STORAGE_KEY};
use crate::error::SessionError;

/// The user the dashboard acts on behalf of.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
}

impl Session {
    /// Interprets the raw storage value. Blank identifiers count as missing.
    pub fn from_stored(value: Option<String>) -> Result<Self, SessionError> {
        match value {
            Some(id) if !id.trim().is_empty() => Ok(Self {
                user_id: id.trim().to_string(),
            }),
            _ => Err(SessionError::MissingSession),
        }
    }
}

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Reads the session from `localStorage`. An unavailable storage is treated
/// the same as an empty one.
pub fn read_session() -> Result<Session, SessionError> {
    let stored = storage().and_then(|s| s.get_item(SESSION_STORAGE_KEY).ok().flatten());
    Session::from_stored(stored)
}

pub fn redirect_to_login() {
    if let Some(window) = web_sys::window() {
        if let Err(err) = window.location().set_href(LOGIN_PAGE) {
            log::error!("could not navigate to {LOGIN_PAGE}: {err:?}");
        }
    }
}

/// Forgets the stored user and goes back to the login page.
pub fn end_session() {
    if let Some(storage) = storage() {
        let _ = storage.remove_item(SESSION_STORAGE_KEY);
    }
    log::info!("session ended");
    redirect_to_login();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_id_authenticates() {
        assert_eq!(
            Session::from_stored(Some("42".to_string())),
            Ok(Session {
                user_id: "42".to_string()
            })
        );
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let session = Session::from_stored(Some(" 42\n".to_string())).unwrap();
        assert_eq!(session.user_id, "42");
    }

    #[test]
    fn missing_or_blank_id_is_not_logged_in() {
        assert_eq!(Session::from_stored(None), Err(SessionError::MissingSession));
        assert_eq!(
            Session::from_stored(Some("   ".to_string())),
            Err(SessionError::MissingSession)
        );
    }
}

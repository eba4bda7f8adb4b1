//! # User Directory
//!
//! Fixed set of accounts loaded at startup. Read-only after construction.

use std::sync::Arc;

use tracing::{info, warn};

use storefront_core::{CoreError, CoreResult, User};

/// Repository for user accounts.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: Arc<Vec<User>>,
}

impl UserDirectory {
    pub fn new(users: Vec<User>) -> Self {
        UserDirectory {
            users: Arc::new(users),
        }
    }

    /// Checks a username/password pair.
    ///
    /// Usernames are matched exactly. The error does not say which half was
    /// wrong.
    pub fn authenticate(&self, username: &str, password: &str) -> CoreResult<User> {
        match self
            .users
            .iter()
            .find(|user| user.username == username && user.password == password)
        {
            Some(user) => {
                info!(username = %user.username, role = %user.role, "User signed in");
                Ok(user.clone())
            }
            None => {
                warn!(username = %username, "Sign-in rejected");
                Err(CoreError::AuthFailure)
            }
        }
    }

    pub fn find(&self, username: &str) -> Option<User> {
        self.users
            .iter()
            .find(|user| user.username == username)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::Role;

    fn directory() -> UserDirectory {
        UserDirectory::new(vec![
            User {
                id: 100,
                username: "admin".to_string(),
                password: "admin".to_string(),
                role: Role::Admin,
            },
            User {
                id: 101,
                username: "John".to_string(),
                password: "john".to_string(),
                role: Role::Customer,
            },
        ])
    }

    #[test]
    fn test_authenticate() {
        let users = directory();
        assert_eq!(users.authenticate("admin", "admin").unwrap().role, Role::Admin);
        assert_eq!(users.authenticate("John", "john").unwrap().id, 101);
    }

    #[test]
    fn test_authenticate_rejects() {
        let users = directory();
        assert_eq!(users.authenticate("John", "JOHN"), Err(CoreError::AuthFailure));
        assert_eq!(users.authenticate("john", "john"), Err(CoreError::AuthFailure));
        assert_eq!(users.authenticate("", ""), Err(CoreError::AuthFailure));
    }
}

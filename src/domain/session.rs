use crate::error::{FareError, Result};
use serde::Serialize;
use tracing::{info, warn};

/// A known user. Passwords are compared by exact match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    username: String,
    #[serde(skip)]
    password: String,
    is_admin: bool,
}

impl User {
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    pub fn verify_password(&self, password: &str) -> bool {
        self.password == password
    }

    fn matches(&self, username: &str) -> bool {
        self.username.to_lowercase() == username.to_lowercase()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    LoggedOut,
    /// Index of the logged-in user. Users are never removed, so it stays valid.
    LoggedIn(usize),
}

/// A user entry as seen from outside the session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStatus {
    pub username: String,
    pub is_admin: bool,
    pub is_logged_in: bool,
}

impl UserStatus {
    pub fn info(&self) -> String {
        let role = if self.is_admin { "Admin" } else { "Regular User" };
        let status = if self.is_logged_in { "Logged In" } else { "Logged Out" };
        format!("Username: {} | Role: {} | Status: {}", self.username, role, status)
    }
}

/// The one login session shared by the whole machine.
///
/// At most one user is logged in at any time, whoever they are.
#[derive(Debug, Clone, Default)]
pub struct AuthSession {
    users: Vec<User>,
    state: SessionState,
}

impl AuthSession {
    pub fn new() -> Self {
        Self::default()
    }

    fn find(&self, username: &str) -> Option<(usize, &User)> {
        self.users.iter().enumerate().find(|(_, u)| u.matches(username))
    }

    pub fn add_user(&mut self, username: &str, password: &str, is_admin: bool) -> Result<()> {
        if self.find(username).is_some() {
            return Err(FareError::DuplicateUser(username.to_string()));
        }
        if username.trim().is_empty() || password.trim().is_empty() {
            return Err(FareError::InvalidInput(
                "username and password cannot be empty".to_string(),
            ));
        }
        self.users.push(User {
            username: username.to_string(),
            password: password.to_string(),
            is_admin,
        });
        info!(username, is_admin, "user added");
        Ok(())
    }

    pub fn login(&mut self, username: &str, password: &str) -> Result<&User> {
        if self.state != SessionState::LoggedOut {
            warn!(username, "login refused, session already in use");
            return Err(FareError::SessionBusy);
        }
        let (index, user) = self
            .find(username)
            .ok_or_else(|| FareError::UserNotFound(username.to_string()))?;
        if !user.verify_password(password) {
            warn!(username, "login failed, incorrect password");
            return Err(FareError::BadCredentials);
        }

        self.state = SessionState::LoggedIn(index);
        let user = &self.users[index];
        info!(username = user.username(), "user logged in");
        Ok(user)
    }

    pub fn logout(&mut self) -> Result<()> {
        let user = self.current_user().ok_or(FareError::NoActiveSession)?;
        info!(username = user.username(), "user logged out");
        self.state = SessionState::LoggedOut;
        Ok(())
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn current_user(&self) -> Option<&User> {
        match self.state {
            SessionState::LoggedIn(index) => self.users.get(index),
            SessionState::LoggedOut => None,
        }
    }

    pub fn is_user_logged_in(&self) -> bool {
        self.current_user().is_some()
    }

    pub fn is_admin_logged_in(&self) -> bool {
        self.current_user().is_some_and(User::is_admin)
    }

    /// Checks a username/password pair without touching the session.
    pub fn verify_credentials(&self, username: &str, password: &str) -> bool {
        self.find(username)
            .is_some_and(|(_, user)| user.verify_password(password))
    }

    pub fn users(&self) -> Vec<UserStatus> {
        self.users
            .iter()
            .enumerate()
            .map(|(index, user)| UserStatus {
                username: user.username.clone(),
                is_admin: user.is_admin,
                is_logged_in: self.state == SessionState::LoggedIn(index),
            })
            .collect()
    }
}

//! Mocked sign-in state for the navigation header.
//!
//! There is no identity provider: logging in flips a flag and assigns the
//! fixed demo user id. The directory core never reads this.

use log::info;

/// User id assigned by the mocked login
pub const DEMO_USER_ID: &str = "demo-user";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user_id: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Sign in as the demo user. Idempotent.
    pub fn login(&mut self) {
        if self.user_id.is_none() {
            info!("Signed in as {}", DEMO_USER_ID);
            self.user_id = Some(DEMO_USER_ID.to_string());
        }
    }

    pub fn logout(&mut self) {
        if let Some(uid) = self.user_id.take() {
            info!("Signed out {}", uid);
        }
    }

    /// Flip between signed in and signed out.
    pub fn toggle(&mut self) {
        if self.is_authenticated() {
            self.logout();
        } else {
            self.login();
        }
    }
}

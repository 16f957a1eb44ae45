//! Broker credentials.
//!
//! Three opaque secrets: login, password and server endpoint. Validation
//! beyond non-emptiness is the broker's job, not ours.

use serde::Deserialize;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Broker login material.
///
/// The password is wiped from memory on drop. `Debug` is implemented by
/// hand so the password can never leak into logs.
#[derive(Clone, Default, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct Credentials {
    /// Account login / identity.
    pub login: String,
    /// Account password.
    pub password: String,
    /// Broker server endpoint.
    pub server: String,
}

impl Credentials {
    pub fn new(
        login: impl Into<String>,
        password: impl Into<String>,
        server: impl Into<String>,
    ) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
            server: server.into(),
        }
    }

    /// True when all three fields are non-empty.
    pub fn is_complete(&self) -> bool {
        !self.login.is_empty() && !self.password.is_empty() && !self.server.is_empty()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"***")
            .field("server", &self.server)
            .finish()
    }
}

//! Credential completeness validation.
//!
//! Reports each missing field independently before returning the
//! aggregate result. No network call, no format or strength checking
//! beyond non-emptiness.

use b3mf_core::Credentials;
use tracing::{error, info};

/// Validate that all three credential fields are present.
///
/// Logs one error line per missing field, then returns whether the set is
/// complete. Absence of any single field is sufficient for failure.
pub fn validate_credentials(credentials: &Credentials) -> bool {
    let mut complete = true;

    if credentials.login.is_empty() {
        error!(field = "login", "Broker credential not provided");
        complete = false;
    }
    if credentials.password.is_empty() {
        error!(field = "password", "Broker credential not provided");
        complete = false;
    }
    if credentials.server.is_empty() {
        error!(field = "server", "Broker credential not provided");
        complete = false;
    }

    if complete {
        info!("Broker credentials validated");
    }
    complete
}

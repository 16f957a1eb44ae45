//! Consent gate.
//!
//! The order phase requires an explicit affirmative. The boundary is
//! textual here (two numbered options on stdin) but any yes/no interface
//! can stand in; anything other than an explicit "1" is a decline.

use std::io::{self, BufRead, Write};
use tracing::{info, warn};

/// Yes/no gate consulted immediately before order submission.
pub trait ConsentGate {
    /// Returns true only on an explicit affirmative.
    fn confirm(&self) -> bool;
}

/// Interactive stdin consent prompt.
pub struct StdinConsent;

impl ConsentGate for StdinConsent {
    fn confirm(&self) -> bool {
        println!();
        println!("### TERMS OF RESPONSIBILITY ###");
        println!("This system is for educational purposes only.");
        println!("1 - Agree");
        println!("2 - Disagree");
        print!("Enter your option: ");
        let _ = io::stdout().flush();

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            warn!("Could not read consent answer; treating as disagreement");
            return false;
        }

        match answer.trim() {
            "1" => {
                info!("User agreed to the terms of responsibility");
                true
            }
            "2" => {
                info!("User did not agree to the terms of responsibility");
                false
            }
            other => {
                warn!(input = other, "Invalid consent option; treating as disagreement");
                false
            }
        }
    }
}

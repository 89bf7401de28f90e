//! # Sesame (passwordless login client)
//!
//! `sesame` drives a two-step passwordless login: the email is validated
//! locally, submitted to the login endpoint, and a one-time passcode (OTP)
//! is requested before control moves to the verification stage.
//!
//! ## Modules
//!
//! - [`validator`] holds the stateless field rules.
//! - [`client`] talks to the login and OTP endpoints over HTTP.
//! - [`flow`] is the state machine tying validation, the two dependent
//!   network calls, and the notification/navigation collaborators together.
//! - [`cli`] wires the pieces into a command line entry point.
//!
//! OTP verification itself, password-based authentication, and session
//! persistence are out of scope; the flow ends once the passcode has been
//! dispatched and control is handed to the verification stage.

pub mod cli;
pub mod client;
pub mod error;
pub mod flow;
pub mod validator;

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}

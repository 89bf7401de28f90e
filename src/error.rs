use crate::validator::{Field, Reason};
use thiserror::Error;

/// Everything that can go wrong while driving the login flow.
///
/// Display text is user-facing: validation failures use a fixed message,
/// the other variants carry either the server-supplied message or a
/// generic fallback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Empty field is not allowed!")]
    Validation { field: Field, reason: Reason },
    #[error("{0}")]
    Login(String),
    #[error("{0}")]
    OtpRequest(String),
    #[error("{0}")]
    Network(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::{Field, Reason};

    #[test]
    fn validation_uses_fixed_message() {
        let required = Error::Validation {
            field: Field::Email,
            reason: Reason::Required,
        };
        let format = Error::Validation {
            field: Field::Email,
            reason: Reason::Format,
        };

        assert_eq!(required.to_string(), "Empty field is not allowed!");
        assert_eq!(format.to_string(), "Empty field is not allowed!");
    }

    #[test]
    fn remote_errors_surface_their_message() {
        assert_eq!(Error::Login("Unauthorized".to_string()).to_string(), "Unauthorized");
        assert_eq!(
            Error::OtpRequest("Failed to send OTP.".to_string()).to_string(),
            "Failed to send OTP."
        );
        assert_eq!(
            Error::Network("Unable to reach the server.".to_string()).to_string(),
            "Unable to reach the server."
        );
    }
}

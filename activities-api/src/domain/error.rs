use strum::Display;
use thiserror::Error;

use super::EmailError;

/// The operation a storage failure interrupted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Operation {
    List,
    Signup,
    Unregister,
}

/// Errors that can occur during activity operations.
#[derive(Debug, Error, PartialEq)]
pub enum ActivityError {
    #[error(transparent)]
    InvalidInput(#[from] EmailError),
    #[error("Activity not found")]
    NotFound,
    #[error("Student is already signed up")]
    Conflict,
    #[error("Activity is full")]
    CapacityExceeded,
    #[error("Student is not signed up for this activity")]
    NotRegistered,
    #[error("{0} could not be completed")]
    Unavailable(Operation),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_displays_lowercase() {
        assert_eq!(Operation::Signup.to_string(), "signup");
        assert_eq!(Operation::Unregister.to_string(), "unregister");
        assert_eq!(Operation::List.to_string(), "list");
    }

    #[test]
    fn invalid_input_keeps_email_message() {
        let err = ActivityError::from(EmailError::Empty);
        assert_eq!(err.to_string(), "Email is required");
    }
}

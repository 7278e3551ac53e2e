use std::fmt;
use thiserror::Error;

/// A participant email in its normalized form: trimmed and lowercased.
///
/// Every comparison and every stored value goes through this type, so two
/// spellings of the same address can never produce separate signups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantEmail(String);

#[derive(Error, Debug, PartialEq)]
pub enum EmailError {
    #[error("Email is required")]
    Empty,
}

impl ParticipantEmail {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<&str> for ParticipantEmail {
    type Error = EmailError;

    /// Normalizes a raw email, rejecting values that are empty after trimming.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(EmailError::Empty);
        }

        Ok(Self(normalized))
    }
}

impl TryFrom<String> for ParticipantEmail {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl fmt::Display for ParticipantEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Row identifier of an activity.
///
/// Wraps i64 to match the SQLite INTEGER PRIMARY KEY type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityId(i64);

impl ActivityId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

/// Row identifier of a single signup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignupId(i64);

impl SignupId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

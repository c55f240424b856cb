/// User domain type
use super::ids::UserId;
use serde::{Deserialize, Serialize};

/// User account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: UserId,

    /// Login name
    pub username: String,

    /// Display name
    pub fullname: String,
}

impl User {
    /// Create a user with a generated id
    pub fn new(username: impl Into<String>, fullname: impl Into<String>) -> Self {
        Self {
            id: UserId::generate(),
            username: username.into(),
            fullname: fullname.into(),
        }
    }
}

use serde::{Deserialize, Serialize};

/// An application user. Only `level` changes after the first insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    /// Subscription level, `free` or `paid`.
    pub level: String,
}

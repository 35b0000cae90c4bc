use serde::{Deserialize, Serialize};

/// Name catalog entry used for person detection in chat queries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PersonRef {
    pub id: i64,
    pub name: String,
}

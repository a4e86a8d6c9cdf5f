use serde::Serialize;
use uuid::Uuid;
use chrono::Utc;

#[derive(sqlx::FromRow, Serialize, Debug, Clone, PartialEq)]
pub struct User {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub created_at: chrono::DateTime<Utc>,
}

/// A user about to be persisted; `password` already holds the argon2 hash.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

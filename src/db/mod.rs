use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::Config;
use crate::models::employee::{Employee, EmployeeFilter, EmployeePatch, NewEmployee};
use crate::models::user::{NewUser, User};

#[cfg(test)]
pub mod memory;
pub mod postgres;

#[derive(Debug, PartialEq)]
pub enum StoreError {
    /// A uniqueness constraint (username or email) rejected the write.
    DuplicateKey,
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => StoreError::DuplicateKey,
            _ => StoreError::Backend(err.to_string()),
        }
    }
}

#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn create_user(&self, user: NewUser) -> Result<User, StoreError>;
}

#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// All employees, newest first.
    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError>;

    async fn find_employee(&self, employee_id: Uuid) -> Result<Option<Employee>, StoreError>;

    async fn search_employees(&self, filter: &EmployeeFilter) -> Result<Vec<Employee>, StoreError>;

    async fn create_employee(&self, employee: NewEmployee) -> Result<Employee, StoreError>;

    /// Applies the patch in a single write. `Ok(None)` when no such employee exists.
    async fn update_employee(&self, employee_id: Uuid, patch: &EmployeePatch) -> Result<Option<Employee>, StoreError>;

    /// Returns the removed record, or `Ok(None)` when nothing matched.
    async fn delete_employee(&self, employee_id: Uuid) -> Result<Option<Employee>, StoreError>;
}

const SCHEMA: [&str; 2] = [
    r#"
    CREATE TABLE IF NOT EXISTS users (
        user_id UUID PRIMARY KEY,
        username TEXT NOT NULL UNIQUE,
        email TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS employees (
        employee_id UUID PRIMARY KEY,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        gender TEXT NOT NULL,
        designation TEXT NOT NULL,
        salary DOUBLE PRECISION NOT NULL CHECK (salary >= 1000),
        date_of_joining DATE NOT NULL,
        department TEXT NOT NULL,
        employee_photo TEXT,
        created_at TIMESTAMPTZ NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL
    )
    "#,
];

pub async fn create_pool(config: &Config) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(&config.database_url).await
}

pub async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

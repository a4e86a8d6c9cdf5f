use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use super::{CredentialStore, EmployeeStore, StoreError};
use crate::models::employee::{Employee, EmployeeFilter, EmployeePatch, NewEmployee};
use crate::models::user::{NewUser, User};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgStore {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let created = sqlx::query_as::<_, User>(
            "INSERT INTO users (user_id, username, email, password, created_at) VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }
}

#[async_trait]
impl EmployeeStore for PgStore {
    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError> {
        let employees = sqlx::query_as::<_, Employee>("SELECT * FROM employees ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(employees)
    }

    async fn find_employee(&self, employee_id: Uuid) -> Result<Option<Employee>, StoreError> {
        let employee = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE employee_id = $1")
            .bind(employee_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(employee)
    }

    async fn search_employees(&self, filter: &EmployeeFilter) -> Result<Vec<Employee>, StoreError> {
        let mut query_builder: sqlx::QueryBuilder<'_, sqlx::Postgres> =
            sqlx::QueryBuilder::new("SELECT * FROM employees WHERE TRUE");

        if let Some(designation) = &filter.designation {
            query_builder.push(" AND designation = ");
            query_builder.push_bind(designation);
        }
        if let Some(department) = &filter.department {
            query_builder.push(" AND department = ");
            query_builder.push_bind(department);
        }
        query_builder.push(" ORDER BY created_at DESC");

        let employees = query_builder
            .build_query_as::<Employee>()
            .fetch_all(&self.pool)
            .await?;
        Ok(employees)
    }

    async fn create_employee(&self, employee: NewEmployee) -> Result<Employee, StoreError> {
        let now = Utc::now();
        let created = sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO employees (
                employee_id, first_name, last_name, email, gender, designation,
                salary, date_of_joining, department, employee_photo, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(&employee.email)
        .bind(&employee.gender)
        .bind(&employee.designation)
        .bind(employee.salary)
        .bind(employee.date_of_joining)
        .bind(&employee.department)
        .bind(&employee.employee_photo)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update_employee(&self, employee_id: Uuid, patch: &EmployeePatch) -> Result<Option<Employee>, StoreError> {
        let updated = sqlx::query_as::<_, Employee>(
            r#"
            UPDATE employees SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                email = COALESCE($4, email),
                gender = COALESCE($5, gender),
                designation = COALESCE($6, designation),
                salary = COALESCE($7, salary),
                date_of_joining = COALESCE($8, date_of_joining),
                department = COALESCE($9, department),
                employee_photo = COALESCE($10, employee_photo),
                updated_at = $11
            WHERE employee_id = $1
            RETURNING *
            "#,
        )
        .bind(employee_id)
        .bind(&patch.first_name)
        .bind(&patch.last_name)
        .bind(&patch.email)
        .bind(&patch.gender)
        .bind(&patch.designation)
        .bind(patch.salary)
        .bind(patch.date_of_joining)
        .bind(&patch.department)
        .bind(&patch.employee_photo)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn delete_employee(&self, employee_id: Uuid) -> Result<Option<Employee>, StoreError> {
        let deleted = sqlx::query_as::<_, Employee>("DELETE FROM employees WHERE employee_id = $1 RETURNING *")
            .bind(employee_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(deleted)
    }
}

use serde::Serialize;

use crate::errors::AppError;
use crate::models::employee::Employee;
use crate::models::user::User;

#[derive(Serialize, Debug)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

#[derive(Serialize, Debug)]
pub struct EmployeeResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee: Option<Employee>,
}

/// List results always carry `employees`, empty on failure.
#[derive(Serialize, Debug)]
pub struct EmployeeListResponse {
    pub success: bool,
    pub message: String,
    pub employees: Vec<Employee>,
}

impl AuthResponse {
    pub fn from_result(operation: &str, result: Result<(String, User), AppError>, message: &str) -> Self {
        match result {
            Ok((token, user)) => Self {
                success: true,
                message: message.to_string(),
                token: Some(token),
                user: Some(user),
            },
            Err(err) => Self { success: false, message: err.report(operation), token: None, user: None },
        }
    }
}

impl EmployeeResponse {
    pub fn from_result(operation: &str, result: Result<Employee, AppError>, message: &str) -> Self {
        match result {
            Ok(employee) => Self { success: true, message: message.to_string(), employee: Some(employee) },
            Err(err) => Self { success: false, message: err.report(operation), employee: None },
        }
    }
}

impl EmployeeListResponse {
    pub fn from_result(operation: &str, result: Result<Vec<Employee>, AppError>, message: &str) -> Self {
        match result {
            Ok(employees) => Self { success: true, message: message.to_string(), employees },
            Err(err) => Self { success: false, message: err.report(operation), employees: Vec::new() },
        }
    }
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::db::StoreError;
use crate::errors::AppError;
use crate::models::employee::{Employee, EmployeeFilter, EmployeePatch, NewEmployee};
use crate::models::envelope::{EmployeeListResponse, EmployeeResponse};
use crate::state::AppState;
use crate::utils::jwt::Identity;
use crate::utils::photo::resolve_photo;
use crate::utils::validation::{parse_joining_date, require_fields, validate_email, validate_payload};

const REQUIRED_FIELDS: [&str; 8] = [
    "first_name",
    "last_name",
    "email",
    "gender",
    "designation",
    "salary",
    "date_of_joining",
    "department",
];

const RULE_PRIORITY: [&str; 2] = ["email", "salary"];

/// Employee payload for both create and update. Create requires every field
/// but the photo; update applies whichever fields are present.
#[derive(Deserialize, Serialize, Validate, Debug, Default, Clone)]
pub struct EmployeeInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[validate(custom = "validate_email")]
    pub email: Option<String>,
    pub gender: Option<String>,
    pub designation: Option<String>,
    #[validate(range(min = 1000.0, message = "Salary must be >= 1000"))]
    pub salary: Option<f64>,
    pub date_of_joining: Option<String>,
    pub department: Option<String>,
    pub employee_photo: Option<String>,
}

fn require_caller(caller: Option<&Identity>) -> Result<&Identity, AppError> {
    caller.ok_or(AppError::Unauthorized)
}

fn parse_eid(eid: Option<&str>) -> Result<Uuid, AppError> {
    let eid = eid
        .filter(|eid| !eid.is_empty())
        .ok_or_else(|| AppError::Validation("Missing required field: eid".to_string()))?;
    Uuid::parse_str(eid).map_err(|_| AppError::Validation("Invalid employee id".to_string()))
}

fn not_found() -> AppError {
    AppError::NotFound("Employee not found".to_string())
}

fn duplicate_email(err: StoreError) -> AppError {
    match err {
        StoreError::DuplicateKey => AppError::Conflict("Employee email already exists".to_string()),
        other => other.into(),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

pub async fn get_all_employees(state: &AppState, caller: Option<&Identity>) -> EmployeeListResponse {
    EmployeeListResponse::from_result("getAllEmployees", list(state, caller).await, "Employees fetched")
}

pub async fn search_employee_by_eid(state: &AppState, caller: Option<&Identity>, eid: Option<String>) -> EmployeeResponse {
    EmployeeResponse::from_result("searchEmployeeByEid", find(state, caller, eid).await, "Employee found")
}

pub async fn search_employees_by_designation_or_department(
    state: &AppState,
    caller: Option<&Identity>,
    designation: Option<String>,
    department: Option<String>,
) -> EmployeeListResponse {
    let filter = EmployeeFilter {
        designation: non_empty(designation),
        department: non_empty(department),
    };
    EmployeeListResponse::from_result(
        "searchEmployeesByDesignationOrDepartment",
        search(state, caller, filter).await,
        "Employees fetched",
    )
}

pub async fn add_employee(state: &AppState, caller: Option<&Identity>, input: EmployeeInput) -> EmployeeResponse {
    EmployeeResponse::from_result("addEmployee", create(state, caller, input).await, "Employee created")
}

pub async fn update_employee_by_eid(
    state: &AppState,
    caller: Option<&Identity>,
    eid: Option<String>,
    input: EmployeeInput,
) -> EmployeeResponse {
    EmployeeResponse::from_result("updateEmployeeByEid", update(state, caller, eid, input).await, "Employee updated")
}

pub async fn delete_employee_by_eid(state: &AppState, caller: Option<&Identity>, eid: Option<String>) -> EmployeeResponse {
    EmployeeResponse::from_result("deleteEmployeeByEid", remove(state, caller, eid).await, "Employee deleted")
}

async fn list(state: &AppState, caller: Option<&Identity>) -> Result<Vec<Employee>, AppError> {
    require_caller(caller)?;
    Ok(state.employees.list_employees().await?)
}

async fn find(state: &AppState, caller: Option<&Identity>, eid: Option<String>) -> Result<Employee, AppError> {
    require_caller(caller)?;
    let employee_id = parse_eid(eid.as_deref())?;
    state.employees.find_employee(employee_id).await?.ok_or_else(not_found)
}

async fn search(state: &AppState, caller: Option<&Identity>, filter: EmployeeFilter) -> Result<Vec<Employee>, AppError> {
    require_caller(caller)?;
    if filter.is_empty() {
        return Err(AppError::Validation("Provide designation or department".to_string()));
    }
    Ok(state.employees.search_employees(&filter).await?)
}

async fn remove(state: &AppState, caller: Option<&Identity>, eid: Option<String>) -> Result<Employee, AppError> {
    let caller = require_caller(caller)?;
    let employee_id = parse_eid(eid.as_deref())?;
    let deleted = state.employees.delete_employee(employee_id).await?.ok_or_else(not_found)?;
    log::info!("Employee {} deleted by {}", deleted.employee_id, caller.username);
    Ok(deleted)
}

async fn create(state: &AppState, caller: Option<&Identity>, input: EmployeeInput) -> Result<Employee, AppError> {
    let caller = require_caller(caller)?;
    require_fields(&input, &REQUIRED_FIELDS)?;
    validate_payload(&input, &RULE_PRIORITY)?;
    let date_of_joining = parse_joining_date(input.date_of_joining.as_deref().unwrap_or_default())?;

    // Upload last so a rejected input never leaves an orphaned photo behind.
    let employee_photo = resolve_photo(input.employee_photo.as_deref(), state.photos.as_ref()).await?;

    let employee = state
        .employees
        .create_employee(NewEmployee {
            first_name: input.first_name.unwrap_or_default(),
            last_name: input.last_name.unwrap_or_default(),
            email: input.email.unwrap_or_default(),
            gender: input.gender.unwrap_or_default(),
            designation: input.designation.unwrap_or_default(),
            salary: input.salary.unwrap_or_default(),
            date_of_joining,
            department: input.department.unwrap_or_default(),
            employee_photo,
        })
        .await
        .map_err(duplicate_email)?;

    log::info!("Employee {} created by {}", employee.employee_id, caller.username);
    Ok(employee)
}

async fn update(
    state: &AppState,
    caller: Option<&Identity>,
    eid: Option<String>,
    input: EmployeeInput,
) -> Result<Employee, AppError> {
    let caller = require_caller(caller)?;
    let employee_id = parse_eid(eid.as_deref())?;
    if state.employees.find_employee(employee_id).await?.is_none() {
        return Err(not_found());
    }
    validate_payload(&input, &RULE_PRIORITY)?;

    let date_of_joining = match non_empty(input.date_of_joining) {
        Some(raw) => Some(parse_joining_date(&raw)?),
        None => None,
    };
    // Only a newly supplied reference is resolved; the stored URL stays otherwise.
    let employee_photo = match non_empty(input.employee_photo) {
        Some(reference) => resolve_photo(Some(&reference), state.photos.as_ref()).await?,
        None => None,
    };

    let patch = EmployeePatch {
        first_name: input.first_name,
        last_name: input.last_name,
        email: input.email,
        gender: input.gender,
        designation: input.designation,
        salary: input.salary,
        date_of_joining,
        department: input.department,
        employee_photo,
    };

    // The record can vanish between the lookup and the write.
    let employee = state
        .employees
        .update_employee(employee_id, &patch)
        .await
        .map_err(duplicate_email)?
        .ok_or_else(not_found)?;

    log::info!("Employee {} updated by {}", employee.employee_id, caller.username);
    Ok(employee)
}

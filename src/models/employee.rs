use serde::Serialize;
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};

#[derive(sqlx::FromRow, Serialize, Debug, Clone, PartialEq)]
pub struct Employee {
    pub employee_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: String,
    pub designation: String,
    pub salary: f64,
    pub date_of_joining: NaiveDate,
    pub department: String,
    pub employee_photo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated employee ready to be inserted.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: String,
    pub designation: String,
    pub salary: f64,
    pub date_of_joining: NaiveDate,
    pub department: String,
    pub employee_photo: Option<String>,
}

/// Fields to overwrite on an existing employee. `None` leaves the stored value alone.
#[derive(Debug, Clone, Default)]
pub struct EmployeePatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub designation: Option<String>,
    pub salary: Option<f64>,
    pub date_of_joining: Option<NaiveDate>,
    pub department: Option<String>,
    pub employee_photo: Option<String>,
}

impl EmployeePatch {
    pub fn apply(&self, employee: &mut Employee) {
        if let Some(first_name) = &self.first_name {
            employee.first_name = first_name.clone();
        }
        if let Some(last_name) = &self.last_name {
            employee.last_name = last_name.clone();
        }
        if let Some(email) = &self.email {
            employee.email = email.clone();
        }
        if let Some(gender) = &self.gender {
            employee.gender = gender.clone();
        }
        if let Some(designation) = &self.designation {
            employee.designation = designation.clone();
        }
        if let Some(salary) = self.salary {
            employee.salary = salary;
        }
        if let Some(date_of_joining) = self.date_of_joining {
            employee.date_of_joining = date_of_joining;
        }
        if let Some(department) = &self.department {
            employee.department = department.clone();
        }
        if let Some(photo) = &self.employee_photo {
            employee.employee_photo = Some(photo.clone());
        }
    }
}

/// Search criteria; supplied filters are combined with AND.
#[derive(Debug, Clone, Default)]
pub struct EmployeeFilter {
    pub designation: Option<String>,
    pub department: Option<String>,
}

impl EmployeeFilter {
    pub fn is_empty(&self) -> bool {
        self.designation.is_none() && self.department.is_none()
    }

    pub fn matches(&self, employee: &Employee) -> bool {
        self.designation.as_deref().map_or(true, |d| employee.designation == d)
            && self.department.as_deref().map_or(true, |d| employee.department == d)
    }
}

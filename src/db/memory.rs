use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use super::{CredentialStore, EmployeeStore, StoreError};
use crate::models::employee::{Employee, EmployeeFilter, EmployeePatch, NewEmployee};
use crate::models::user::{NewUser, User};

/// In-process store for tests. Enforces the same uniqueness rules as the
/// database schema and counts every call so tests can assert the store was
/// never reached.
#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
    employees: Mutex<Vec<Employee>>,
    calls: AtomicUsize,
    fail_with: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn employee_count(&self) -> usize {
        self.employees.lock().unwrap().len()
    }

    /// Makes every subsequent call fail with a backend error.
    pub fn fail_with(&self, detail: &str) {
        *self.fail_with.lock().unwrap() = Some(detail.to_string());
    }

    fn touch(&self) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.fail_with.lock().unwrap().as_ref() {
            Some(detail) => Err(StoreError::Backend(detail.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        self.touch()?;
        Ok(self.users.lock().unwrap().iter().find(|u| u.username == username).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        self.touch()?;
        Ok(self.users.lock().unwrap().iter().find(|u| u.email == email).cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        self.touch()?;
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.username == user.username || u.email == user.email) {
            return Err(StoreError::DuplicateKey);
        }
        let created = User {
            user_id: Uuid::new_v4(),
            username: user.username,
            email: user.email,
            password: user.password,
            created_at: Utc::now(),
        };
        users.push(created.clone());
        Ok(created)
    }
}

#[async_trait]
impl EmployeeStore for MemoryStore {
    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError> {
        self.touch()?;
        let mut employees = self.employees.lock().unwrap().clone();
        employees.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(employees)
    }

    async fn find_employee(&self, employee_id: Uuid) -> Result<Option<Employee>, StoreError> {
        self.touch()?;
        Ok(self.employees.lock().unwrap().iter().find(|e| e.employee_id == employee_id).cloned())
    }

    async fn search_employees(&self, filter: &EmployeeFilter) -> Result<Vec<Employee>, StoreError> {
        self.touch()?;
        let mut employees: Vec<Employee> =
            self.employees.lock().unwrap().iter().filter(|e| filter.matches(e)).cloned().collect();
        employees.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(employees)
    }

    async fn create_employee(&self, employee: NewEmployee) -> Result<Employee, StoreError> {
        self.touch()?;
        let mut employees = self.employees.lock().unwrap();
        if employees.iter().any(|e| e.email == employee.email) {
            return Err(StoreError::DuplicateKey);
        }
        // Keep creation order observable even when the clock does not advance.
        let now = Utc::now() + Duration::microseconds(employees.len() as i64);
        let created = Employee {
            employee_id: Uuid::new_v4(),
            first_name: employee.first_name,
            last_name: employee.last_name,
            email: employee.email,
            gender: employee.gender,
            designation: employee.designation,
            salary: employee.salary,
            date_of_joining: employee.date_of_joining,
            department: employee.department,
            employee_photo: employee.employee_photo,
            created_at: now,
            updated_at: now,
        };
        employees.push(created.clone());
        Ok(created)
    }

    async fn update_employee(&self, employee_id: Uuid, patch: &EmployeePatch) -> Result<Option<Employee>, StoreError> {
        self.touch()?;
        let mut employees = self.employees.lock().unwrap();
        if let Some(email) = &patch.email {
            if employees.iter().any(|e| e.employee_id != employee_id && &e.email == email) {
                return Err(StoreError::DuplicateKey);
            }
        }
        Ok(employees.iter_mut().find(|e| e.employee_id == employee_id).map(|employee| {
            patch.apply(employee);
            employee.updated_at = Utc::now();
            employee.clone()
        }))
    }

    async fn delete_employee(&self, employee_id: Uuid) -> Result<Option<Employee>, StoreError> {
        self.touch()?;
        let mut employees = self.employees.lock().unwrap();
        Ok(employees
            .iter()
            .position(|e| e.employee_id == employee_id)
            .map(|index| employees.remove(index)))
    }
}

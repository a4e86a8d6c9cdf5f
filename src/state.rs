use std::sync::Arc;

use crate::db::{CredentialStore, EmployeeStore};
use crate::utils::jwt::JwtKeys;
use crate::utils::photo::PhotoUploader;

/// Process-wide collaborators shared by every request. Immutable after startup.
pub struct AppState {
    pub credentials: Arc<dyn CredentialStore>,
    pub employees: Arc<dyn EmployeeStore>,
    pub photos: Arc<dyn PhotoUploader>,
    pub jwt: JwtKeys,
}

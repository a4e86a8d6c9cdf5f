use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::db::memory::MemoryStore;
use crate::errors::AppError;
use crate::handlers::employee::EmployeeInput;
use crate::models::user::User;
use crate::state::AppState;
use crate::utils::jwt::{Identity, JwtKeys};
use crate::utils::photo::{InlineImage, PhotoUploader};

pub const JWT_SECRET: &str = "test-secret";

/// Smallest valid PNG: a single transparent pixel.
pub const PNG_PIXEL: [u8; 67] = [
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F, 0x15, 0xC4,
    0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00, 0x01, 0x00, 0x00,
    0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE,
    0x42, 0x60, 0x82,
];

#[derive(Default)]
pub struct FakeUploader {
    uploads: AtomicUsize,
    failing: bool,
}

impl FakeUploader {
    pub fn failing() -> Self {
        Self { uploads: AtomicUsize::new(0), failing: true }
    }

    pub fn uploads(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PhotoUploader for FakeUploader {
    async fn upload(&self, image: InlineImage) -> Result<String, AppError> {
        if self.failing {
            return Err(AppError::Upstream("bucket unreachable".to_string()));
        }
        let n = self.uploads.fetch_add(1, Ordering::SeqCst);
        Ok(format!("https://photos.example.com/{}.{}", n, image.extension))
    }
}

pub struct Harness {
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    pub uploader: Arc<FakeUploader>,
}

pub fn harness() -> Harness {
    harness_with_uploader(FakeUploader::default())
}

pub fn harness_with_uploader(uploader: FakeUploader) -> Harness {
    let store = Arc::new(MemoryStore::default());
    let uploader = Arc::new(uploader);
    let state = AppState {
        credentials: store.clone(),
        employees: store.clone(),
        photos: uploader.clone(),
        jwt: JwtKeys::new(JWT_SECRET),
    };
    Harness { state, store, uploader }
}

pub fn caller() -> Identity {
    Identity {
        id: "7a4c1e8e-2d7f-4f7b-9d55-1f0d3d2b9a10".to_string(),
        username: "hr_admin".to_string(),
        email: "hr@example.com".to_string(),
    }
}

pub fn user() -> User {
    User {
        user_id: Uuid::parse_str(&caller().id).unwrap(),
        username: caller().username,
        email: caller().email,
        password: "not-a-real-hash".to_string(),
        created_at: Utc::now(),
    }
}

pub fn employee_input(email: &str, department: &str) -> EmployeeInput {
    EmployeeInput {
        first_name: Some("A".to_string()),
        last_name: Some("B".to_string()),
        email: Some(email.to_string()),
        gender: Some("M".to_string()),
        designation: Some("Eng".to_string()),
        salary: Some(2000.0),
        date_of_joining: Some("2024-01-01".to_string()),
        department: Some(department.to_string()),
        employee_photo: None,
    }
}

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::db::StoreError;
use crate::errors::AppError;
use crate::models::envelope::AuthResponse;
use crate::models::user::{NewUser, User};
use crate::state::AppState;
use crate::utils::jwt;
use crate::utils::password::{hash_password, verify_password};
use crate::utils::validation::{is_email, require_fields, validate_email, validate_payload};

#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct LoginInput {
    pub username_or_email: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize, Serialize, Validate, Debug, Default)]
pub struct SignupInput {
    pub username: Option<String>,
    #[validate(custom = "validate_email")]
    pub email: Option<String>,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,
}

pub async fn login(state: &AppState, input: LoginInput) -> AuthResponse {
    AuthResponse::from_result("login", authenticate(state, input).await, "Login success")
}

pub async fn signup(state: &AppState, input: SignupInput) -> AuthResponse {
    AuthResponse::from_result("signup", register(state, input).await, "Signup success")
}

async fn authenticate(state: &AppState, input: LoginInput) -> Result<(String, User), AppError> {
    require_fields(&input, &["usernameOrEmail", "password"])?;
    let identifier = input.username_or_email.unwrap_or_default();
    let password = input.password.unwrap_or_default();

    let user = if is_email(&identifier) {
        state.credentials.find_user_by_email(&identifier).await?
    } else {
        state.credentials.find_user_by_username(&identifier).await?
    };
    // Unknown user and wrong password are reported identically.
    let user = user.ok_or(AppError::InvalidCredentials)?;
    if !verify_password(password, user.password.clone()).await? {
        return Err(AppError::InvalidCredentials);
    }

    let token = issue_token(state, &user)?;
    log::info!("User {} logged in", user.username);
    Ok((token, user))
}

async fn register(state: &AppState, input: SignupInput) -> Result<(String, User), AppError> {
    require_fields(&input, &["username", "email", "password"])?;
    validate_payload(&input, &["email", "password"])?;
    let username = input.username.unwrap_or_default();
    let email = input.email.unwrap_or_default();
    let password = input.password.unwrap_or_default();

    if state.credentials.find_user_by_username(&username).await?.is_some() {
        return Err(AppError::Conflict("Username already exists".to_string()));
    }
    if state.credentials.find_user_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict("Email already exists".to_string()));
    }

    let password = hash_password(password).await?;
    let user = state
        .credentials
        .create_user(NewUser { username, email, password })
        .await
        .map_err(|err| match err {
            // Lost a race with a concurrent signup for the same name or address.
            StoreError::DuplicateKey => AppError::Conflict("Username or email already exists".to_string()),
            other => other.into(),
        })?;

    let token = issue_token(state, &user)?;
    log::info!("User {} signed up", user.username);
    Ok((token, user))
}

fn issue_token(state: &AppState, user: &User) -> Result<String, AppError> {
    jwt::generate_token(user, &state.jwt)
        .map_err(|err| AppError::Upstream(format!("Token generation error: {}", err)))
}

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::account::errors::EmailError;
use crate::account::errors::RoleError;
use crate::account::errors::UserTypeError;
use crate::account::models::EmailAddress;
use crate::account::models::RegisterCommand;
use crate::account::models::Role;
use crate::account::models::UserType;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    let user = state
        .account_service
        .register(body.try_into_command()?)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        RegisterResponseData {
            message: "User registered successfully".to_string(),
            user: (&user).into(),
        },
    ))
}

/// HTTP request body for registration (raw JSON).
///
/// All fields are optional at the serde level so absent or blank fields
/// produce a 400 with a readable message instead of a deserialize rejection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    #[serde(rename = "userType")]
    user_type: Option<String>,
    role: Option<String>,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Missing required fields")]
    MissingFields,

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid user type: {0}")]
    UserType(#[from] UserTypeError),

    #[error("Invalid role: {0}")]
    Role(#[from] RoleError),
}

fn required(field: Option<String>) -> Result<String, ParseRegisterRequestError> {
    match field {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ParseRegisterRequestError::MissingFields),
    }
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, ParseRegisterRequestError> {
        let name = required(self.name)?;
        let email = EmailAddress::new(required(self.email)?)?;
        let password = required(self.password)?;
        let user_type = UserType::new(required(self.user_type)?)?;
        let role = match self.role {
            Some(role) => role.parse::<Role>()?,
            None => Role::default(),
        };

        Ok(RegisterCommand {
            name,
            email,
            user_type,
            role,
            password,
        })
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub message: String,
    pub user: UserData,
}

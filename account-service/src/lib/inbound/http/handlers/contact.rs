use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::account::errors::EmailError;
use crate::account::models::EmailAddress;
use crate::contact::models::ContactSubmission;
use crate::contact::models::SubmitContactCommand;
use crate::inbound::http::router::AppState;

pub async fn submit_contact(
    State(state): State<AppState>,
    Json(body): Json<ContactRequest>,
) -> Result<ApiSuccess<ContactResponseData>, ApiError> {
    let submission = state
        .contact_service
        .submit(body.try_into_command()?)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        ContactResponseData {
            success: true,
            data: (&submission).into(),
        },
    ))
}

/// HTTP request body for a contact submission (raw JSON).
///
/// The web client labels the subject field "organization" on some forms,
/// hence the alias.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContactRequest {
    name: Option<String>,
    email: Option<String>,
    #[serde(alias = "organization")]
    subject: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Clone, Error)]
enum ParseContactRequestError {
    #[error("Please provide all required fields")]
    MissingFields,

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),
}

fn required(field: Option<String>) -> Result<String, ParseContactRequestError> {
    match field {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ParseContactRequestError::MissingFields),
    }
}

impl ContactRequest {
    fn try_into_command(self) -> Result<SubmitContactCommand, ParseContactRequestError> {
        Ok(SubmitContactCommand {
            name: required(self.name)?,
            email: EmailAddress::new(required(self.email)?)?,
            subject: required(self.subject)?,
            message: required(self.message)?,
        })
    }
}

impl From<ParseContactRequestError> for ApiError {
    fn from(err: ParseContactRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactResponseData {
    pub success: bool,
    pub data: ContactData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactData {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<&ContactSubmission> for ContactData {
    fn from(submission: &ContactSubmission) -> Self {
        Self {
            id: submission.id.to_string(),
            name: submission.name.clone(),
            email: submission.email.as_str().to_string(),
            subject: submission.subject.clone(),
            message: submission.message.clone(),
            status: submission.status.to_string(),
            created_at: submission.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_organization_alias_for_subject() {
        let body: ContactRequest = serde_json::from_value(serde_json::json!({
            "name": "Alice",
            "email": "a@x.com",
            "organization": "Lincoln High",
            "message": "Demo request"
        }))
        .unwrap();

        let command = body.try_into_command().unwrap();
        assert_eq!(command.subject, "Lincoln High");
    }

    #[test]
    fn test_missing_message_is_rejected() {
        let body: ContactRequest = serde_json::from_value(serde_json::json!({
            "name": "Alice",
            "email": "a@x.com",
            "subject": "Hello"
        }))
        .unwrap();

        assert!(matches!(
            body.try_into_command(),
            Err(ParseContactRequestError::MissingFields)
        ));
    }
}

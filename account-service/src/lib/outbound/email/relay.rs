use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::config::EmailConfig;
use crate::contact::errors::NotifierError;
use crate::contact::models::ContactSubmission;
use crate::contact::ports::ContactNotifier;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Contact notifier that posts to an HTTP email relay.
///
/// The relay owns SMTP/provider concerns; this adapter only formats the
/// notification and hands it over.
pub struct RelayEmailNotifier {
    client: reqwest::Client,
    relay_url: String,
    from: String,
    to: String,
}

/// Resend-style send request accepted by the relay.
#[derive(Debug, Serialize)]
struct SendEmailRequest {
    from: String,
    to: Vec<String>,
    subject: String,
    text: String,
}

impl RelayEmailNotifier {
    pub fn new(config: &EmailConfig) -> Result<Self, NotifierError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| NotifierError::InitFailed(e.to_string()))?;

        Ok(Self {
            client,
            relay_url: config.relay_url.clone(),
            from: config.from.clone(),
            to: config.to.clone(),
        })
    }

    fn build_request(&self, submission: &ContactSubmission) -> SendEmailRequest {
        SendEmailRequest {
            from: self.from.clone(),
            to: vec![self.to.clone()],
            subject: format!("New Contact Form Submission: {}", submission.subject),
            text: format!(
                "Name: {}\nEmail: {}\nSubject: {}\nMessage: {}\n",
                submission.name,
                submission.email.as_str(),
                submission.subject,
                submission.message,
            ),
        }
    }
}

#[async_trait]
impl ContactNotifier for RelayEmailNotifier {
    async fn notify(&self, submission: &ContactSubmission) -> Result<(), NotifierError> {
        let request = self.build_request(submission);

        let response = self
            .client
            .post(&self.relay_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| NotifierError::SendFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(NotifierError::Rejected(response.status().as_u16()));
        }

        tracing::info!(
            submission_id = %submission.id,
            "Contact notification email dispatched"
        );

        Ok(())
    }
}

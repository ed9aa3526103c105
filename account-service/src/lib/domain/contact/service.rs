use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::contact::errors::ContactError;
use crate::contact::models::ContactId;
use crate::contact::models::ContactStatus;
use crate::contact::models::ContactSubmission;
use crate::contact::models::SubmitContactCommand;
use crate::contact::ports::ContactNotifier;
use crate::contact::ports::ContactRepository;
use crate::contact::ports::ContactServicePort;

/// Domain service for the contact-form-to-email pipeline.
pub struct ContactService<CR, CN>
where
    CR: ContactRepository,
    CN: ContactNotifier,
{
    repository: Arc<CR>,
    notifier: Arc<CN>,
}

impl<CR, CN> ContactService<CR, CN>
where
    CR: ContactRepository,
    CN: ContactNotifier,
{
    pub fn new(repository: Arc<CR>, notifier: Arc<CN>) -> Self {
        Self {
            repository,
            notifier,
        }
    }
}

#[async_trait]
impl<CR, CN> ContactServicePort for ContactService<CR, CN>
where
    CR: ContactRepository,
    CN: ContactNotifier,
{
    async fn submit(
        &self,
        command: SubmitContactCommand,
    ) -> Result<ContactSubmission, ContactError> {
        let submission = ContactSubmission {
            id: ContactId::new(),
            name: command.name,
            email: command.email,
            subject: command.subject,
            message: command.message,
            status: ContactStatus::Pending,
            created_at: Utc::now(),
        };

        let created = self.repository.create(submission).await?;

        // The submission is already persisted; a failed email must not fail
        // the request.
        if let Err(e) = self.notifier.notify(&created).await {
            tracing::error!(
                submission_id = %created.id,
                error = %e,
                "Failed to send contact notification email"
            );
        }

        Ok(created)
    }
}

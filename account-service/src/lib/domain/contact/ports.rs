use async_trait::async_trait;

use crate::contact::errors::ContactError;
use crate::contact::errors::NotifierError;
use crate::contact::models::ContactSubmission;
use crate::contact::models::SubmitContactCommand;

/// Port for contact operations consumed by the HTTP layer.
#[async_trait]
pub trait ContactServicePort: Send + Sync + 'static {
    /// Persist a contact submission and notify the site owners.
    ///
    /// Notification is best-effort; only persistence failures surface.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn submit(
        &self,
        command: SubmitContactCommand,
    ) -> Result<ContactSubmission, ContactError>;
}

/// Persistence operations for contact submissions.
#[async_trait]
pub trait ContactRepository: Send + Sync + 'static {
    /// Persist a new submission.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn create(
        &self,
        submission: ContactSubmission,
    ) -> Result<ContactSubmission, ContactError>;
}

/// Email notification collaborator for new submissions.
#[async_trait]
pub trait ContactNotifier: Send + Sync + 'static {
    /// Deliver a notification email for a submission.
    ///
    /// # Errors
    /// * `SendFailed` - Delivery attempt failed
    /// * `Rejected` - The relay refused the notification
    async fn notify(&self, submission: &ContactSubmission) -> Result<(), NotifierError>;
}

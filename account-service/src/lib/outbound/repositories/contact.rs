use async_trait::async_trait;
use sqlx::PgPool;

use crate::contact::errors::ContactError;
use crate::contact::models::ContactSubmission;
use crate::contact::ports::ContactRepository;

pub struct PostgresContactRepository {
    pool: PgPool,
}

impl PostgresContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactRepository for PostgresContactRepository {
    async fn create(
        &self,
        submission: ContactSubmission,
    ) -> Result<ContactSubmission, ContactError> {
        sqlx::query(
            r#"
            INSERT INTO contact_submissions (id, name, email, subject, message, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(submission.id.0)
        .bind(&submission.name)
        .bind(submission.email.as_str())
        .bind(&submission.subject)
        .bind(&submission.message)
        .bind(submission.status.as_str())
        .bind(submission.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| ContactError::DatabaseError(e.to_string()))?;

        Ok(submission)
    }
}

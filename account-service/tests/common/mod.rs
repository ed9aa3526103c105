use std::sync::Arc;
use std::sync::Mutex;

use account_service::account::errors::AccountError;
use account_service::account::models::EmailAddress;
use account_service::account::models::User;
use account_service::account::models::UserId;
use account_service::account::ports::AccountServicePort;
use account_service::account::ports::UserRepository;
use account_service::account::service::AccountService;
use account_service::contact::errors::ContactError;
use account_service::contact::errors::NotifierError;
use account_service::contact::models::ContactSubmission;
use account_service::contact::ports::ContactNotifier;
use account_service::contact::ports::ContactRepository;
use account_service::contact::ports::ContactServicePort;
use account_service::contact::service::ContactService;
use account_service::inbound::http::router::create_router;
use async_trait::async_trait;
use auth::Authenticator;
use auth::Claims;
use chrono::Duration;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-token-signing-32b!";

/// Test application that spawns a real server on a random port, wired with
/// in-memory collaborators so the suite needs no external services.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub notifier: Arc<RecordingNotifier>,
}

/// In-memory user directory enforcing the email uniqueness invariant.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, AccountError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(AccountError::EmailAlreadyExists(user.email.to_string()));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, AccountError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| &u.email == email).cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AccountError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| &u.id == id).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryContactRepository {
    submissions: Mutex<Vec<ContactSubmission>>,
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn create(
        &self,
        submission: ContactSubmission,
    ) -> Result<ContactSubmission, ContactError> {
        self.submissions.lock().unwrap().push(submission.clone());
        Ok(submission)
    }
}

/// Notifier that records delivered subjects, or fails every delivery when
/// constructed with `fail = true`.
pub struct RecordingNotifier {
    pub sent_subjects: Mutex<Vec<String>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new(fail: bool) -> Self {
        Self {
            sent_subjects: Mutex::new(Vec::new()),
            fail,
        }
    }
}

#[async_trait]
impl ContactNotifier for RecordingNotifier {
    async fn notify(&self, submission: &ContactSubmission) -> Result<(), NotifierError> {
        if self.fail {
            return Err(NotifierError::SendFailed("relay unreachable".to_string()));
        }
        self.sent_subjects
            .lock()
            .unwrap()
            .push(submission.subject.clone());
        Ok(())
    }
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        Self::spawn_with(false).await
    }

    pub async fn spawn_with(notifier_fails: bool) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authenticator = Arc::new(Authenticator::new(TEST_SECRET));

        let account_service: Arc<dyn AccountServicePort> = Arc::new(AccountService::new(
            Arc::new(InMemoryUserRepository::default()),
            Arc::clone(&authenticator),
            Duration::days(7),
        ));

        let notifier = Arc::new(RecordingNotifier::new(notifier_fails));
        let contact_service: Arc<dyn ContactServicePort> = Arc::new(ContactService::new(
            Arc::new(InMemoryContactRepository::default()),
            Arc::clone(&notifier),
        ));

        let router = create_router(account_service, contact_service, authenticator);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            notifier,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Sign a token with the app's secret, bypassing login.
    pub fn issue_token(&self, subject: impl ToString, ttl: Duration) -> String {
        Authenticator::new(TEST_SECRET)
            .issue_token(&Claims::for_subject(subject, ttl))
            .expect("Failed to issue token")
    }
}

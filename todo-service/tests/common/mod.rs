use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::ManualClock;
use auth::PasswordHasher;
use auth::TokenAuthority;
use auth::TokenSettings;
use chrono::Utc;
use todo_service::account::errors::AccountError;
use todo_service::account::models::Account;
use todo_service::account::models::EmailAddress;
use todo_service::account::ports::AccountRepository;
use todo_service::account::service::AccountService;
use todo_service::config::CookieConfig;
use todo_service::inbound::http::router::create_router;
use todo_service::todo::errors::TodoError;
use todo_service::todo::models::Todo;
use todo_service::todo::models::TodoId;
use todo_service::todo::ports::TodoRepository;
use todo_service::todo::service::TodoService;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over in-memory storage
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub clock: Arc<ManualClock>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        Self::spawn_with(TokenSettings::default()).await
    }

    pub async fn spawn_with(settings: TokenSettings) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let clock = Arc::new(ManualClock::new(Utc::now()));
        let token_authority =
            Arc::new(TokenAuthority::new(TEST_SECRET, settings).with_clock(clock.clone()));

        // Lowest bcrypt cost keeps the suite fast
        let password_hasher = PasswordHasher::with_cost(PasswordHasher::MIN_COST).expect("Invalid bcrypt cost");

        let account_service = Arc::new(AccountService::new(
            Arc::new(InMemoryAccountRepository::default()),
            password_hasher,
        ));
        let todo_service = Arc::new(TodoService::new(Arc::new(
            InMemoryTodoRepository::default(),
        )));

        let router = create_router(
            account_service,
            todo_service,
            token_authority,
            CookieConfig { secure: true },
        );

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            clock,
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

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make PATCH request with Bearer token
    pub fn patch_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .patch(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register an account and assert it was created
    pub async fn signup(&self, username: &str, email: &str, password: &str) {
        let response = self
            .post("/api/auth/signup")
            .json(&serde_json::json!({
                "username": username,
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
    }

    /// Log in and return the raw response
    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/auth/login")
            .json(&serde_json::json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Sign up and log in, returning (accessToken, refreshToken)
    pub async fn signup_and_login(&self) -> (String, String) {
        self.signup("al", "a@b.com", "secret1").await;

        let body: serde_json::Value = self
            .login("a@b.com", "secret1")
            .await
            .json()
            .await
            .expect("Failed to parse response");

        (
            body["accessToken"].as_str().unwrap().to_string(),
            body["refreshToken"].as_str().unwrap().to_string(),
        )
    }
}

/// Account storage with the same uniqueness rules as the accounts table
#[derive(Default)]
pub struct InMemoryAccountRepository {
    accounts: Mutex<Vec<Account>>,
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        let mut accounts = self.accounts.lock().unwrap();

        if accounts
            .iter()
            .any(|a| a.username.as_str() == account.username.as_str())
        {
            return Err(AccountError::UsernameAlreadyExists(
                account.username.as_str().to_string(),
            ));
        }
        if accounts
            .iter()
            .any(|a| a.email.as_str() == account.email.as_str())
        {
            return Err(AccountError::EmailAlreadyExists(
                account.email.as_str().to_string(),
            ));
        }

        accounts.push(account.clone());
        Ok(account)
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts
            .iter()
            .find(|a| a.email.as_str() == email.as_str())
            .cloned())
    }
}

#[derive(Default)]
pub struct InMemoryTodoRepository {
    todos: Mutex<Vec<Todo>>,
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn create(&self, todo: Todo) -> Result<Todo, TodoError> {
        self.todos.lock().unwrap().push(todo.clone());
        Ok(todo)
    }

    async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, TodoError> {
        let todos = self.todos.lock().unwrap();
        Ok(todos.iter().find(|t| t.id == *id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Todo>, TodoError> {
        let todos = self.todos.lock().unwrap();
        Ok(todos.iter().rev().cloned().collect())
    }

    async fn update(&self, todo: Todo) -> Result<Todo, TodoError> {
        let mut todos = self.todos.lock().unwrap();
        let slot = todos
            .iter_mut()
            .find(|t| t.id == todo.id)
            .ok_or_else(|| TodoError::NotFound(todo.id.to_string()))?;
        *slot = todo.clone();
        Ok(todo)
    }

    async fn delete(&self, id: &TodoId) -> Result<(), TodoError> {
        let mut todos = self.todos.lock().unwrap();
        let before = todos.len();
        todos.retain(|t| t.id != *id);

        if todos.len() == before {
            return Err(TodoError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

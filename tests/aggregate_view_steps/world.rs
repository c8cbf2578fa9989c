//! Shared world state for unified task view scenarios.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode, header::AUTHORIZATION, header::LOCATION};
use mockable::DefaultClock;
use mockito::ServerGuard;
use rstest::fixture;
use taskmesh::aggregation::services::AggregationEngine;
use taskmesh::http::{AppState, router};
use taskmesh::identity::{
    adapters::memory::InMemoryUserRepository,
    domain::UserId,
    ports::UserRepository,
    services::{AccountService, SessionGuard},
};
use taskmesh::oauth::{
    adapters::HttpTokenExchanger,
    domain::{ClientCredentials, ClientSecret, ProviderDescriptor},
    ports::TokenExchanger,
    services::OAuthExchangeFlow,
};
use taskmesh::provider::{
    adapters::{github::GitHubAdapter, http::build_client, memory::InMemoryCredentialStore},
    ports::CredentialStore,
    services::ProviderRegistry,
};
use taskmesh::task::{
    adapters::memory::InMemoryTaskRepository, ports::TaskRepository, services::TaskService,
};
use tower::ServiceExt;

const SECRET: &str = "scenario-secret";

/// Browser client URL that callbacks redirect to.
pub const CLIENT_URL: &str = "http://client.test";

/// Response captured from the router.
pub struct Captured {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: serde_json::Value,
}

/// Scenario world wiring the real router, tracker adapter and token
/// exchanger against one mock provider server.
pub struct AggregateWorld {
    pub server: ServerGuard,
    pub state: AppState,
    pub guard: Arc<SessionGuard<DefaultClock>>,
    pub credentials: Arc<InMemoryCredentialStore>,
    pub user: UserId,
    pub last_response: Option<Captured>,
}

impl AggregateWorld {
    /// Creates a world with an empty mock server and fresh storage.
    ///
    /// # Panics
    ///
    /// Panics when the HTTP client or signing keys cannot be built.
    #[must_use]
    pub fn new() -> Self {
        let server = run_async(mockito::Server::new_async());
        let base = server.url();
        let client = build_client(Duration::from_secs(2)).expect("client builds");
        let clock = Arc::new(DefaultClock);

        let tasks: Arc<dyn TaskRepository> = Arc::new(InMemoryTaskRepository::new());
        let credentials = Arc::new(InMemoryCredentialStore::new());
        let store: Arc<dyn CredentialStore> = Arc::clone(&credentials) as Arc<dyn CredentialStore>;
        let guard =
            Arc::new(SessionGuard::new(SECRET, Arc::clone(&clock)).expect("valid session guard"));

        let registry = ProviderRegistry::new()
            .with_adapter(Arc::new(GitHubAdapter::new(client.clone(), base.as_str())));
        let engine = Arc::new(AggregationEngine::new(
            Arc::clone(&tasks),
            Arc::clone(&store),
            registry,
        ));

        let github = ProviderDescriptor::github(ClientCredentials::new(
            "scenario-client",
            ClientSecret::new("scenario-client-secret"),
            "http://api.test/auth/github/callback",
        ))
        .with_endpoints(
            format!("{base}/login/oauth/authorize"),
            format!("{base}/login/oauth/access_token"),
        );
        let exchanger: Arc<dyn TokenExchanger> = Arc::new(HttpTokenExchanger::new(client));
        let oauth = Arc::new(
            OAuthExchangeFlow::new([github], SECRET, store, exchanger, Arc::clone(&clock))
                .expect("valid oauth flow"),
        );
        let users: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
        let accounts = Arc::new(AccountService::new(users, Arc::clone(&clock)));
        let task_service = Arc::new(TaskService::new(tasks, clock));

        Self {
            server,
            state: AppState::new(
                Arc::clone(&guard),
                accounts,
                task_service,
                engine,
                oauth,
                CLIENT_URL,
            ),
            guard,
            credentials,
            user: UserId::new(),
            last_response: None,
        }
    }

    /// Sends a request through the router, optionally as the scenario user.
    ///
    /// # Errors
    ///
    /// Returns an error when the request cannot be built, a session cannot
    /// be issued or the body is not JSON.
    pub fn send(
        &self,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
        authenticated: bool,
    ) -> Result<Captured, eyre::Report> {
        let mut builder = Request::builder().method(method).uri(uri);
        if authenticated {
            let session = self.guard.issue(self.user)?;
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", session.token));
        }
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))?,
            None => builder.body(Body::empty())?,
        };

        let response = run_async(router(self.state.clone()).oneshot(request))?;
        let status = response.status();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let bytes = run_async(axum::body::to_bytes(response.into_body(), usize::MAX))?;
        let parsed = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };
        Ok(Captured {
            status,
            location,
            body: parsed,
        })
    }
}

impl Default for AggregateWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> AggregateWorld {
    AggregateWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

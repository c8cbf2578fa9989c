//! Router tests over in-memory storage and canned collaborators.


use crate::aggregation::services::AggregationEngine;
use crate::http::{AppState, router};
use crate::identity::{
    adapters::memory::InMemoryUserRepository,
    domain::UserId,
    ports::UserRepository,
    services::{AccountService, SessionGuard},
};
use crate::oauth::{
    domain::{ClientCredentials, ClientSecret, ExchangeError, ProviderDescriptor},
    ports::{ExchangedToken, TokenExchanger},
    services::OAuthExchangeFlow,
};
use crate::provider::{
    adapters::memory::InMemoryCredentialStore,
    domain::{AccessToken, ProviderKind, ProviderResult},
    ports::{CredentialStore, ProviderAdapter},
    services::ProviderRegistry,
};
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Priority, TaskSource, TaskView},
    ports::TaskRepository,
    services::TaskService,
};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response, header::AUTHORIZATION};
use mockable::DefaultClock;
use std::sync::Arc;
use tower::ServiceExt;

const SECRET: &str = "router-test-secret";
const CLIENT_URL: &str = "http://client.test";
const GOOD_CODE: &str = "good-code";

/// Tracker adapter returning a canned result.
struct CannedTracker {
    result: ProviderResult<Vec<TaskView>>,
}

#[async_trait]
impl ProviderAdapter for CannedTracker {
    fn provider(&self) -> ProviderKind {
        ProviderKind::Tracker
    }

    async fn fetch(
        &self,
        _token: &AccessToken,
        _identity_hint: Option<&str>,
    ) -> ProviderResult<Vec<TaskView>> {
        self.result.clone()
    }
}

/// Exchanger accepting only [`GOOD_CODE`].
struct CannedExchanger;

#[async_trait]
impl TokenExchanger for CannedExchanger {
    async fn exchange(
        &self,
        _descriptor: &ProviderDescriptor,
        code: &str,
    ) -> Result<ExchangedToken, ExchangeError> {
        if code != GOOD_CODE {
            return Err(ExchangeError::Rejected("bad_verification_code".to_owned()));
        }
        Ok(ExchangedToken {
            access_token: AccessToken::new("exchanged-token").expect("non-empty token"),
            account_hint: Some("octocat".to_owned()),
        })
    }
}

struct TestApp {
    state: AppState,
    guard: Arc<SessionGuard<DefaultClock>>,
    credentials: Arc<InMemoryCredentialStore>,
}

impl TestApp {
    fn with_tracker(result: ProviderResult<Vec<TaskView>>) -> Self {
        let clock = Arc::new(DefaultClock);
        let tasks: Arc<dyn TaskRepository> = Arc::new(InMemoryTaskRepository::new());
        let credentials = Arc::new(InMemoryCredentialStore::new());
        let store: Arc<dyn CredentialStore> = Arc::clone(&credentials) as Arc<dyn CredentialStore>;
        let guard = Arc::new(SessionGuard::new(SECRET, Arc::clone(&clock)).expect("valid guard"));

        let registry = ProviderRegistry::new().with_adapter(Arc::new(CannedTracker { result }));
        let engine = Arc::new(AggregationEngine::new(
            Arc::clone(&tasks),
            Arc::clone(&store),
            registry,
        ));
        let exchanger: Arc<dyn TokenExchanger> = Arc::new(CannedExchanger);
        let github = ProviderDescriptor::github(ClientCredentials::new(
            "gh-client",
            ClientSecret::new("gh-client-secret"),
            "http://api.test/auth/github/callback",
        ));
        let oauth = Arc::new(
            OAuthExchangeFlow::new([github], SECRET, store, exchanger, Arc::clone(&clock))
                .expect("valid flow"),
        );
        let users: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
        let accounts = Arc::new(AccountService::new(users, Arc::clone(&clock)));
        let task_service = Arc::new(TaskService::new(tasks, clock));

        let state = AppState::new(
            Arc::clone(&guard),
            accounts,
            task_service,
            engine,
            oauth,
            CLIENT_URL,
        );
        Self {
            state,
            guard,
            credentials,
        }
    }

    fn new() -> Self {
        Self::with_tracker(Ok(vec![
            TaskView::new(TaskSource::Tracker, "Fix login", Priority::High)
                .with_url("https://github.test/issues/1"),
        ]))
    }

    fn bearer(&self, user: UserId) -> String {
        let session = self.guard.issue(user).expect("issue session");
        format!("Bearer {}", session.token)
    }

    async fn send(&self, request: Request<Body>) -> Response<Body> {
        router(self.state.clone())
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    async fn call(&self, method: &str, uri: &str, user: Option<UserId>) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(id) = user {
            builder = builder.header(AUTHORIZATION, self.bearer(id));
        }
        self.send(builder.body(Body::empty()).expect("valid request"))
            .await
    }

    async fn call_json(
        &self,
        method: &str,
        uri: &str,
        user: UserId,
        body: serde_json::Value,
    ) -> Response<Body> {
        self.call_json_as(method, uri, Some(&self.bearer(user)), body)
            .await
    }

    async fn call_json_as(
        &self,
        method: &str,
        uri: &str,
        authorization: Option<&str>,
        body: serde_json::Value,
    ) -> Response<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, value);
        }
        self.send(builder.body(Body::from(body.to_string())).expect("valid request"))
            .await
    }
}

async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("JSON body")
}

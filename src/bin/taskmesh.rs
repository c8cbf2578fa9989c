//! Serves the taskmesh HTTP API.
//!
//! Configuration comes from flags or `TASKMESH_*` environment variables (see
//! [`taskmesh::config::Settings`]). Without `TASKMESH_DATABASE_URL` the
//! server keeps tasks and provider links in memory, which is only useful for
//! local development. Log verbosity follows `RUST_LOG`.

use mockable::DefaultClock;
use std::sync::Arc;
use taskmesh::aggregation::{
    adapters::AnthropicSummarizer,
    ports::Summarizer,
    services::{AggregationEngine, DigestService},
};
use clap::Parser;
use taskmesh::config::{AppConfig, Settings};
use taskmesh::http::{AppState, router};
use taskmesh::identity::{
    adapters::{memory::InMemoryUserRepository, postgres::PostgresUserRepository},
    ports::UserRepository,
    services::{AccountService, SessionGuard},
};
use taskmesh::oauth::{
    adapters::HttpTokenExchanger, ports::TokenExchanger, services::OAuthExchangeFlow,
};
use taskmesh::persistence::{PersistenceSetupError, apply_schema, build_pool};
use taskmesh::provider::{
    adapters::{
        github::GitHubAdapter, gmail::GmailAdapter, http::build_client,
        memory::InMemoryCredentialStore, postgres::PostgresCredentialStore, slack::SlackAdapter,
    },
    ports::CredentialStore,
    services::ProviderRegistry,
};
use taskmesh::task::{
    adapters::{memory::InMemoryTaskRepository, postgres::PostgresTaskRepository},
    ports::TaskRepository,
    services::TaskService,
};
use taskmesh::telemetry;
use tracing::{info, warn};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

struct Storage {
    users: Arc<dyn UserRepository>,
    tasks: Arc<dyn TaskRepository>,
    credentials: Arc<dyn CredentialStore>,
}

async fn open_storage(config: &AppConfig) -> Result<Storage, BoxError> {
    let Some(url) = config.database_url.clone() else {
        warn!("TASKMESH_DATABASE_URL is unset; using in-memory storage");
        return Ok(Storage {
            users: Arc::new(InMemoryUserRepository::new()),
            tasks: Arc::new(InMemoryTaskRepository::new()),
            credentials: Arc::new(InMemoryCredentialStore::new()),
        });
    };

    let pool_size = config.database_pool_size;
    let pool = tokio::task::spawn_blocking(move || {
        let pool = build_pool(url.expose(), pool_size)?;
        apply_schema(&pool)?;
        Ok::<_, PersistenceSetupError>(pool)
    })
    .await??;
    info!(pool_size, "connected to PostgreSQL");
    Ok(Storage {
        users: Arc::new(PostgresUserRepository::new(pool.clone())),
        tasks: Arc::new(PostgresTaskRepository::new(pool.clone())),
        credentials: Arc::new(PostgresCredentialStore::new(pool)),
    })
}

fn provider_registry(config: &AppConfig, client: &reqwest::Client) -> ProviderRegistry {
    let mut registry = ProviderRegistry::new()
        .with_adapter(Arc::new(GitHubAdapter::new(
            client.clone(),
            config.api_bases.github.as_str(),
        )))
        .with_adapter(Arc::new(GmailAdapter::new(
            client.clone(),
            config.api_bases.gmail.as_str(),
        )));
    if let Some(channel) = &config.slack_channel {
        registry = registry.with_adapter(Arc::new(SlackAdapter::new(
            client.clone(),
            config.api_bases.slack.as_str(),
            channel.as_str(),
        )));
    }
    registry
}

fn app_state(
    config: &AppConfig,
    storage: Storage,
    client: &reqwest::Client,
) -> Result<AppState, BoxError> {
    let clock = Arc::new(DefaultClock);
    let secret = config.session_secret.expose();
    let guard = Arc::new(SessionGuard::new(secret, Arc::clone(&clock))?);

    let engine = Arc::new(
        AggregationEngine::new(
            Arc::clone(&storage.tasks),
            Arc::clone(&storage.credentials),
            provider_registry(config, client),
        )
        .with_adapter_timeout(config.adapter_timeout),
    );
    let exchanger: Arc<dyn TokenExchanger> = Arc::new(HttpTokenExchanger::new(client.clone()));
    let oauth = Arc::new(OAuthExchangeFlow::new(
        config.providers.iter().cloned(),
        secret,
        storage.credentials,
        exchanger,
        Arc::clone(&clock),
    )?);
    let accounts = Arc::new(AccountService::new(storage.users, Arc::clone(&clock)));
    let tasks = Arc::new(TaskService::new(storage.tasks, clock));

    let state = AppState::new(
        guard,
        accounts,
        tasks,
        Arc::clone(&engine),
        oauth,
        &config.client_url,
    );
    let Some(settings) = &config.summarizer else {
        info!("TASKMESH_ANTHROPIC_API_KEY is unset; digests carry no summary");
        return Ok(state);
    };
    let summarizer: Arc<dyn Summarizer> = Arc::new(AnthropicSummarizer::new(
        client.clone(),
        config.api_bases.anthropic.as_str(),
        settings.api_key.clone(),
        settings.model.as_str(),
    ));
    Ok(state.with_digest(Arc::new(DigestService::new(engine, summarizer))))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for Ctrl-C; shutting down");
    }
    info!("shutdown requested");
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    telemetry::init();
    let config = Settings::parse().resolve()?;
    let storage = open_storage(&config).await?;
    let client = build_client(config.provider_timeout)?;
    let configured: Vec<&str> = config
        .providers
        .iter()
        .map(|descriptor| descriptor.provider().as_str())
        .collect();
    let state = app_state(&config, storage, &client)?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, providers = ?configured, "taskmesh listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("taskmesh stopped");
    Ok(())
}

//! Aggregate view with a language-model summary.

use crate::aggregation::{
    domain::{AggregateView, AggregationResult, Digest},
    ports::Summarizer,
    services::AggregationEngine,
};
use crate::identity::domain::UserId;
use crate::provider::ports::CredentialStore;
use crate::task::ports::TaskRepository;
use minijinja::{Environment, context};
use std::sync::Arc;
use tracing::warn;

/// Prompt template rendered from the aggregate view.
pub const DIGEST_TEMPLATE: &str = "\
Summarize the following outstanding tasks in three sentences or fewer. \
Point out what looks most urgent.
{% for task in tasks %}
- [{{ task.source }}/{{ task.priority }}] {{ task.title }}\
{% if task.completed %} (done){% endif %}\
{% endfor %}
{% if reconnect %}
These sources need to be reconnected: {{ reconnect | join(\", \") }}.
{% endif %}";

/// Produces digests; summarizer failures degrade to a digest without summary.
pub struct DigestService<T, S, M>
where
    T: TaskRepository + ?Sized,
    S: CredentialStore + ?Sized,
    M: Summarizer + ?Sized,
{
    engine: Arc<AggregationEngine<T, S>>,
    summarizer: Arc<M>,
}

impl<T, S, M> DigestService<T, S, M>
where
    T: TaskRepository + ?Sized,
    S: CredentialStore + ?Sized,
    M: Summarizer + ?Sized,
{
    /// Creates a digest service.
    #[must_use]
    pub const fn new(engine: Arc<AggregationEngine<T, S>>, summarizer: Arc<M>) -> Self {
        Self { engine, summarizer }
    }

    /// Aggregates `user`'s tasks and attaches a summary when one is available.
    ///
    /// An empty task list is not sent to the summarizer.
    ///
    /// # Errors
    ///
    /// Returns the aggregation error when the aggregate itself fails.
    pub async fn digest(&self, user: UserId) -> AggregationResult<Digest> {
        let view = self.engine.aggregate(user).await?;
        if view.tasks().is_empty() {
            return Ok(Digest {
                view,
                summary: None,
            });
        }

        let prompt = match render_prompt(&view) {
            Ok(prompt) => prompt,
            Err(err) => {
                warn!(user_id = %user, error = %err, "failed to render digest prompt");
                return Ok(Digest {
                    view,
                    summary: None,
                });
            }
        };
        let summary = self
            .summarizer
            .summarize(&prompt)
            .await
            .inspect_err(|err| warn!(user_id = %user, error = %err, "summarizer failed"))
            .ok();
        Ok(Digest { view, summary })
    }
}

fn render_prompt(view: &AggregateView) -> Result<String, minijinja::Error> {
    let environment = Environment::new();
    let reconnect: Vec<&str> = view
        .reconnect_required()
        .into_iter()
        .map(|provider| provider.as_str())
        .collect();
    environment.render_str(
        DIGEST_TEMPLATE,
        context! {
            tasks => view.tasks(),
            reconnect => reconnect,
        },
    )
}

//! Digests over in-memory storage with a stubbed summarizer.

use super::helpers::{Services, services};
use async_trait::async_trait;
use rstest::rstest;
use std::sync::{Arc, Mutex};
use taskmesh::aggregation::{
    domain::SummarizerError, ports::Summarizer, services::DigestService,
};
use taskmesh::identity::domain::UserId;
use taskmesh::task::services::CreateTaskRequest;

/// Summarizer that records prompts and replies with a fixed result.
struct RecordingSummarizer {
    reply: Result<String, SummarizerError>,
    prompts: Mutex<Vec<String>>,
}

impl RecordingSummarizer {
    fn new(reply: Result<String, SummarizerError>) -> Arc<Self> {
        Arc::new(Self {
            reply,
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompt lock").clone()
    }
}

#[async_trait]
impl Summarizer for RecordingSummarizer {
    async fn summarize(&self, prompt: &str) -> Result<String, SummarizerError> {
        self.prompts.lock().expect("prompt lock").push(prompt.to_owned());
        self.reply.clone()
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn digest_summarizes_rendered_tasks(services: Services) {
    let user = UserId::new();
    services
        .tasks
        .create(user, CreateTaskRequest::new("Renew insurance"))
        .await
        .expect("create task");
    let summarizer = RecordingSummarizer::new(Ok("Renew the insurance first.".to_owned()));
    let digests = DigestService::new(Arc::clone(&services.engine), Arc::clone(&summarizer));

    let digest = digests.digest(user).await.expect("digest");

    assert_eq!(digest.summary.as_deref(), Some("Renew the insurance first."));
    let prompts = summarizer.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts.iter().all(|prompt| prompt.contains("- [local/medium] Renew insurance")));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn summarizer_failure_keeps_the_view(services: Services) {
    let user = UserId::new();
    services
        .tasks
        .create(user, CreateTaskRequest::new("File taxes"))
        .await
        .expect("create task");
    let summarizer = RecordingSummarizer::new(Err(SummarizerError::Unavailable(
        "timed out".to_owned(),
    )));
    let digests = DigestService::new(Arc::clone(&services.engine), summarizer);

    let digest = digests.digest(user).await.expect("digest");

    assert!(digest.summary.is_none());
    assert_eq!(digest.view.tasks().len(), 1);
}

//! Mock remote clients
//!
//! Used by tests and by the `--offline` CLI mode. They never touch the
//! network; every call is recorded so callers can assert on what was sent.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::RemoteCallError;
use crate::remote::model::{art_prompt, ArtClient, InterpretationClient};
use crate::state::RequestKind;

/// A call observed by a [`MockClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub kind: RequestKind,
    pub text: String,
}

/// Canned outcome for one call.
#[derive(Debug, Clone)]
pub enum MockReply {
    Ok(String),
    Fail(String),
}

impl MockReply {
    fn into_result(self) -> Result<String, RemoteCallError> {
        match self {
            MockReply::Ok(value) => Ok(value),
            MockReply::Fail(message) => Err(RemoteCallError::Network { message }),
        }
    }
}

#[derive(Debug, Default)]
struct MockInner {
    calls: Vec<RecordedCall>,
    interpretations: VecDeque<MockReply>,
    images: VecDeque<MockReply>,
}

/// Scripted client implementing both remote contracts.
///
/// Queued replies are consumed in order; once a queue is empty the client
/// falls back to a deterministic reply derived from the input text.
#[derive(Debug, Default)]
pub struct MockClient {
    inner: Mutex<MockInner>,
    delay: Option<Duration>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every reply, to let tests overlap calls.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn queue_interpretation(&self, reply: MockReply) -> &Self {
        self.lock().interpretations.push_back(reply);
        self
    }

    pub fn queue_image(&self, reply: MockReply) -> &Self {
        self.lock().images.push_back(reply);
        self
    }

    /// All calls received so far, in arrival order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self, kind: RequestKind) -> usize {
        self.lock().calls.iter().filter(|c| c.kind == kind).count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    async fn respond(&self, kind: RequestKind, text: &str) -> Result<String, RemoteCallError> {
        let reply = {
            let mut inner = self.lock();
            inner.calls.push(RecordedCall {
                kind,
                text: text.to_string(),
            });
            match kind {
                RequestKind::Interpretation => inner.interpretations.pop_front(),
                RequestKind::Art => inner.images.pop_front(),
            }
        };

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        reply
            .unwrap_or_else(|| MockReply::Ok(default_reply(kind, text)))
            .into_result()
    }
}

fn default_reply(kind: RequestKind, text: &str) -> String {
    match kind {
        RequestKind::Interpretation => format!(
            "(offline) This {}-word dream suggests themes worth reflecting on.",
            crate::state::word_count(text)
        ),
        RequestKind::Art => format!("mock://dream-art/{}", art_prompt(text).len()),
    }
}

#[async_trait]
impl InterpretationClient for MockClient {
    async fn interpret(&self, text: &str) -> Result<String, RemoteCallError> {
        self.respond(RequestKind::Interpretation, text).await
    }
}

#[async_trait]
impl ArtClient for MockClient {
    async fn generate_art(&self, text: &str) -> Result<String, RemoteCallError> {
        self.respond(RequestKind::Art, text).await
    }
}

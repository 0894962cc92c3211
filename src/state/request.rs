//! Request State Machine
//!
//! Tracks the lifecycle of one kind of remote call:
//! `Idle -> Pending -> {Ready, Failed}`, re-entering `Pending` on every new
//! start. Several calls of the same kind may be in flight at once; which
//! settlements are applied is decided by the [`SettlePolicy`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DreamError;

/// The two remote flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    Interpretation,
    Art,
}

impl RequestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Interpretation => "interpretation",
            Self::Art => "art",
        }
    }

    /// Display value while a call of this kind is pending.
    pub fn pending_placeholder(&self) -> &'static str {
        match self {
            Self::Interpretation => "Analyzing dream...",
            Self::Art => "Generating dream art...",
        }
    }

    /// Banner text shown when a call of this kind fails.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Self::Interpretation => {
                "Error analyzing dream. Please check your API key and try again."
            }
            Self::Art => "Error generating dream art. Please check your API key and try again.",
        }
    }

    /// Label of the action that starts this kind of call.
    pub fn action_label(&self, busy: bool) -> &'static str {
        match (self, busy) {
            (Self::Interpretation, false) => "Analyze Dream",
            (Self::Interpretation, true) => "Analyzing...",
            (Self::Art, false) => "Generate Dream Art",
            (Self::Art, true) => "Generating...",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of the most recently applied call of one kind.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestStatus {
    #[default]
    Idle,
    Pending,
    Ready(String),
    Failed(String),
}

impl RequestStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestStatus::Pending)
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, RequestStatus::Idle)
    }

    /// The payload of a successful call.
    pub fn ready_value(&self) -> Option<&str> {
        match self {
            RequestStatus::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// Which settlements of one kind are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SettlePolicy {
    /// Every settlement is applied, so the slowest call wins.
    #[default]
    LastSettled,
    /// Only the most recently issued call is applied; older ones are dropped.
    LatestIssued,
}

impl SettlePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LastSettled => "last-settled",
            Self::LatestIssued => "latest-issued",
        }
    }
}

impl fmt::Display for SettlePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettlePolicy {
    type Err = DreamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "last-settled" => Ok(Self::LastSettled),
            "latest-issued" => Ok(Self::LatestIssued),
            other => Err(DreamError::Config {
                reason: format!(
                    "unknown settle policy '{}', expected last-settled or latest-issued",
                    other
                ),
            }),
        }
    }
}

/// One issued remote call awaiting settlement.
///
/// Tickets are not `Clone`: settling one consumes it, so each issued call
/// decrements the in-flight count exactly once.
///
/// ```compile_fail
/// use dreamweaver::state::{RequestKind, RequestTracker};
///
/// let mut tracker = RequestTracker::new(RequestKind::Art);
/// let ticket = tracker.start("a dream");
/// let copy = ticket.clone();
/// ```
#[derive(Debug, PartialEq, Eq)]
pub struct Ticket {
    kind: RequestKind,
    generation: u64,
    text: String,
}

impl Ticket {
    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The draft text sent with this call.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// State machine for one kind of remote call.
#[derive(Debug, Clone)]
pub struct RequestTracker {
    kind: RequestKind,
    status: RequestStatus,
    issued: u64,
    in_flight: usize,
}

impl RequestTracker {
    pub fn new(kind: RequestKind) -> Self {
        Self {
            kind,
            status: RequestStatus::Idle,
            issued: 0,
            in_flight: 0,
        }
    }

    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    pub fn status(&self) -> &RequestStatus {
        &self.status
    }

    /// Generation of the most recently issued call (0 before the first).
    pub fn latest_generation(&self) -> u64 {
        self.issued
    }

    /// Number of issued calls that have not settled yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// What should be shown for this kind right now, if anything.
    pub fn display_value(&self) -> Option<&str> {
        match &self.status {
            RequestStatus::Idle => None,
            RequestStatus::Pending => Some(self.kind.pending_placeholder()),
            RequestStatus::Ready(value) | RequestStatus::Failed(value) => Some(value),
        }
    }

    /// Issue a new call carrying `text`. Allowed from any state.
    pub fn start(&mut self, text: &str) -> Ticket {
        self.issued += 1;
        self.in_flight += 1;
        self.status = RequestStatus::Pending;

        Ticket {
            kind: self.kind,
            generation: self.issued,
            text: text.to_string(),
        }
    }

    /// Fail immediately without issuing a call.
    ///
    /// Counts as an issue, so calls still in flight become stale under
    /// [`SettlePolicy::LatestIssued`].
    pub fn reject(&mut self, message: impl Into<String>) {
        self.issued += 1;
        self.status = RequestStatus::Failed(message.into());
    }

    /// Whether a settlement for `ticket` would be applied under `policy`.
    pub fn accepts(&self, ticket: &Ticket, policy: SettlePolicy) -> bool {
        ticket.kind == self.kind
            && match policy {
                SettlePolicy::LastSettled => true,
                SettlePolicy::LatestIssued => ticket.generation == self.issued,
            }
    }

    /// Record the outcome of `ticket`, consuming it. Returns whether the
    /// status changed.
    ///
    /// On failure the status carries this kind's fixed failure message.
    pub fn settle<E>(
        &mut self,
        ticket: Ticket,
        outcome: &Result<String, E>,
        policy: SettlePolicy,
    ) -> bool {
        if ticket.kind != self.kind {
            return false;
        }
        self.in_flight = self.in_flight.saturating_sub(1);

        if !self.accepts(&ticket, policy) {
            return false;
        }

        self.status = match outcome {
            Ok(payload) => RequestStatus::Ready(payload.clone()),
            Err(_) => RequestStatus::Failed(self.kind.failure_message().to_string()),
        };
        true
    }
}

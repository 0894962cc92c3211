//! Session Controller
//!
//! Owns every piece of state for one journaling session and is the only
//! place transitions happen. Remote calls are split into `start_*` (issue a
//! [`Ticket`]) and [`DreamSession::settle`] (apply its outcome) so a caller
//! can keep several calls in flight; `analyze` and `generate_art` do both
//! for the common one-at-a-time case.

use uuid::Uuid;

use crate::config::DreamConfig;
use crate::error::{DreamError, RemoteCallError, Result};
use crate::remote::Services;
use crate::state::{
    ActivePanel, Draft, DraftTracker, FileStore, KeyValueStore, RequestKind, RequestStatus,
    RequestTracker, SettlePolicy, Ticket, ViewSelector,
};
use crate::view::PanelView;

pub struct DreamSession {
    id: String,
    draft: DraftTracker,
    view: ViewSelector,
    interpretation: RequestTracker,
    art: RequestTracker,
    error_banner: Option<String>,
    policy: SettlePolicy,
    services: Services,
}

impl DreamSession {
    /// Start a session, restoring the draft from `store`.
    pub fn open(store: Box<dyn KeyValueStore>, services: Services, policy: SettlePolicy) -> Self {
        let id = Uuid::new_v4().to_string();
        let draft = DraftTracker::load_initial(store);

        tracing::info!(
            session = %id,
            words = draft.draft().word_count(),
            policy = %policy,
            "Session opened"
        );

        Self {
            id,
            draft,
            view: ViewSelector::new(),
            interpretation: RequestTracker::new(RequestKind::Interpretation),
            art: RequestTracker::new(RequestKind::Art),
            error_banner: None,
            policy,
            services,
        }
    }

    /// Start a session using the file store named in `config`.
    pub fn from_config(config: &DreamConfig, services: Services) -> Result<Self> {
        let store = FileStore::open(&config.store_path)?;
        Ok(Self::open(Box::new(store), services, config.settle_policy))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn draft(&self) -> &Draft {
        self.draft.draft()
    }

    /// Replace the draft text; persisted immediately.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.draft.set_text(text);
    }

    pub fn active_panel(&self) -> ActivePanel {
        self.view.active()
    }

    pub fn select(&mut self, panel: ActivePanel) {
        self.view.select(panel);
    }

    pub fn interpretation(&self) -> &RequestTracker {
        &self.interpretation
    }

    pub fn art(&self) -> &RequestTracker {
        &self.art
    }

    pub fn tracker(&self, kind: RequestKind) -> &RequestTracker {
        match kind {
            RequestKind::Interpretation => &self.interpretation,
            RequestKind::Art => &self.art,
        }
    }

    fn tracker_mut(&mut self, kind: RequestKind) -> &mut RequestTracker {
        match kind {
            RequestKind::Interpretation => &mut self.interpretation,
            RequestKind::Art => &mut self.art,
        }
    }

    pub fn error_banner(&self) -> Option<&str> {
        self.error_banner.as_deref()
    }

    /// True while either kind shows its pending placeholder.
    pub fn is_busy(&self) -> bool {
        self.interpretation.status().is_pending() || self.art.status().is_pending()
    }

    pub fn settle_policy(&self) -> SettlePolicy {
        self.policy
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    /// Issue an interpretation call for the current draft.
    pub fn start_interpretation(&mut self) -> Ticket {
        self.error_banner = None;
        let text = self.draft.draft().text().to_string();
        let ticket = self.interpretation.start(&text);

        tracing::info!(
            session = %self.id,
            kind = %ticket.kind(),
            generation = ticket.generation(),
            "Request started"
        );
        ticket
    }

    /// Issue an art call for the current draft.
    ///
    /// An empty draft fails immediately with the missing-input message and
    /// returns `None`; nothing is sent and the banner stays clear.
    pub fn start_art(&mut self) -> Option<Ticket> {
        self.error_banner = None;

        if self.draft.draft().is_empty() {
            self.art.reject(DreamError::MissingInput.to_string());
            tracing::info!(
                session = %self.id,
                kind = %RequestKind::Art,
                "Missing input, no request sent"
            );
            return None;
        }

        let text = self.draft.draft().text().to_string();
        let ticket = self.art.start(&text);

        tracing::info!(
            session = %self.id,
            kind = %ticket.kind(),
            generation = ticket.generation(),
            "Request started"
        );
        Some(ticket)
    }

    /// Apply the outcome of `ticket`. Returns whether it was applied.
    pub fn settle(
        &mut self,
        ticket: Ticket,
        outcome: std::result::Result<String, RemoteCallError>,
    ) -> bool {
        let kind = ticket.kind();
        let generation = ticket.generation();
        let policy = self.policy;
        let applied = self.tracker_mut(kind).settle(ticket, &outcome, policy);

        if !applied {
            tracing::warn!(
                session = %self.id,
                kind = %kind,
                generation,
                latest = self.tracker(kind).latest_generation(),
                "Discarding stale response"
            );
            return false;
        }

        match &outcome {
            Ok(_) => {
                tracing::info!(
                    session = %self.id,
                    kind = %kind,
                    generation,
                    "Request succeeded"
                );
            }
            Err(e) => {
                tracing::error!(
                    session = %self.id,
                    kind = %kind,
                    generation,
                    error = %e,
                    "Request failed"
                );
                self.error_banner = Some(kind.failure_message().to_string());
            }
        }
        true
    }

    /// Interpret the current draft and wait for the result.
    pub async fn analyze(&mut self) -> &RequestStatus {
        let ticket = self.start_interpretation();
        let client = self.services.interpreter.clone();
        let outcome = client.interpret(ticket.text()).await;
        self.settle(ticket, outcome);
        self.interpretation.status()
    }

    /// Generate art for the current draft and wait for the result.
    pub async fn generate_art(&mut self) -> &RequestStatus {
        if let Some(ticket) = self.start_art() {
            let client = self.services.artist.clone();
            let outcome = client.generate_art(ticket.text()).await;
            self.settle(ticket, outcome);
        }
        self.art.status()
    }

    /// Render model for the active panel.
    pub fn view(&self) -> PanelView {
        PanelView::compose(self)
    }
}

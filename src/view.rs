//! Panel View
//!
//! Pure render model: combines the active panel with the independent
//! request statuses and the error banner. Nothing here mutates state.

use std::fmt;

use crate::session::DreamSession;
use crate::state::{ActivePanel, RequestKind, RequestStatus};

/// Hint shown in the art area before any art has been requested.
pub const ART_AREA_HINT: &str = "Generated dream art will appear here";

/// Controls that exist on screen but do nothing yet.
pub const VOICE_RECORD_LABEL: &str = "Voice Record";
pub const LUCID_CUE_LABEL: &str = "Play Lucid Cue";

/// Contents of the art area on the Tools panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtArea {
    Hint,
    Message(String),
    Image(String),
}

/// What the active panel shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelView {
    Record {
        text: String,
        word_count: usize,
        analyze_label: &'static str,
        error_banner: Option<String>,
    },
    /// `interpretation` is `None` until the first analysis starts.
    Analysis { interpretation: Option<String> },
    Tools {
        art_label: &'static str,
        art: ArtArea,
    },
}

impl PanelView {
    pub fn compose(session: &DreamSession) -> Self {
        match session.active_panel() {
            ActivePanel::Record => {
                let draft = session.draft();
                PanelView::Record {
                    text: draft.text().to_string(),
                    word_count: draft.word_count(),
                    analyze_label: RequestKind::Interpretation
                        .action_label(session.interpretation().status().is_pending()),
                    error_banner: session.error_banner().map(str::to_string),
                }
            }
            ActivePanel::Analysis => PanelView::Analysis {
                interpretation: session.interpretation().display_value().map(str::to_string),
            },
            ActivePanel::Tools => {
                let tracker = session.art();
                let art = match tracker.status() {
                    RequestStatus::Idle => ArtArea::Hint,
                    RequestStatus::Ready(url) => ArtArea::Image(url.clone()),
                    RequestStatus::Pending | RequestStatus::Failed(_) => {
                        ArtArea::Message(tracker.display_value().unwrap_or_default().to_string())
                    }
                };
                PanelView::Tools {
                    art_label: RequestKind::Art.action_label(tracker.status().is_pending()),
                    art,
                }
            }
        }
    }

    pub fn panel(&self) -> ActivePanel {
        match self {
            PanelView::Record { .. } => ActivePanel::Record,
            PanelView::Analysis { .. } => ActivePanel::Analysis,
            PanelView::Tools { .. } => ActivePanel::Tools,
        }
    }
}

impl fmt::Display for PanelView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelView::Record {
                text,
                word_count,
                analyze_label,
                error_banner,
            } => {
                writeln!(f, "== Record Your Dream ==")?;
                if text.is_empty() {
                    writeln!(f, "(Describe your dream here...)")?;
                } else {
                    writeln!(f, "{}", text)?;
                }
                writeln!(f, "Word count: {}", word_count)?;
                writeln!(f, "[{}] [{}]", VOICE_RECORD_LABEL, analyze_label)?;
                if let Some(message) = error_banner {
                    writeln!(f, "! {}", message)?;
                }
            }
            PanelView::Analysis { interpretation } => {
                if let Some(text) = interpretation {
                    writeln!(f, "== AI Dream Interpretation ==")?;
                    writeln!(f, "{}", text)?;
                }
            }
            PanelView::Tools { art_label, art } => {
                writeln!(f, "== Dream Tools ==")?;
                writeln!(f, "[{}] [{}]", LUCID_CUE_LABEL, art_label)?;
                match art {
                    ArtArea::Hint => writeln!(f, "{}", ART_AREA_HINT)?,
                    ArtArea::Message(message) => writeln!(f, "{}", message)?,
                    ArtArea::Image(url) => writeln!(f, "Image: {}", url)?,
                }
            }
        }

        let tabs: Vec<String> = ActivePanel::ALL
            .iter()
            .map(|panel| {
                if *panel == self.panel() {
                    format!("*{}*", panel.title())
                } else {
                    panel.title().to_string()
                }
            })
            .collect();
        write!(f, "{}", tabs.join(" | "))
    }
}

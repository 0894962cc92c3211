//! View Selector

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DreamError;

/// The single visible panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivePanel {
    #[default]
    Record,
    Analysis,
    Tools,
}

impl ActivePanel {
    pub const ALL: [ActivePanel; 3] = [Self::Record, Self::Analysis, Self::Tools];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Record => "record",
            Self::Analysis => "analysis",
            Self::Tools => "tools",
        }
    }

    /// Tab caption.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Record => "Record",
            Self::Analysis => "Analysis",
            Self::Tools => "Tools",
        }
    }
}

impl fmt::Display for ActivePanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivePanel {
    type Err = DreamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "record" => Ok(Self::Record),
            "analysis" => Ok(Self::Analysis),
            "tools" => Ok(Self::Tools),
            other => Err(DreamError::Config {
                reason: format!("unknown panel '{}'", other),
            }),
        }
    }
}

/// Tracks which panel is visible.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewSelector {
    active: ActivePanel,
}

impl ViewSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> ActivePanel {
        self.active
    }

    pub fn select(&mut self, panel: ActivePanel) {
        self.active = panel;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_record() {
        assert_eq!(ViewSelector::new().active(), ActivePanel::Record);
    }

    #[test]
    fn test_select_each_panel() {
        let mut selector = ViewSelector::new();
        for panel in ActivePanel::ALL {
            selector.select(panel);
            assert_eq!(selector.active(), panel);
        }
    }

    #[test]
    fn test_parse_round_trips_names() {
        for panel in ActivePanel::ALL {
            assert_eq!(panel.as_str().parse::<ActivePanel>().unwrap(), panel);
        }
        assert_eq!(" Tools ".parse::<ActivePanel>().unwrap(), ActivePanel::Tools);
        assert!("settings".parse::<ActivePanel>().is_err());
    }
}

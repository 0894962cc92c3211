//! Runtime configuration
//!
//! Values come from environment variables; the CLI may override any of
//! them. A missing API key is not an error here: it surfaces on each remote
//! call instead.

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::state::SettlePolicy;

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4";
pub const DEFAULT_IMAGE_MODEL: &str = "dall-e-2";
pub const DEFAULT_STORE_PATH: &str = ".dreamweaver/store.json";

/// Configuration for one DreamWeaver session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DreamConfig {
    /// Bearer credential for the AI services.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Base URL the service paths are appended to.
    pub api_base: String,

    /// Model used for dream interpretation.
    pub chat_model: String,

    /// Model used for dream art.
    pub image_model: String,

    /// JSON file holding the persisted draft.
    pub store_path: PathBuf,

    #[serde(default)]
    pub settle_policy: SettlePolicy,
}

impl Default for DreamConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            settle_policy: SettlePolicy::default(),
        }
    }
}

impl DreamConfig {
    /// Build configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let settle_policy = match non_empty("DREAMWEAVER_SETTLE_POLICY") {
            Some(value) => value.parse()?,
            None => defaults.settle_policy,
        };

        Ok(Self {
            api_key: non_empty("DREAMWEAVER_API_KEY").or_else(|| non_empty("OPENAI_API_KEY")),
            api_base: non_empty("DREAMWEAVER_API_BASE")
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base),
            chat_model: non_empty("DREAMWEAVER_CHAT_MODEL").unwrap_or(defaults.chat_model),
            image_model: non_empty("DREAMWEAVER_IMAGE_MODEL").unwrap_or(defaults.image_model),
            store_path: non_empty("DREAMWEAVER_STORE")
                .map(PathBuf::from)
                .unwrap_or(defaults.store_path),
            settle_policy,
        })
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

//! CLI Module
//!
//! Terminal front end for DreamWeaver.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DreamConfig;
use crate::error::Result;
use crate::state::SettlePolicy;

/// DreamWeaver - record dreams and explore them with AI
#[derive(Parser, Debug)]
#[command(name = "dreamweaver")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Store file holding the saved draft
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Base URL of the AI service
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    /// Which responses win when requests overlap (last-settled, latest-issued)
    #[arg(long, global = true)]
    pub settle_policy: Option<SettlePolicy>,

    /// Use built-in mock clients instead of the network
    #[arg(long, global = true)]
    pub offline: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the saved draft and its word count
    #[command(name = "show")]
    Show,

    /// Replace the saved draft
    #[command(name = "write")]
    Write {
        /// Dream description
        text: String,
    },

    /// Interpret the saved draft
    #[command(name = "analyze")]
    Analyze,

    /// Generate dream art for the saved draft
    #[command(name = "art")]
    Art,
}

impl Cli {
    /// Environment configuration with command-line overrides applied.
    pub fn config(&self) -> Result<DreamConfig> {
        let mut config = DreamConfig::from_env()?;
        if let Some(store) = &self.store {
            config.store_path = store.clone();
        }
        if let Some(base) = &self.api_base {
            config.api_base = base.trim_end_matches('/').to_string();
        }
        if let Some(policy) = self.settle_policy {
            config.settle_policy = policy;
        }
        Ok(config)
    }
}

//! DreamWeaver - Dream Journaling Core
//!
//! Captures dream descriptions, keeps them saved locally, and enriches them
//! through two remote AI services: a text interpretation and a piece of
//! generated dream art.
//!
//! # Architecture
//!
//! - `state`: draft persistence, request state machines, panel selection
//! - `remote`: client contracts plus HTTP and mock implementations
//! - `session`: the controller owning one session's state
//! - `view`: render model for the active panel

pub mod cli;
pub mod config;
pub mod error;
pub mod remote;
pub mod session;
pub mod state;
pub mod view;

pub use config::DreamConfig;
pub use error::{DreamError, RemoteCallError, Result};
pub use session::DreamSession;

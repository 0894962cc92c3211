//! Session State
//!
//! Draft persistence, per-kind request state machines and panel selection.

pub mod draft;
pub mod panel;
pub mod request;
pub mod store;

pub use draft::{word_count, Draft, DraftTracker};
pub use panel::{ActivePanel, ViewSelector};
pub use request::{RequestKind, RequestStatus, RequestTracker, SettlePolicy, Ticket};
pub use store::{FileStore, KeyValueStore, MemoryStore, DRAFT_KEY};

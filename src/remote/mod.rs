//! Remote AI clients
//!
//! This module provides:
//! - `InterpretationClient` and `ArtClient` contracts
//! - `OpenAiClient`, the HTTP implementation of both
//! - `MockClient` for tests and offline runs

mod mock;
mod model;
mod openai;

pub use mock::{MockClient, MockReply, RecordedCall};
pub use model::{
    art_prompt, ArtClient, InterpretationClient, Services, ART_IMAGE_SIZE,
    INTERPRETATION_INSTRUCTION,
};
pub use openai::OpenAiClient;

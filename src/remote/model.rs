//! Remote client contracts
//!
//! The session only talks to the AI services through these traits, so
//! tests and offline runs can substitute their own implementations.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::RemoteCallError;

/// Instruction sent ahead of every dream to the text-completion service.
pub const INTERPRETATION_INSTRUCTION: &str = "Analyze the dream text and provide a deep psychological interpretation including emotions, themes, and possible subconscious meanings.";

/// Image size requested for dream art.
pub const ART_IMAGE_SIZE: &str = "512x512";

/// Prompt sent to the image-generation service for `text`.
pub fn art_prompt(text: &str) -> String {
    format!("A surreal art representation of this dream: {}", text)
}

/// Produces a psychological interpretation of dream text.
#[async_trait]
pub trait InterpretationClient: Send + Sync {
    /// Interpret `text`. Empty text is forwarded as-is.
    async fn interpret(&self, text: &str) -> Result<String, RemoteCallError>;
}

/// Produces an image URL depicting dream text.
#[async_trait]
pub trait ArtClient: Send + Sync {
    async fn generate_art(&self, text: &str) -> Result<String, RemoteCallError>;
}

/// The remote capabilities handed to a session at startup.
#[derive(Clone)]
pub struct Services {
    pub interpreter: Arc<dyn InterpretationClient>,
    pub artist: Arc<dyn ArtClient>,
}

impl Services {
    pub fn new(interpreter: Arc<dyn InterpretationClient>, artist: Arc<dyn ArtClient>) -> Self {
        Self {
            interpreter,
            artist,
        }
    }

    /// Use one client for both flows.
    pub fn from_client<C>(client: C) -> Self
    where
        C: InterpretationClient + ArtClient + 'static,
    {
        let client = Arc::new(client);
        Self {
            interpreter: client.clone(),
            artist: client,
        }
    }
}

use async_trait::async_trait;

use crate::domain::{AudioClip, DomainError, Voice};

/// Port for text-to-speech synthesis.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` with the given voice identifier.
    ///
    /// Returns the audio entirely in memory; nothing is written to disk.
    async fn synthesize(&self, text: &str, voice: &str) -> Result<AudioClip, DomainError>;

    /// List the voices the service offers.
    async fn list_voices(&self) -> Result<Vec<Voice>, DomainError>;
}

use async_trait::async_trait;

use crate::domain::{AudioClip, DomainError, Recognition};

/// Port for one-shot speech recognition.
///
/// A single request carries the whole clip; there is no streaming and no
/// interim results. Implementations live in `adapters` (Azure REST) and in
/// test mocks.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Recognize speech in `audio`, spoken in `language` (BCP-47 code).
    async fn recognize(
        &self,
        audio: &AudioClip,
        language: &str,
    ) -> Result<Recognition, DomainError>;
}

use async_trait::async_trait;

use crate::domain::DomainError;

/// Port for machine translation.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` into the target language (ISO code, e.g. "fr").
    ///
    /// The source language is detected by the service. Any non-success
    /// status or unexpected response shape is a typed
    /// [`DomainError::Translation`], never a panic.
    async fn translate(&self, text: &str, to_language: &str) -> Result<String, DomainError>;
}

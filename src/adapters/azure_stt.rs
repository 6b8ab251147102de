use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::adapters::http::{resolve_base_url, shared_client};
use crate::domain::{AudioClip, DomainError, Recognition, SpeechCredentials};
use crate::ports::SpeechRecognizer;

/// Subscription key header used by all Azure Cognitive Services.
pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// One-shot recognizer over the Azure Speech REST API.
pub struct AzureRecognizer {
    client: Client,
    credentials: SpeechCredentials,
    base_url: String,
}

/// Wire format of a short-audio recognition response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RecognitionResponse {
    recognition_status: String,
    #[serde(default)]
    display_text: String,
}

impl AzureRecognizer {
    /// Create a recognizer for the credential region, or an override URL
    /// when one is configured.
    pub fn new(
        credentials: SpeechCredentials,
        override_url: Option<&str>,
    ) -> Result<Self, DomainError> {
        let default_url = format!(
            "https://{}.stt.speech.microsoft.com/speech/recognition/conversation/cognitiveservices/v1",
            credentials.region()
        );
        let base_url = resolve_base_url(override_url, default_url)?;

        Ok(Self {
            client: shared_client()?,
            credentials,
            base_url,
        })
    }

    /// Map the service's `RecognitionStatus` to a domain outcome.
    ///
    /// `NoMatch` and the silence/babble timeouts all mean "nothing usable
    /// was heard"; unknown statuses are errors rather than silent NoMatch.
    fn map_status(status: &str, text: String) -> Result<Recognition, DomainError> {
        match status {
            "Success" if !text.is_empty() => Ok(Recognition::Recognized { text }),
            "Success" => Ok(Recognition::NoMatch),
            "NoMatch" | "InitialSilenceTimeout" | "BabbleTimeout" => Ok(Recognition::NoMatch),
            other => Err(DomainError::Recognition(format!(
                "Unexpected recognition status: {}",
                other
            ))),
        }
    }
}

#[async_trait]
impl SpeechRecognizer for AzureRecognizer {
    async fn recognize(
        &self,
        audio: &AudioClip,
        language: &str,
    ) -> Result<Recognition, DomainError> {
        debug!(
            bytes = audio.len(),
            language = language,
            "Sending recognition request"
        );

        let response = self
            .client
            .post(&self.base_url)
            .query(&[("language", language), ("format", "simple")])
            .header(SUBSCRIPTION_KEY_HEADER, self.credentials.key())
            .header(reqwest::header::CONTENT_TYPE, "audio/wav")
            .header(reqwest::header::ACCEPT, "application/json")
            .body(audio.bytes.clone())
            .send()
            .await
            .map_err(|e| DomainError::Recognition(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::Recognition(format!(
                "HTTP {} from recognition endpoint",
                status
            )));
        }

        let parsed: RecognitionResponse = response
            .json()
            .await
            .map_err(|e| DomainError::Recognition(format!("Malformed response: {}", e)))?;

        let outcome = Self::map_status(&parsed.recognition_status, parsed.display_text)?;
        info!(recognized = outcome.is_recognized(), "Recognition complete");
        Ok(outcome)
    }
}

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::adapters::azure_stt::SUBSCRIPTION_KEY_HEADER;
use crate::adapters::http::{resolve_base_url, shared_client};
use crate::domain::{DomainError, SpeechCredentials};
use crate::ports::Translator;

/// Region header required by the Translator API when authenticating with a
/// Speech resource key.
pub const SUBSCRIPTION_REGION_HEADER: &str = "Ocp-Apim-Subscription-Region";

const DEFAULT_TRANSLATE_URL: &str = "https://api.cognitive.microsofttranslator.com/translate";
const API_VERSION: &str = "3.0";

/// Translator over the Azure Text Translation v3 REST API.
pub struct AzureTranslator {
    client: Client,
    credentials: SpeechCredentials,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    text: &'a str,
}

/// Wire format of one element of the translation response array.
///
/// Every field is defaulted: a response of the wrong shape parses into
/// empty vectors and is rejected with a typed error instead of panicking
/// on a missing index.
#[derive(Debug, Default, Deserialize)]
struct TranslationItem {
    #[serde(default)]
    translations: Vec<TranslatedText>,
}

#[derive(Debug, Default, Deserialize)]
struct TranslatedText {
    #[serde(default)]
    text: String,
}

impl AzureTranslator {
    pub fn new(
        credentials: SpeechCredentials,
        override_url: Option<&str>,
    ) -> Result<Self, DomainError> {
        let base_url = resolve_base_url(override_url, DEFAULT_TRANSLATE_URL.to_string())?;

        Ok(Self {
            client: shared_client()?,
            credentials,
            base_url,
        })
    }

    /// Extract the first translation from a response body.
    fn parse_response(body: &str) -> Result<String, DomainError> {
        let items: Vec<TranslationItem> = serde_json::from_str(body)
            .map_err(|e| DomainError::Translation(format!("Malformed response: {}", e)))?;

        let text = items
            .first()
            .and_then(|item| item.translations.first())
            .map(|t| t.text.clone())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(DomainError::Translation(
                "Response contained no translations".to_string(),
            ));
        }

        Ok(text)
    }
}

#[async_trait]
impl Translator for AzureTranslator {
    async fn translate(&self, text: &str, to_language: &str) -> Result<String, DomainError> {
        debug!(to = to_language, chars = text.len(), "Sending translation request");

        let body = vec![TranslateRequest { text }];

        let response = self
            .client
            .post(&self.base_url)
            .query(&[("api-version", API_VERSION), ("to", to_language)])
            .header(SUBSCRIPTION_KEY_HEADER, self.credentials.key())
            .header(SUBSCRIPTION_REGION_HEADER, self.credentials.region())
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::Translation(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::Translation(format!(
                "HTTP {} from translation endpoint",
                status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DomainError::Translation(e.to_string()))?;

        let translated = Self::parse_response(&body)?;
        info!(to = to_language, chars = translated.len(), "Translation complete");
        Ok(translated)
    }
}

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};
use url::Url;

use crate::adapters::azure_stt::SUBSCRIPTION_KEY_HEADER;
use crate::adapters::http::{resolve_base_url, shared_client};
use crate::domain::{AudioClip, DomainError, SpeechCredentials, Voice};
use crate::ports::SpeechSynthesizer;

/// Output format requested from the synthesis endpoint. RIFF keeps the
/// response a self-contained WAV the webview can play directly.
const OUTPUT_FORMAT: &str = "riff-24khz-16bit-mono-pcm";

/// Synthesizer over the Azure Speech REST API.
pub struct AzureSynthesizer {
    client: Client,
    credentials: SpeechCredentials,
    base_url: String,
}

/// Wire format of one entry in the voices catalog.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct VoiceEntry {
    short_name: String,
    #[serde(default)]
    locale: String,
    #[serde(default)]
    display_name: String,
}

impl AzureSynthesizer {
    pub fn new(
        credentials: SpeechCredentials,
        override_url: Option<&str>,
    ) -> Result<Self, DomainError> {
        let default_url = format!(
            "https://{}.tts.speech.microsoft.com/cognitiveservices/v1",
            credentials.region()
        );
        let base_url = resolve_base_url(override_url, default_url)?;

        Ok(Self {
            client: shared_client()?,
            credentials,
            base_url,
        })
    }

    /// URL of the voices catalog, on the same host as the synthesis
    /// endpoint so overrides redirect both.
    fn voices_url(&self) -> Result<String, DomainError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| DomainError::Config(format!("Invalid synthesis URL: {}", e)))?;
        url.set_path("/cognitiveservices/voices/list");
        Ok(url.to_string())
    }

    /// Build the SSML document for one utterance.
    ///
    /// The `xml:lang` attribute is derived from the voice identifier
    /// ("fr-FR-HenriNeural" speaks "fr-FR").
    fn build_ssml(text: &str, voice: &str) -> String {
        let lang = Self::voice_locale(voice);
        format!(
            "<speak version='1.0' xml:lang='{}'><voice name='{}'>{}</voice></speak>",
            lang,
            escape_xml(voice),
            escape_xml(text)
        )
    }

    fn voice_locale(voice: &str) -> String {
        let mut parts = voice.splitn(3, '-');
        match (parts.next(), parts.next()) {
            (Some(lang), Some(region)) if !lang.is_empty() && !region.is_empty() => {
                format!("{}-{}", lang, region)
            }
            _ => "en-US".to_string(),
        }
    }
}

/// Escape text for embedding in an SSML document.
fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[async_trait]
impl SpeechSynthesizer for AzureSynthesizer {
    async fn synthesize(&self, text: &str, voice: &str) -> Result<AudioClip, DomainError> {
        let ssml = Self::build_ssml(text, voice);

        debug!(voice = voice, chars = text.len(), "Sending synthesis request");

        let response = self
            .client
            .post(&self.base_url)
            .header(SUBSCRIPTION_KEY_HEADER, self.credentials.key())
            .header(reqwest::header::CONTENT_TYPE, "application/ssml+xml")
            .header("X-Microsoft-OutputFormat", OUTPUT_FORMAT)
            .body(ssml)
            .send()
            .await
            .map_err(|e| DomainError::Synthesis(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::Synthesis(format!(
                "HTTP {} from synthesis endpoint",
                status
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| DomainError::Synthesis(e.to_string()))?;

        if bytes.is_empty() {
            return Err(DomainError::Synthesis(
                "Synthesis endpoint returned no audio".to_string(),
            ));
        }

        info!(bytes = bytes.len(), voice = voice, "Synthesis complete");
        Ok(AudioClip::wav(bytes.to_vec()))
    }

    async fn list_voices(&self) -> Result<Vec<Voice>, DomainError> {
        let url = self.voices_url()?;

        let response = self
            .client
            .get(&url)
            .header(SUBSCRIPTION_KEY_HEADER, self.credentials.key())
            .send()
            .await
            .map_err(|e| DomainError::HttpRequest(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::HttpRequest(format!(
                "HTTP {} from voices endpoint",
                status
            )));
        }

        let entries: Vec<VoiceEntry> = response
            .json()
            .await
            .map_err(|e| DomainError::Serialization(e.to_string()))?;

        Ok(entries
            .into_iter()
            .map(|entry| Voice {
                name: entry.short_name,
                locale: entry.locale,
                display_name: entry.display_name,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ssml_wraps_voice_and_text() {
        let ssml = AzureSynthesizer::build_ssml("Bonjour", "fr-FR-HenriNeural");
        assert_eq!(
            ssml,
            "<speak version='1.0' xml:lang='fr-FR'><voice name='fr-FR-HenriNeural'>Bonjour</voice></speak>"
        );
    }

    #[test]
    fn test_ssml_escapes_markup() {
        let ssml = AzureSynthesizer::build_ssml("a < b & c", "en-US-JennyNeural");
        assert!(ssml.contains("a &lt; b &amp; c"));
        assert!(!ssml.contains("a < b"));
    }

    #[test]
    fn test_voice_locale_derivation() {
        assert_eq!(AzureSynthesizer::voice_locale("fr-FR-HenriNeural"), "fr-FR");
        assert_eq!(AzureSynthesizer::voice_locale("en-US-JennyNeural"), "en-US");
        assert_eq!(AzureSynthesizer::voice_locale("garbage"), "en-US");
    }

    #[test]
    fn test_voices_url_follows_override_host() {
        let creds = SpeechCredentials::new("key", "westeurope");
        let synthesizer =
            AzureSynthesizer::new(creds, Some("http://localhost:9999/cognitiveservices/v1"))
                .unwrap();
        assert_eq!(
            synthesizer.voices_url().unwrap(),
            "http://localhost:9999/cognitiveservices/voices/list"
        );
    }

    #[test]
    fn test_voice_entry_deserialization() {
        let body = r#"[{"Name":"Microsoft Server Speech Text to Speech Voice (fr-FR, HenriNeural)","ShortName":"fr-FR-HenriNeural","Locale":"fr-FR","DisplayName":"Henri","Gender":"Male"}]"#;
        let entries: Vec<VoiceEntry> = serde_json::from_str(body).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].short_name, "fr-FR-HenriNeural");
        assert_eq!(entries[0].locale, "fr-FR");
    }
}

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// Azure subscription credentials, read once at process start.
///
/// The key is zeroed from memory on drop and never appears in Debug output
/// or the log stream.
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct SpeechCredentials {
    key: String,
    region: String,
}

impl SpeechCredentials {
    pub fn new(key: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            region: region.into(),
        }
    }

    /// Read credentials from the environment.
    ///
    /// `SPEECH_KEY` / `SPEECH_REGION` take precedence; the `AZURE_`-prefixed
    /// names are accepted as a fallback.
    pub fn from_env() -> Self {
        let key = std::env::var("SPEECH_KEY")
            .or_else(|_| std::env::var("AZURE_SPEECH_KEY"))
            .unwrap_or_default();
        let region = std::env::var("SPEECH_REGION")
            .or_else(|_| std::env::var("AZURE_SPEECH_REGION"))
            .unwrap_or_default();
        Self { key, region }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Whether both halves are usable. A placeholder region left over from
    /// setup instructions counts as unconfigured and disables all calls.
    pub fn is_configured(&self) -> bool {
        !self.key.is_empty() && !self.region.is_empty() && self.region != "YOUR_REGION"
    }
}

impl std::fmt::Debug for SpeechCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechCredentials")
            .field("key", &"<redacted>")
            .field("region", &self.region)
            .finish()
    }
}

/// Pre-filled values for the three form fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormDefaults {
    /// Recognition language for uploaded audio (BCP-47, e.g. "en-US").
    pub recognition_language: String,
    /// Target language code for translation (e.g. "fr").
    pub target_language: String,
    /// Synthesis voice identifier (e.g. "fr-FR-HenriNeural").
    pub voice: String,
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            recognition_language: "en-US".to_string(),
            target_language: "fr".to_string(),
            voice: "fr-FR-HenriNeural".to_string(),
        }
    }
}

/// Base-URL overrides for the three remote services.
///
/// When unset, adapters derive the regional Azure endpoint from the
/// credentials. Overrides point tests or private clouds elsewhere.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointOverrides {
    pub recognition: Option<String>,
    pub synthesis: Option<String>,
    pub translation: Option<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    pub level: String,
    /// Enable file logging with daily rotation.
    pub file_logging: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_logging: true,
        }
    }
}

/// Main application configuration, persisted as TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub defaults: FormDefaults,
    pub endpoints: EndpointOverrides,
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;

use crate::adapters::{AzureRecognizer, AzureSynthesizer, AzureTranslator, TomlConfigStore};
use crate::domain::config::FormDefaults;
use crate::domain::{AppConfig, AudioClip, DomainError, Recognition, SpeechCredentials, Voice};
use crate::infrastructure::init_logging;
use crate::ports::{ConfigStore, SpeechRecognizer, SpeechSynthesizer, Translator};

/// Application controller that owns the configuration and the three remote
/// clients, and runs each user-triggered flow start to finish.
///
/// Flows are sequential within a single invocation and share nothing mutable
/// beyond the read-only credentials; there is no queuing and no cancellation.
pub struct AppController {
    config: RwLock<AppConfig>,
    config_store: Arc<dyn ConfigStore>,
    credentials: SpeechCredentials,
    recognizer: Arc<dyn SpeechRecognizer>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    translator: Arc<dyn Translator>,
    _log_guard: Option<WorkerGuard>,
}

impl AppController {
    /// Initialize the application controller.
    /// Sets up configuration, logging, credentials, and the Azure clients.
    pub fn new() -> Result<Self, DomainError> {
        let config_store: Arc<dyn ConfigStore> = Arc::new(TomlConfigStore::new()?);
        let config = config_store.load()?;

        let log_guard = init_logging(
            &config_store.logs_dir(),
            &config.logging.level,
            config.logging.file_logging,
        )?;

        info!("Voxlate starting up");

        let credentials = SpeechCredentials::from_env();
        if !credentials.is_configured() {
            warn!("Speech credentials missing or placeholder; remote calls are disabled");
        }

        let recognizer = Arc::new(AzureRecognizer::new(
            credentials.clone(),
            config.endpoints.recognition.as_deref(),
        )?);
        let synthesizer = Arc::new(AzureSynthesizer::new(
            credentials.clone(),
            config.endpoints.synthesis.as_deref(),
        )?);
        let translator = Arc::new(AzureTranslator::new(
            credentials.clone(),
            config.endpoints.translation.as_deref(),
        )?);

        info!(
            configured = credentials.is_configured(),
            region = credentials.region(),
            "AppController initialized"
        );

        Ok(Self {
            config: RwLock::new(config),
            config_store,
            credentials,
            recognizer,
            synthesizer,
            translator,
            _log_guard: log_guard,
        })
    }

    #[cfg(test)]
    pub(crate) fn with_ports(
        config: AppConfig,
        config_store: Arc<dyn ConfigStore>,
        credentials: SpeechCredentials,
        recognizer: Arc<dyn SpeechRecognizer>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        translator: Arc<dyn Translator>,
    ) -> Self {
        Self {
            config: RwLock::new(config),
            config_store,
            credentials,
            recognizer,
            synthesizer,
            translator,
            _log_guard: None,
        }
    }

    /// Speech-to-Text flow: recognize an uploaded WAV clip.
    ///
    /// An empty upload fails with `MissingInput` before any network call.
    /// Remote failures are logged and collapse to `NoMatch`, which the UI
    /// renders as the generic "failed to transcribe" line.
    pub async fn recognize_upload(
        &self,
        audio: AudioClip,
        language: &str,
    ) -> Result<Recognition, DomainError> {
        if audio.is_empty() {
            return Err(DomainError::MissingInput(
                "Please upload a WAV file first".to_string(),
            ));
        }
        self.ensure_configured()?;

        let language = self.or_default(language, |d| d.recognition_language.clone());

        match self.recognizer.recognize(&audio, &language).await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                warn!(error = %e, "Recognition request failed");
                Ok(Recognition::NoMatch)
            }
        }
    }

    /// Text-to-Speech flow: synthesize typed text with the given voice.
    pub async fn speak(&self, text: &str, voice: &str) -> Result<AudioClip, DomainError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::MissingInput(
                "Type some text first".to_string(),
            ));
        }
        self.ensure_configured()?;

        let voice = self.or_default(voice, |d| d.voice.clone());
        self.synthesizer.synthesize(text, &voice).await
    }

    /// Translate-and-Speak flow: translate typed text, then synthesize the
    /// translation. A translation failure ends the flow; no synthesis call
    /// is issued.
    pub async fn translate_and_speak(
        &self,
        text: &str,
        to_language: &str,
        voice: &str,
    ) -> Result<(String, AudioClip), DomainError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::MissingInput(
                "Please enter text first".to_string(),
            ));
        }
        self.ensure_configured()?;

        let to_language = self.or_default(to_language, |d| d.target_language.clone());
        let voice = self.or_default(voice, |d| d.voice.clone());

        let translated = self.translator.translate(text, &to_language).await?;
        let audio = self.synthesizer.synthesize(&translated, &voice).await?;

        Ok((translated, audio))
    }

    /// List the synthesis voices the service offers.
    pub async fn voices(&self) -> Result<Vec<Voice>, DomainError> {
        self.ensure_configured()?;
        self.synthesizer.list_voices().await
    }

    /// Whether usable credentials were found at startup.
    pub fn is_configured(&self) -> bool {
        self.credentials.is_configured()
    }

    /// Get the current configuration.
    pub fn config(&self) -> AppConfig {
        self.config.read().clone()
    }

    /// Update the configuration.
    ///
    /// Form defaults apply immediately; endpoint overrides take effect on
    /// the next launch, when the clients are rebuilt.
    pub fn update_config(&self, config: AppConfig) -> Result<(), DomainError> {
        self.config_store.save(&config)?;
        *self.config.write() = config;

        info!("Configuration updated");
        Ok(())
    }

    /// Get the data directory path.
    pub fn data_dir(&self) -> String {
        self.config_store.data_dir().to_string_lossy().to_string()
    }

    /// Get the logs directory path.
    pub fn logs_dir(&self) -> String {
        self.config_store.logs_dir().to_string_lossy().to_string()
    }

    /// Get the config file path.
    pub fn config_path(&self) -> String {
        self.config_store.config_path().to_string_lossy().to_string()
    }

    fn ensure_configured(&self) -> Result<(), DomainError> {
        if self.credentials.is_configured() {
            Ok(())
        } else {
            Err(DomainError::Config(
                "Speech credentials are not configured. Set SPEECH_KEY and SPEECH_REGION."
                    .to_string(),
            ))
        }
    }

    /// Use the form value if present, else the configured default.
    fn or_default(&self, value: &str, pick: impl Fn(&FormDefaults) -> String) -> String {
        let value = value.trim();
        if value.is_empty() {
            pick(&self.config.read().defaults)
        } else {
            value.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use parking_lot::Mutex;

    use super::*;

    struct NullConfigStore;

    impl ConfigStore for NullConfigStore {
        fn load(&self) -> Result<AppConfig, DomainError> {
            Ok(AppConfig::new())
        }
        fn save(&self, _config: &AppConfig) -> Result<(), DomainError> {
            Ok(())
        }
        fn config_path(&self) -> PathBuf {
            PathBuf::from("/tmp/voxlate-test/config.toml")
        }
        fn data_dir(&self) -> PathBuf {
            PathBuf::from("/tmp/voxlate-test")
        }
        fn logs_dir(&self) -> PathBuf {
            PathBuf::from("/tmp/voxlate-test/logs")
        }
    }

    #[derive(Default)]
    struct MockRecognizer {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl SpeechRecognizer for MockRecognizer {
        async fn recognize(
            &self,
            _audio: &AudioClip,
            _language: &str,
        ) -> Result<Recognition, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(DomainError::Recognition("connection refused".to_string()))
            } else {
                Ok(Recognition::Recognized {
                    text: "hello world".to_string(),
                })
            }
        }
    }

    #[derive(Default)]
    struct MockSynthesizer {
        calls: AtomicUsize,
        spoken: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl SpeechSynthesizer for MockSynthesizer {
        async fn synthesize(&self, text: &str, _voice: &str) -> Result<AudioClip, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(DomainError::Synthesis("HTTP 400".to_string()));
            }
            self.spoken.lock().push(text.to_string());
            Ok(AudioClip::wav(vec![82, 73, 70, 70]))
        }

        async fn list_voices(&self) -> Result<Vec<Voice>, DomainError> {
            Ok(vec![])
        }
    }

    #[derive(Default)]
    struct MockTranslator {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl Translator for MockTranslator {
        async fn translate(&self, _text: &str, _to: &str) -> Result<String, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(DomainError::Translation(
                    "HTTP 401 from translation endpoint".to_string(),
                ))
            } else {
                Ok("Bonjour".to_string())
            }
        }
    }

    struct Harness {
        controller: AppController,
        recognizer: Arc<MockRecognizer>,
        synthesizer: Arc<MockSynthesizer>,
        translator: Arc<MockTranslator>,
    }

    fn harness(recognizer: MockRecognizer, synthesizer: MockSynthesizer, translator: MockTranslator) -> Harness {
        let recognizer = Arc::new(recognizer);
        let synthesizer = Arc::new(synthesizer);
        let translator = Arc::new(translator);
        let controller = AppController::with_ports(
            AppConfig::new(),
            Arc::new(NullConfigStore),
            SpeechCredentials::new("test-key", "westeurope"),
            recognizer.clone(),
            synthesizer.clone(),
            translator.clone(),
        );
        Harness {
            controller,
            recognizer,
            synthesizer,
            translator,
        }
    }

    #[tokio::test]
    async fn test_empty_upload_is_missing_input_without_network() {
        let h = harness(Default::default(), Default::default(), Default::default());

        let result = h
            .controller
            .recognize_upload(AudioClip::wav(vec![]), "en-US")
            .await;

        assert!(matches!(result, Err(DomainError::MissingInput(_))));
        assert_eq!(h.recognizer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_recognition_success() {
        let h = harness(Default::default(), Default::default(), Default::default());

        let outcome = h
            .controller
            .recognize_upload(AudioClip::wav(vec![1, 2, 3]), "en-US")
            .await
            .unwrap();

        assert_eq!(
            outcome,
            Recognition::Recognized {
                text: "hello world".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_recognition_failure_collapses_to_no_match() {
        let h = harness(
            MockRecognizer {
                fail: true,
                ..Default::default()
            },
            Default::default(),
            Default::default(),
        );

        let outcome = h
            .controller
            .recognize_upload(AudioClip::wav(vec![1, 2, 3]), "en-US")
            .await
            .unwrap();

        assert_eq!(outcome, Recognition::NoMatch);
        assert_eq!(h.recognizer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_blank_text_speak_is_missing_input_without_network() {
        let h = harness(Default::default(), Default::default(), Default::default());

        let result = h.controller.speak("   ", "fr-FR-HenriNeural").await;

        assert!(matches!(result, Err(DomainError::MissingInput(_))));
        assert_eq!(h.synthesizer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_speak_returns_audio() {
        let h = harness(Default::default(), Default::default(), Default::default());

        let clip = h
            .controller
            .speak("Hello", "fr-FR-HenriNeural")
            .await
            .unwrap();

        assert!(!clip.is_empty());
        assert_eq!(h.synthesizer.spoken.lock().as_slice(), ["Hello"]);
    }

    #[tokio::test]
    async fn test_synthesis_failure_is_typed() {
        let h = harness(
            Default::default(),
            MockSynthesizer {
                fail: true,
                ..Default::default()
            },
            Default::default(),
        );

        let result = h.controller.speak("Hello", "not-a-voice").await;
        assert!(matches!(result, Err(DomainError::Synthesis(_))));
    }

    #[tokio::test]
    async fn test_blank_text_translate_is_missing_input_without_network() {
        let h = harness(Default::default(), Default::default(), Default::default());

        let result = h
            .controller
            .translate_and_speak("", "fr", "fr-FR-HenriNeural")
            .await;

        assert!(matches!(result, Err(DomainError::MissingInput(_))));
        assert_eq!(h.translator.calls.load(Ordering::SeqCst), 0);
        assert_eq!(h.synthesizer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_translated_text_feeds_synthesis() {
        let h = harness(Default::default(), Default::default(), Default::default());

        let (text, audio) = h
            .controller
            .translate_and_speak("Hello", "fr", "fr-FR-HenriNeural")
            .await
            .unwrap();

        assert_eq!(text, "Bonjour");
        assert!(!audio.is_empty());
        assert_eq!(h.synthesizer.spoken.lock().as_slice(), ["Bonjour"]);
    }

    #[tokio::test]
    async fn test_translation_failure_skips_synthesis() {
        let h = harness(
            Default::default(),
            Default::default(),
            MockTranslator {
                fail: true,
                ..Default::default()
            },
        );

        let result = h
            .controller
            .translate_and_speak("Hello", "fr", "fr-FR-HenriNeural")
            .await;

        assert!(matches!(result, Err(DomainError::Translation(_))));
        assert_eq!(h.translator.calls.load(Ordering::SeqCst), 1);
        assert_eq!(h.synthesizer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unconfigured_credentials_block_every_flow() {
        let recognizer = Arc::new(MockRecognizer::default());
        let synthesizer = Arc::new(MockSynthesizer::default());
        let translator = Arc::new(MockTranslator::default());
        let controller = AppController::with_ports(
            AppConfig::new(),
            Arc::new(NullConfigStore),
            SpeechCredentials::new("key", "YOUR_REGION"),
            recognizer.clone(),
            synthesizer.clone(),
            translator.clone(),
        );

        assert!(!controller.is_configured());

        let result = controller.speak("Hello", "fr-FR-HenriNeural").await;
        assert!(matches!(result, Err(DomainError::Config(_))));

        let result = controller
            .recognize_upload(AudioClip::wav(vec![1]), "en-US")
            .await;
        assert!(matches!(result, Err(DomainError::Config(_))));

        assert_eq!(recognizer.calls.load(Ordering::SeqCst), 0);
        assert_eq!(synthesizer.calls.load(Ordering::SeqCst), 0);
        assert_eq!(translator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_blank_fields_fall_back_to_config_defaults() {
        let h = harness(Default::default(), Default::default(), Default::default());

        // Blank voice and target language come from FormDefaults.
        let (text, _audio) = h
            .controller
            .translate_and_speak("Hello", "", "")
            .await
            .unwrap();
        assert_eq!(text, "Bonjour");
        assert_eq!(h.synthesizer.calls.load(Ordering::SeqCst), 1);
    }
}

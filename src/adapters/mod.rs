pub mod azure_stt;
pub mod azure_translator;
pub mod azure_tts;
pub mod config_store;
pub mod http;

pub use azure_stt::AzureRecognizer;
pub use azure_translator::AzureTranslator;
pub use azure_tts::AzureSynthesizer;
pub use config_store::TomlConfigStore;

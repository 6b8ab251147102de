pub mod config;
pub mod error;
pub mod speech;

pub use config::{AppConfig, SpeechCredentials};
pub use error::DomainError;
pub use speech::{AudioClip, Recognition, Voice};

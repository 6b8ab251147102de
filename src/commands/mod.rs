use tauri::State;

use crate::app::AppController;
use crate::domain::{AppConfig, AudioClip, Recognition, Voice};

/// Get the current application configuration.
#[tauri::command]
pub fn get_config(controller: State<'_, AppController>) -> AppConfig {
    controller.config()
}

/// Update the application configuration.
#[tauri::command]
pub fn update_config(
    controller: State<'_, AppController>,
    config: AppConfig,
) -> Result<(), String> {
    controller.update_config(config).map_err(|e| e.to_string())
}

/// Check whether speech credentials were found at startup.
#[tauri::command]
pub fn is_configured(controller: State<'_, AppController>) -> bool {
    controller.is_configured()
}

/// Get application paths information.
#[tauri::command]
pub fn get_paths(controller: State<'_, AppController>) -> AppPaths {
    AppPaths {
        data_dir: controller.data_dir(),
        logs_dir: controller.logs_dir(),
        config_path: controller.config_path(),
    }
}

/// Application paths information.
#[derive(serde::Serialize)]
pub struct AppPaths {
    pub data_dir: String,
    pub logs_dir: String,
    pub config_path: String,
}

// ==================== Flow Commands ====================

/// Speech-to-Text: recognize an uploaded WAV file.
#[tauri::command]
pub async fn recognize_speech(
    controller: State<'_, AppController>,
    audio: Vec<u8>,
    language: String,
) -> Result<Recognition, String> {
    controller
        .recognize_upload(AudioClip::wav(audio), &language)
        .await
        .map_err(|e| e.to_string())
}

/// Text-to-Speech: synthesize typed text with the given voice.
#[tauri::command]
pub async fn synthesize_speech(
    controller: State<'_, AppController>,
    text: String,
    voice: String,
) -> Result<SpeechReply, String> {
    let clip = controller
        .speak(&text, &voice)
        .await
        .map_err(|e| e.to_string())?;

    Ok(SpeechReply {
        mime_type: clip.mime_type.clone(),
        audio: clip.bytes,
    })
}

/// Synthesized audio, played by the form from a Blob.
#[derive(serde::Serialize)]
pub struct SpeechReply {
    pub audio: Vec<u8>,
    pub mime_type: String,
}

/// Translate-and-Speak: translate typed text, then synthesize the result.
#[tauri::command]
pub async fn translate_speech(
    controller: State<'_, AppController>,
    text: String,
    to_language: String,
    voice: String,
) -> Result<TranslatedSpeechReply, String> {
    let (translated, clip) = controller
        .translate_and_speak(&text, &to_language, &voice)
        .await
        .map_err(|e| e.to_string())?;

    Ok(TranslatedSpeechReply {
        text: translated,
        mime_type: clip.mime_type.clone(),
        audio: clip.bytes,
    })
}

/// Translated text plus its synthesized audio.
#[derive(serde::Serialize)]
pub struct TranslatedSpeechReply {
    pub text: String,
    pub audio: Vec<u8>,
    pub mime_type: String,
}

/// List the synthesis voices offered by the service.
#[tauri::command]
pub async fn list_voices(controller: State<'_, AppController>) -> Result<Vec<Voice>, String> {
    controller.voices().await.map_err(|e| e.to_string())
}

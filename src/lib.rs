#![forbid(unsafe_code)]

mod adapters;
mod app;
mod commands;
mod domain;
mod infrastructure;
mod ports;

use app::AppController;
use commands::{
    // Config commands
    get_config, update_config, is_configured, get_paths,
    // Flow commands
    recognize_speech, synthesize_speech, translate_speech, list_voices,
};

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize the application controller
    let controller = match AppController::new() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };

    tauri::Builder::default()
        .manage(controller)
        .invoke_handler(tauri::generate_handler![
            // Config commands
            get_config,
            update_config,
            is_configured,
            get_paths,
            // Flow commands
            recognize_speech,
            synthesize_speech,
            translate_speech,
            list_voices,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

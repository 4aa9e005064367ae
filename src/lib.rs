pub mod config;
pub mod documents;
pub mod generation;
pub mod prompt;
pub mod session;

#[cfg(feature = "desktop")]
mod desktop_commands;

#[cfg(test)]
mod test_util;

pub use config::AppConfig;
pub use documents::{Conversion, DocError, DocFormat};
pub use generation::{CompletionBackend, GenerationError, HfClient};
pub use prompt::{Length, PromptError, PromptForm, PromptRequest, Tone, WordLimit};
pub use session::{Content, ContentOrigin, PendingGeneration, Session, SessionError};

#[cfg(feature = "desktop")]
pub fn run() {
  let config = match AppConfig::load(None) {
    Ok(config) => config,
    Err(e) => {
      eprintln!("{e}; falling back to defaults");
      let mut config = AppConfig::default();
      config.apply_env();
      config
    }
  };
  let state = match desktop_commands::DesktopState::new(&config) {
    Ok(state) => state,
    Err(e) => {
      eprintln!("failed to initialize generation client: {e}");
      std::process::exit(1);
    }
  };

  tauri::Builder::default()
    .plugin(tauri_plugin_dialog::init())
    .manage(state)
    .setup(|app| {
      if cfg!(debug_assertions) {
        app.handle().plugin(
          tauri_plugin_log::Builder::default()
            .level(log::LevelFilter::Info)
            .build(),
        )?;
      }
      Ok(())
    })
    .invoke_handler(tauri::generate_handler![
      desktop_commands::generate_content,
      desktop_commands::save_content,
      desktop_commands::upload_file,
      desktop_commands::convert_file,
      desktop_commands::current_content,
    ])
    .run(tauri::generate_context!())
    .expect("error while running tauri application");
}

//! Config command - show resolved configuration

use std::path::Path;

use anyhow::Result;
use docagent_lib::config::default_config_path;
use docagent_lib::AppConfig;

pub fn show(config: &AppConfig) -> Result<()> {
    let api_key = if config.has_api_key() { "set (redacted)" } else { "not set" };
    println!("API key:      {api_key}");
    println!("Base URL:     {}", config.base_url);
    println!("Model:        {}", config.model);
    println!("Max tokens:   {}", config.max_tokens);
    println!("Timeout:      {}s", config.timeout_secs);
    println!("User agent:   {}", config.user_agent);
    Ok(())
}

pub fn show_path(explicit: Option<&Path>) -> Result<()> {
    match explicit.map(Path::to_path_buf).or_else(default_config_path) {
        Some(path) => println!("{}", path.display()),
        None => anyhow::bail!("Could not determine config directory"),
    }
    Ok(())
}

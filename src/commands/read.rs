//! Read command - extract text from a file, optionally save it in another format

use std::path::Path;

use anyhow::Result;
use docagent_lib::{AppConfig, HfClient, Session};

pub fn run(config: &AppConfig, input: &Path, save_as: Option<&Path>) -> Result<()> {
    let mut session = Session::new(HfClient::new(config)?);
    let content = session.upload(input)?;

    match save_as {
        Some(path) => {
            let saved = session.save(path)?;
            eprintln!("Saved to {}", saved.display());
        }
        None => println!("{}", content.text()),
    }
    Ok(())
}

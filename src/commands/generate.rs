//! Generate command - prompt the hosted model, print or save the result

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use docagent_lib::{AppConfig, HfClient, PromptForm, Session};

#[derive(Args)]
pub struct GenerateArgs {
    /// What to write about
    #[arg(short, long)]
    pub prompt: String,

    /// formal, casual, professional or custom
    #[arg(short, long, default_value = "formal")]
    pub tone: String,

    /// Tone text used when --tone custom
    #[arg(long)]
    pub custom_tone: Option<String>,

    /// short, medium, long or custom
    #[arg(short, long, default_value = "medium")]
    pub length: String,

    /// Word limit used when --length custom
    #[arg(short, long)]
    pub words: Option<String>,

    /// Save into this file (.txt, .docx or .pdf) instead of printing
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override max_tokens from config
    #[arg(long)]
    pub max_tokens: Option<u32>,
}

impl GenerateArgs {
    fn form(&self) -> PromptForm {
        PromptForm {
            prompt: self.prompt.clone(),
            tone: self.tone.clone(),
            custom_tone: self.custom_tone.clone(),
            length: self.length.clone(),
            word_limit: self.words.clone(),
        }
    }
}

pub fn run(config: &AppConfig, args: &GenerateArgs) -> Result<()> {
    let request = args.form().validate()?;
    let client = HfClient::new(config)?;
    let mut session =
        Session::new(client).with_max_tokens(args.max_tokens.unwrap_or(config.max_tokens));

    match &args.output {
        Some(path) => {
            let saved = session.generate_and_save(&request, path)?;
            eprintln!("Saved to {}", saved.display());
        }
        None => {
            let content = session.generate(&request)?;
            println!("{}", content.text());
        }
    }
    Ok(())
}

//! Convert command

use std::path::Path;

use anyhow::Result;
use docagent_lib::documents;
use docagent_lib::Conversion;

pub fn run(input: &Path, output: &Path, kind: Option<&str>) -> Result<()> {
    let written = match kind {
        Some(label) => {
            let conversion: Conversion = label.parse()?;
            log::info!("[convert] {conversion}");
            documents::convert(input, output, conversion)?
        }
        None => documents::convert_file(input, output)?,
    };
    eprintln!("Converted to {}", written.display());
    Ok(())
}

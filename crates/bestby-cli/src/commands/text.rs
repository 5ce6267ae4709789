//! Text command - run the engine on raw OCR text.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use tracing::debug;

use bestby_core::ExpiryEngine;

use super::{OutputFormat, render};

/// Arguments for the text command.
#[derive(Args)]
pub struct TextArgs {
    /// Input text file; `-` or omitted reads stdin
    input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

pub async fn run(args: TextArgs, _config_path: Option<&str>) -> anyhow::Result<()> {
    let text = match &args.input {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)?,
        _ => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    debug!("running engine over {} characters", text.len());

    let report = ExpiryEngine::new().scan(&text);
    println!("{}", render(&report, args.format)?);

    Ok(())
}

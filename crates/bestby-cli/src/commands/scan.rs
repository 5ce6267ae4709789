//! Scan command - read the expiry date from a single label photo.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use bestby_core::{
    BestbyConfig, ExpiryEngine, ImagePreprocessor, MultiPassOcr, TesseractRecognizer,
};

use super::{OutputFormat, render};

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// Input label photo
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Write the prepared (binarized) image here for inspection
    #[arg(long)]
    save_preprocessed: Option<PathBuf>,

    /// Print the combined OCR text to stderr before the result
    #[arg(long)]
    show_text: bool,
}

pub async fn run(args: ScanArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Load configuration
    let config = if let Some(path) = config_path {
        BestbyConfig::from_file(std::path::Path::new(path))?
    } else {
        BestbyConfig::default()
    };

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Scanning label photo: {}", args.input.display());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    pb.set_message("Loading image...");
    pb.set_position(10);
    let image = image::open(&args.input)?;

    pb.set_message("Preparing image...");
    pb.set_position(25);
    let preprocessor = ImagePreprocessor::from_config(&config.preprocess);
    let prepared = preprocessor.prepare(&image);

    if let Some(path) = &args.save_preprocessed {
        prepared.save(path)?;
        debug!("prepared image written to {}", path.display());
    }

    pb.set_message("Running OCR passes...");
    pb.set_position(40);
    let recognizer = TesseractRecognizer::from_config(&config.ocr);
    let ocr = MultiPassOcr::from_config(recognizer, &config.ocr);
    let blob = ocr.read_text(&prepared);
    debug!("OCR produced {} characters over all passes", blob.len());

    if args.show_text {
        eprintln!("{}", style("------ OCR TEXT ------").dim());
        eprintln!("{blob}");
        eprintln!("{}", style("----------------------").dim());
    }

    pb.set_message("Disambiguating dates...");
    pb.set_position(80);
    let report = ExpiryEngine::new().scan(&blob);

    pb.finish_and_clear();

    let output = render(&report, args.format)?;
    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{output}");
    }

    debug!("Total scan time: {:?}", start.elapsed());

    Ok(())
}

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use scriptstruct::core::config::Tuning;
use scriptstruct::extract::read_glyph_dump;
use scriptstruct::layout::LineBuilder;
use scriptstruct::pipeline::{build_screenplay, export_screenplay, PipelineConfig};

#[derive(Parser, Debug)]
#[command(name = "scriptstruct")]
#[command(version, about = "Screenplay paragraph recovery from positioned-glyph dumps", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a glyph dump to classified paragraphs
    Convert {
        /// Input glyph dump (JSON Lines, one glyph per line)
        input: PathBuf,

        /// Output directory (default: ./<input_name>_output)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// First page to process
        #[arg(long, default_value_t = 0)]
        start_page: usize,

        /// Number of pages to process (default: all)
        #[arg(long)]
        pages: Option<usize>,

        /// Hard cap on emitted paragraphs
        #[arg(long, default_value_t = 200)]
        max_paragraphs: usize,

        /// JSON file overriding heuristic thresholds
        #[arg(long)]
        tuning: Option<PathBuf>,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Convert multiple glyph dumps
    Batch {
        /// Input glyph dump files
        inputs: Vec<PathBuf>,

        /// Output directory for all results
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Hard cap on emitted paragraphs per dump
        #[arg(long, default_value_t = 200)]
        max_paragraphs: usize,
    },

    /// Show information about a glyph dump
    Info {
        /// Input glyph dump file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            start_page,
            pages,
            max_paragraphs,
            tuning,
            quiet,
        } => convert_single(input, output, start_page, pages, max_paragraphs, tuning, quiet),
        Commands::Batch {
            inputs,
            output,
            max_paragraphs,
        } => convert_batch(inputs, output, max_paragraphs),
        Commands::Info { input } => show_info(input),
    }
}

fn convert_single(
    input: PathBuf,
    output: Option<PathBuf>,
    start_page: usize,
    pages: Option<usize>,
    max_paragraphs: usize,
    tuning_path: Option<PathBuf>,
    quiet: bool,
) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }
    if !input.is_file() {
        anyhow::bail!("Input is not a file: {}", input.display());
    }

    let output_dir = output.unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_output", stem))
    });

    let mut tuning = match &tuning_path {
        Some(path) => {
            let data = fs::read_to_string(path)
                .with_context(|| format!("failed to read tuning file: {}", path.display()))?;
            serde_json::from_str::<Tuning>(&data)
                .with_context(|| format!("invalid tuning file: {}", path.display()))?
        }
        None => Tuning::default(),
    };
    tuning.max_paragraphs = max_paragraphs;

    let mut config = PipelineConfig::new(input.clone(), output_dir.clone());
    config.start_page = start_page;
    config.end_page = match pages {
        Some(count) => start_page.saturating_add(count.saturating_sub(1)),
        None => usize::MAX,
    };
    config.tuning = tuning;

    if !quiet {
        println!("[*] Processing: {}", input.display());
        println!("[*] Output: {}", output_dir.display());
    }

    let screenplay = build_screenplay(&config)
        .with_context(|| format!("Failed to process dump: {}", input.display()))?;

    if !quiet {
        println!("[+] Assembled {} paragraphs", screenplay.paragraphs.len());
    }

    export_screenplay(&screenplay, &config.output)
        .with_context(|| format!("Failed to export to: {}", output_dir.display()))?;

    if !quiet {
        println!("[✓] Done! Results saved to: {}", output_dir.display());
    }

    Ok(())
}

fn convert_batch(
    inputs: Vec<PathBuf>,
    output: Option<PathBuf>,
    max_paragraphs: usize,
) -> Result<()> {
    if inputs.is_empty() {
        anyhow::bail!("No input files specified");
    }

    let base_output = output.unwrap_or_else(|| PathBuf::from("batch_output"));

    println!("[*] Batch processing {} file(s)", inputs.len());

    let mut success = 0;
    let mut failed = 0;

    for (i, input) in inputs.iter().enumerate() {
        println!("[{}/{}] Processing: {}", i + 1, inputs.len(), input.display());

        if !input.exists() {
            eprintln!("  [!] Skipped: file does not exist");
            failed += 1;
            continue;
        }

        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        let output_dir = base_output.join(&*stem);

        match convert_single(
            input.clone(),
            Some(output_dir),
            0,
            None,
            max_paragraphs,
            None,
            true,
        ) {
            Ok(_) => {
                println!("  [✓] Success");
                success += 1;
            }
            Err(e) => {
                eprintln!("  [✗] Failed: {}", e);
                failed += 1;
            }
        }
    }

    println!("\n[*] Summary: {} succeeded, {} failed", success, failed);

    if failed > 0 {
        anyhow::bail!("{} file(s) failed to process", failed);
    }

    Ok(())
}

fn show_info(input: PathBuf) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }

    let mut builder = LineBuilder::new(Tuning::default().vertical_granularity);
    let glyphs = read_glyph_dump(&input, 0, usize::MAX, &mut builder)
        .with_context(|| format!("Failed to read dump: {}", input.display()))?;
    let lines = builder.build();

    let pages = lines.iter().map(|l| l.page);
    let first_page = pages.clone().min();
    let last_page = pages.max();

    println!("Glyph Dump Information");
    println!("======================");
    println!("File: {}", input.display());
    println!("Glyphs: {}", glyphs);
    println!("Lines: {}", lines.len());
    match (first_page, last_page) {
        (Some(first), Some(last)) => println!("Pages: {first}..={last}"),
        _ => println!("Pages: none"),
    }

    Ok(())
}

//! mobiconvert - package MOBI/AZW3 parts into EPUB

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mobiconvert::epub::{EpubReport, inspect};
use mobiconvert::export::{EpubConfig, archive_entries};
use mobiconvert::{ConvertConfig, PartsDirectory, convert_document, extract};

#[derive(Parser)]
#[command(name = "mobiconvert")]
#[command(version, about = "Package MOBI/AZW3 parts into EPUB", long_about = None)]
#[command(after_help = "EXAMPLES:
    mobiconvert pack book_markup book.epub    Package a dumped parts directory
    mobiconvert pack -n book_markup           Show the archive layout only
    mobiconvert inspect book.epub             Check an EPUB container")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Suppress output messages
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log every file written
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Package a directory of dumped parts into an EPUB
    Pack {
        /// Parts directory (flat or EPUB layout)
        #[arg(value_name = "DIR")]
        input: PathBuf,

        /// Output EPUB file
        #[arg(value_name = "OUTPUT", required_unless_present = "dry_run")]
        output: Option<PathBuf>,

        /// Deflate compression level, 0 stores entries uncompressed
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(0..=9))]
        level: Option<u32>,

        /// Print the archive layout without writing anything
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Check the container structure of an EPUB
    Inspect {
        /// EPUB file
        #[arg(value_name = "EPUB")]
        input: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    let result = match cli.command {
        Command::Pack {
            input,
            output,
            level,
            dry_run,
        } => {
            match output {
                Some(output) if !dry_run => pack(&input, &output, level),
                _ => show_layout(&input),
            }
        }
        Command::Inspect { input, json } => show_report(&input, json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(quiet: bool, verbose: bool) {
    let default = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn pack(input: &Path, output: &Path, level: Option<u32>) -> Result<(), String> {
    let document = PartsDirectory::open(input).map_err(|e| e.to_string())?;

    let mut epub = EpubConfig::default();
    epub.compression_level = level;
    let config = ConvertConfig::default().with_epub(epub);

    let bytes = convert_document(&document, &config).map_err(|e| e.to_string())?;
    std::fs::write(output, &bytes).map_err(|e| format!("{}: {e}", output.display()))?;
    tracing::info!(path = %output.display(), size = bytes.len(), "Saved EPUB");
    Ok(())
}

fn show_layout(input: &Path) -> Result<(), String> {
    let document = PartsDirectory::open(input).map_err(|e| e.to_string())?;
    let parts = extract(&document).map_err(|e| e.to_string())?;
    let entries = archive_entries(&parts).map_err(|e| e.to_string())?;

    for entry in entries {
        println!("{:>10}  {}", entry.data.len(), entry.path);
    }
    Ok(())
}

fn show_report(input: &Path, json: bool) -> Result<(), String> {
    let data = std::fs::read(input).map_err(|e| format!("{}: {e}", input.display()))?;
    let report = inspect(&data).map_err(|e| e.to_string())?;

    if json {
        let out = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
        println!("{out}");
    } else {
        print_report(input, &report);
    }

    if report.is_valid() {
        Ok(())
    } else {
        Err(format!("{} container problem(s)", report.issues.len()))
    }
}

fn print_report(input: &Path, report: &EpubReport) {
    println!("File: {}", input.display());
    if let Some(ref rootfile) = report.rootfile {
        println!("Rootfile: {rootfile}");
    }
    println!("Entries: {}", report.entries.len());
    for entry in &report.entries {
        let method = if entry.stored { "stored" } else { "deflated" };
        println!(
            "{:>10} {:>10}  {:<8}  {}",
            entry.size, entry.compressed_size, method, entry.name
        );
    }
    for issue in &report.issues {
        println!("Problem: {issue}");
    }
}

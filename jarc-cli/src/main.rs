//! jarc CLI - Command-line tool for jarc archives
//!
//! This binary provides command-line interfaces for:
//! - pack: transcode NDJSON → .jarc archive records
//! - unpack: decode .jarc records → NDJSON
//! - ls: list the records of an archive

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use jarc_format::{records, DocumentView, ValueRef};
use jarc_io::{parallel::transcode_parallel, TranscodeOptions};
use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "jarc")]
#[command(about = "Streaming JSON-to-archive transcoder CLI")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transcode NDJSON input to a .jarc archive
    Pack {
        /// Input file (newline-delimited JSON)
        input: PathBuf,
        /// Output file (.jarc)
        #[arg(short, long)]
        output: PathBuf,
        /// Read size per chunk in bytes
        #[arg(long, default_value = "1048576")]
        chunk_bytes: usize,
        /// Transcode document ranges across all cores
        #[arg(long)]
        parallel: bool,
        /// Show a progress spinner
        #[arg(long)]
        progress: bool,
    },
    /// Decode a .jarc archive back to NDJSON
    Unpack {
        /// Input file (.jarc)
        input: PathBuf,
        /// Output file
        #[arg(short, long)]
        output: PathBuf,
        /// Show a progress spinner
        #[arg(long)]
        progress: bool,
    },
    /// List the records of a .jarc archive
    Ls {
        /// Input file (.jarc)
        input: PathBuf,
        /// Emit the listing as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Pack { input, output, chunk_bytes, parallel, progress } => {
            handle_pack(input, output, chunk_bytes, parallel, progress)
        }
        Commands::Unpack { input, output, progress } => handle_unpack(input, output, progress),
        Commands::Ls { input, json } => handle_ls(input, json),
    }
}

fn handle_pack(
    input: PathBuf,
    output: PathBuf,
    chunk_bytes: usize,
    parallel: bool,
    progress: bool,
) -> Result<(), Box<dyn Error>> {
    if chunk_bytes == 0 {
        return Err("--chunk-bytes must be greater than zero".into());
    }
    let start = Instant::now();
    let mut spinner = progress.then(|| create_spinner("Transcoding documents"));

    let (documents, input_bytes, output_bytes) = if parallel {
        let bytes = std::fs::read(&input)?;
        let archive = transcode_parallel(&bytes, chunk_bytes)?;
        let documents = records(&archive).count() as u64;
        std::fs::write(&output, &archive)?;
        (documents, bytes.len() as u64, archive.len() as u64)
    } else {
        let opts = TranscodeOptions { capacity: chunk_bytes, chunk_bytes };
        let writer = BufWriter::new(File::create(&output)?);
        let summary = jarc_io::transcode(File::open(&input)?, writer, &opts)?;
        (summary.documents, summary.input_bytes, summary.output_bytes)
    };

    let elapsed = start.elapsed();
    if let Some(pb) = spinner.take() {
        pb.finish_and_clear();
    }
    let secs = elapsed.as_secs_f64().max(f64::EPSILON);
    eprintln!(
        "Transcoded {} to {} (documents: {}, input: {} bytes, output: {} bytes, elapsed: {:.2?}, {:.1} doc/s)",
        input.display(),
        output.display(),
        documents,
        input_bytes,
        output_bytes,
        elapsed,
        documents as f64 / secs,
    );
    Ok(())
}

fn handle_unpack(input: PathBuf, output: PathBuf, progress: bool) -> Result<(), Box<dyn Error>> {
    let start = Instant::now();
    let mut spinner = progress.then(|| create_spinner("Decoding records"));

    let writer = BufWriter::new(File::create(&output)?);
    let summary = jarc_io::unpack(File::open(&input)?, writer)?;

    let elapsed = start.elapsed();
    if let Some(pb) = spinner.take() {
        pb.finish_and_clear();
    }
    eprintln!(
        "Decoded {} to {} (documents: {}, archive bytes: {}, elapsed: {:.2?})",
        input.display(),
        output.display(),
        summary.documents,
        summary.input_bytes,
        elapsed,
    );
    Ok(())
}

#[derive(Debug, serde::Serialize)]
struct RecordSummary {
    index: usize,
    end_input_offset: u32,
    body_bytes: u32,
    root: &'static str,
}

fn handle_ls(input: PathBuf, json: bool) -> Result<(), Box<dyn Error>> {
    let archive = std::fs::read(&input)?;
    let mut summaries = Vec::new();

    for (index, record) in records(&archive).enumerate() {
        let (header, body) = record?;
        let view = DocumentView::new(body)?;
        summaries.push(RecordSummary {
            index: index + 1,
            end_input_offset: header.end_input_offset,
            body_bytes: header.body_length,
            root: root_kind(&view)?,
        });
    }

    let mut stdout = std::io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut stdout, &summaries)?;
        writeln!(&mut stdout)?;
    } else {
        writeln!(&mut stdout, "Record\tEndOffset\tBodyBytes\tRoot")?;
        for summary in &summaries {
            writeln!(
                &mut stdout,
                "{}\t{}\t{}\t{}",
                summary.index, summary.end_input_offset, summary.body_bytes, summary.root
            )?;
        }
    }
    Ok(())
}

fn root_kind(view: &DocumentView<'_>) -> Result<&'static str, Box<dyn Error>> {
    Ok(match view.root().value()? {
        ValueRef::Null => "null",
        ValueRef::Bool(_) => "bool",
        ValueRef::Float(_) | ValueRef::NegInt(_) | ValueRef::PosInt(_) => "number",
        ValueRef::Str(_) => "string",
        ValueRef::Array(_) => "array",
        ValueRef::Object(_) => "object",
    })
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

// src/main.rs
mod extractors;
mod mapping;
mod pipeline;
mod sources;
mod storage;
mod utils;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use extractors::AttributeExtractor;
use mapping::{schema, ColumnMapper, OutputSchema};
use pipeline::RowPipeline;
use storage::ReportWriter;
use utils::AppError;

/// Extracts product attributes from item descriptions into a "Form 2" report
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input file: Excel workbook (.xlsx) or Word document (.docx)
    #[arg(required_unless_present = "list_columns")]
    input: Option<PathBuf>,

    /// Output report (.xlsx or .csv); defaults to <input>_form2.xlsx next to the input
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Name of the description column in Excel input
    #[arg(short, long, default_value = sources::DEFAULT_DESCRIPTION_COLUMN)]
    column: String,

    /// Also write run metadata as <output>.meta.json
    #[arg(short, long)]
    metadata: bool,

    /// Print the report columns with their known aliases and exit
    #[arg(long)]
    list_columns: bool,
}

fn main() -> ExitCode {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::debug!("Starting with args: {:?}", args);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), AppError> {
    if args.list_columns {
        print_columns(&OutputSchema::form2());
        return Ok(());
    }

    let input = args
        .input
        .as_deref()
        .ok_or_else(|| AppError::Config("No input file given".to_string()))?;
    let output = args.output.clone().unwrap_or_else(|| default_output_path(input));

    // 3. Read the whole input before touching the output
    let source = sources::open_source(input, &args.column)?;

    // 4. Extract and map every row
    let pipeline = RowPipeline::new(AttributeExtractor::new(), ColumnMapper::new(OutputSchema::form2()));
    let (table, summary) = pipeline.run(&*source);

    if table.is_empty() {
        tracing::warn!("No descriptions found in {}; the report will only have a header row", input.display());
    }

    // 5. Write the report
    let writer = ReportWriter::new(&output)?;
    let path = writer.save_table(&table)?;
    if args.metadata {
        writer.save_metadata(&table, &summary, &source.label())?;
    }

    tracing::info!(
        "Done. {} records written to {} ({} blank rows skipped, {} rows with errors)",
        summary.records,
        path.display(),
        summary.skipped,
        summary.faulted
    );
    Ok(())
}

/// `<dir>/<stem>_form2.xlsx` for an input at `<dir>/<stem>.<ext>`.
fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report".to_string());
    input.with_file_name(format!("{}_form2.xlsx", stem))
}

fn print_columns(schema: &OutputSchema) {
    for (i, column) in schema.columns().iter().enumerate() {
        let aliases = schema::synonyms_for(column);
        if aliases.is_empty() {
            println!("{:>2}. {}", i + 1, column);
        } else {
            println!("{:>2}. {} (aliases: {})", i + 1, column, aliases.join(", "));
        }
    }
}

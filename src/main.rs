use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use sheetprep::cleaner::TableCleaner;
use sheetprep::config::PrepConfig;
use sheetprep::error::{PrepError, PrepResult};
use sheetprep::exporter::{self, ExportOptions};
use sheetprep::loader::{self, LoadOptions};
use sheetprep::logging;
use sheetprep::table::{ColumnSelection, MinLength};

#[derive(Parser)]
#[command(name = "sheetprep")]
#[command(about = "Clean spreadsheet data and export it as delimited text")]
struct Cli {
    /// Input file (.xlsx, .xlsm, .xlsb, .xls, .ods, .csv, .txt)
    input: PathBuf,

    /// Output file (optional, defaults to <input>_prepared.txt)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Columns to keep, in output order: header names or zero-based
    /// indices, comma-separated. All columns when omitted.
    #[arg(short, long, value_delimiter = ',')]
    columns: Option<Vec<String>>,

    /// Minimum character count for the first output column; shorter rows
    /// are dropped. 0 disables the filter.
    #[arg(short, long)]
    min_length: Option<i64>,

    /// Output delimiter character
    #[arg(short, long)]
    delimiter: Option<char>,

    /// Sheet name to read from a workbook (first sheet by default)
    #[arg(short, long)]
    sheet: Option<String>,

    /// Optional TOML config file with default delimiter and minimum length
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if let Err(err) = run(&cli) {
        error!("{}", err.user_message());
        return Err(err.into());
    }
    Ok(())
}

fn run(cli: &Cli) -> PrepResult<()> {
    let config = match &cli.config {
        Some(path) => {
            let mut config = PrepConfig::load_from_file(path)?;
            config.apply_env();
            config
        }
        None => PrepConfig::load_from_env(),
    };

    let load_options = LoadOptions {
        sheet: cli.sheet.clone(),
    };
    let table = loader::load_table(&cli.input, &load_options)?;

    let selection = match cli.columns.as_deref() {
        Some(columns) => ColumnSelection::resolve(columns, &table)?,
        None => ColumnSelection::identity(table.column_count()),
    };
    let min_length = MinLength::new(cli.min_length.unwrap_or(config.cleaning.min_length))?;

    let cleaner = TableCleaner::new();
    let (cleaned, summary) = cleaner.clean(&table, &selection, min_length)?;
    println!("{}", summary.summary());

    let delimiter = match cli.delimiter {
        Some(c) if c.is_ascii() => c as u8,
        Some(c) => {
            return Err(PrepError::configuration(format!(
                "delimiter must be a single ASCII character, got '{}'",
                c
            )))
        }
        None => config.delimiter_byte()?,
    };

    let output_path = cli.output.clone().unwrap_or_else(|| {
        let stem = cli
            .input
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "output".to_string());
        cli.input.with_file_name(format!("{}_prepared.txt", stem))
    });

    exporter::export_table(&cleaned, &output_path, &ExportOptions { delimiter })?;
    info!("Done: {}", output_path.display());
    println!("Wrote prepared table to {}", output_path.display());
    Ok(())
}

use clap::{Args, Parser, Subcommand};
use csvcodectool::output::{ErrorResponse, SuccessResponse};
use csvcodectool::{CodecConfig, CsvCodecError, Delimiter, Table, TableExporter, TableImporter};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// CSV Codec - Import delimited text as typed tables and export tables as CSV/TSV
#[derive(Parser, Debug)]
#[command(name = "csvcodectool")]
#[command(about = "Import delimited text as typed tables and export tables back to CSV/TSV")]
#[command(
    version,
    after_help = "Import prints the table as JSON; errors are printed as JSON with an \"Error\" code.\nExport reads that JSON and writes CRLF-terminated UTF-8 text.\nSet RUST_LOG=debug to see detection decisions on stderr."
)]
struct Cli {
    /// Path to config file (default: /etc/csvcodec.conf)
    #[arg(short = 'c', long = "config", global = true)]
    config_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a delimited text file into a typed table
    Import(ImportArgs),
    /// Render a table JSON file as delimited text
    Export(ExportArgs),
}

#[derive(Args, Debug)]
struct ImportArgs {
    /// Path to CSV/TSV file
    #[arg(short = 'f', long = "filename")]
    filename: PathBuf,

    /// First row is data, generate column names A, B, ...
    #[arg(long = "no-header")]
    no_header: bool,

    /// Detect the file's character encoding instead of assuming UTF-8
    #[arg(long = "detect-charset")]
    detect_charset: bool,

    /// Number of rows sampled for delimiter detection (default: 10)
    #[arg(long = "confidence-rows")]
    confidence_rows: Option<usize>,
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Path to table JSON (as printed by import)
    #[arg(short = 'f', long = "filename")]
    filename: PathBuf,

    /// Field delimiter: comma or tab (default: tab)
    #[arg(short = 'd', long = "delimiter")]
    delimiter: Option<Delimiter>,

    /// Do not write the header row
    #[arg(long = "no-headers")]
    no_headers: bool,

    /// Output file (default: stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,
}

const DEFAULT_CONFIG: &str = "/etc/csvcodec.conf";

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let cli = Cli::parse();

    let result = load_config(cli.config_file.as_deref()).and_then(|config| match cli.command {
        Command::Import(args) => run_import(config, args),
        Command::Export(args) => run_export(config, args),
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("{}", ErrorResponse::from(&e).to_json());
            ExitCode::FAILURE
        }
    }
}

/// Priority: CLI args > config file > environment variables > defaults.
/// CLI overrides are applied by the subcommands.
fn load_config(config_file: Option<&Path>) -> Result<CodecConfig, CsvCodecError> {
    if let Some(path) = config_file {
        if !path.exists() {
            return Err(CsvCodecError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        return CodecConfig::from_file(path);
    }

    let default_config = Path::new(DEFAULT_CONFIG);
    if default_config.exists() {
        match CodecConfig::from_file(default_config) {
            Ok(config) => return Ok(config),
            Err(e) => warn!("Ignoring {}: {}", DEFAULT_CONFIG, e),
        }
    }

    CodecConfig::from_env()
}

fn run_import(config: CodecConfig, args: ImportArgs) -> Result<(), CsvCodecError> {
    let mut options = config.import;
    if args.no_header {
        options.has_header_row = false;
    }
    if args.detect_charset {
        options.detect_charset = true;
    }
    if let Some(rows) = args.confidence_rows {
        options.confidence_rows = rows.max(1);
    }

    let data = fs::read(&args.filename)?;
    debug!(file = %args.filename.display(), bytes = data.len(), "read input");

    let outcome = TableImporter::new(options).import_bytes_detailed(&data)?;
    println!("{}", SuccessResponse::new(&outcome).to_json());
    Ok(())
}

fn run_export(config: CodecConfig, args: ExportArgs) -> Result<(), CsvCodecError> {
    let mut options = config.export;
    if let Some(delimiter) = args.delimiter {
        options.delimiter = delimiter;
    }
    if args.no_headers {
        options.include_headers = false;
    }

    let json = fs::read_to_string(&args.filename)?;
    let table: Table = serde_json::from_str(&json)?;
    let bytes = TableExporter::new(options).export_bytes(&table)?;

    match args.output {
        Some(path) => fs::write(path, &bytes)?,
        None => io::stdout().lock().write_all(&bytes)?,
    }
    Ok(())
}

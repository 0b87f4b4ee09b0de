use clap::{Parser, Subcommand};
use royalbit_roster::cli;
use royalbit_roster::error::RosterResult;
use royalbit_roster::writer::upload::DEFAULT_TIMEOUT_SECS;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Employee master-data import: spreadsheet → normalized JSON records.")]
#[command(long_about = "Roster - Employee spreadsheet import

COMMANDS:
  import    - First worksheet → JSON file or ingestion endpoint
  upload    - Send a workbook to the backend upload endpoint
  template  - Write a blank workbook with the import columns

EXAMPLES:
  roster template staff.xlsx
  roster import staff.xlsx data/employees.json
  roster import staff.xlsx https://hr.example.com/api/v1/employees --token $ROSTER_TOKEN
  roster upload staff.xlsx --endpoint https://hr.example.com/api/v1/employees/upload")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Import employees from the first worksheet of a workbook.

Every non-blank data row becomes one employee record. Date columns
(Joint Date, Contract End date, Date of Birth) are normalized to
YYYY-MM-DD; Gender is lower-cased. Each record carries one education
entry and empty training/attendance/leave lists.

OUTPUT TARGET:
  A file path writes a pretty-printed JSON array.
  An http:// or https:// URL POSTs the JSON array to that endpoint.

EXAMPLES:
  roster import staff.xlsx employees.json
  roster import staff.xlsx http://localhost:8080/api/v1/employees")]
    /// Import employees from a workbook
    Import {
        /// Path to workbook (.xlsx, .xls, .xlsb, .ods)
        input: PathBuf,

        /// Output JSON file path or ingestion endpoint URL
        output: String,

        /// Bearer token for endpoint targets
        #[arg(long, env = "ROSTER_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// Request timeout in seconds for endpoint targets
        #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
        timeout: u64,

        /// Show verbose import steps
        #[arg(short, long)]
        verbose: bool,
    },

    #[command(long_about = "Upload a workbook to the backend import endpoint.

The file is sent as multipart field 'file'. Only .xlsx and .xls files are
accepted; anything else is rejected before contacting the server.
On success the number of imported employees is reported.")]
    /// Upload a workbook to the backend
    Upload {
        /// Path to workbook (.xlsx or .xls)
        file: PathBuf,

        /// Upload endpoint URL
        #[arg(short, long, env = "ROSTER_UPLOAD_URL")]
        endpoint: String,

        /// Bearer token
        #[arg(long, env = "ROSTER_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// Request timeout in seconds
        #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
        timeout: u64,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Write a blank import template (.xlsx)
    Template {
        /// Output workbook path
        output: PathBuf,
    },
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Commands::Import { verbose, .. } | Commands::Upload { verbose, .. } => *verbose,
            Commands::Template { .. } => false,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "royalbit_roster=debug"
    } else {
        "royalbit_roster=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> RosterResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.command.verbose());

    match cli.command {
        Commands::Import {
            input,
            output,
            token,
            timeout,
            verbose,
        } => cli::import(input, output, token, timeout, verbose),

        Commands::Upload {
            file,
            endpoint,
            token,
            timeout,
            verbose: _,
        } => cli::upload(file, endpoint, token, timeout),

        Commands::Template { output } => cli::template(output),
    }
}

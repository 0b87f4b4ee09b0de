//! Roster API Server binary
//!
//! Backend ingestion API for employee spreadsheets.

use clap::Parser;
use royalbit_roster::api::{run_api_server, ApiConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "roster-server")]
#[command(version)]
#[command(author = "RoyalBit Inc. <admin@royalbit.ca>")]
#[command(about = "Roster API Server - employee spreadsheet ingestion")]
#[command(long_about = r#"
Roster API Server

Endpoints:
  - POST /api/v1/employees/upload - Import a spreadsheet (multipart field 'file')
  - POST /api/v1/employees        - Ingest a JSON array of employee records
  - GET  /api/v1/employees        - List imported employees

Additional endpoints:
  - GET  /health                  - Health check
  - GET  /version                 - Server version info
  - GET  /                        - API documentation

Example usage:
  roster-server                                  # Start on localhost:8080
  roster-server --host 0.0.0.0 --port 3000 --store data/employees.json

  curl -X POST http://localhost:8080/api/v1/employees/upload \
    -H "Authorization: Bearer $ROSTER_API_TOKEN" \
    -F "file=@staff.xlsx"
"#)]
struct Args {
    /// Host address to bind to (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "ROSTER_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "ROSTER_PORT")]
    port: u16,

    /// Bearer token required on /api/v1/* (open when unset)
    #[arg(long, env = "ROSTER_API_TOKEN", hide_env_values = true)]
    api_token: Option<String>,

    /// JSON file mirroring the employee store
    #[arg(long, env = "ROSTER_STORE")]
    store: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "royalbit_roster=info,roster_server=info,tower_http=info".into()),
        )
        .init();

    let config = ApiConfig {
        host: args.host,
        port: args.port,
        api_token: args.api_token,
        store_path: args.store,
    };

    run_api_server(config).await
}

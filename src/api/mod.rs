//! Roster API Server module
//!
//! Backend ingestion endpoints for spreadsheet uploads and record submissions.
//! Run with `roster-server`.

pub mod error;
pub mod handlers;
pub mod server;
pub mod store;

pub use server::{build_router, run_api_server, ApiConfig, AppState};
pub use store::EmployeeStore;

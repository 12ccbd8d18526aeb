//! # Kintai - attendance client
//!
//! A command-line client for an attendance-tracking backend.
//!
//! ## Features
//!
//! - **Clock-in / Clock-out**: office or remote, with a worked-time summary
//! - **Edit Window**: today's clock-in can be corrected for 30 minutes
//! - **Reconciliation**: the local cache always yields to the server's view
//! - **History**: monthly attendance with work, break and overtime totals
//! - **Schedules**: plan next month day by day and submit it
//! - **Requests**: correction, holiday and overtime requests
//! - **Locations**: register work locations and their hours
//!
//! ## Usage
//!
//! ```rust,no_run
//! use kintai::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod db;
pub mod libs;

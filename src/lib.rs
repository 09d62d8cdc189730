//! Recruit - a command-line recruitment ledger
//!
//! This library provides the core functionality for Recruit, including:
//! - The interview pipeline: stages, transitions, SLA flags and board views
//! - Data models for job openings, applicants and offers
//! - Database operations, migrations and starter fixtures
//! - Repository layer for data access
//! - CLI command parsing and execution
//!
//! # Example
//!
//! ```no_run
//! use recruit::cli::run;
//!
//! fn main() {
//!     if let Err(e) = run() {
//!         eprintln!("Error: {}", e);
//!         std::process::exit(1);
//!     }
//! }
//! ```

pub mod db;
pub mod models;
pub mod pipeline;
pub mod repo;
pub mod cli;
pub mod utils;

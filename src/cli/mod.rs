//! CLI module for the NFL Predictions API
//!
//! - `serve`: run the HTTP server

pub mod serve;

use clap::{Parser, Subcommand};

/// NFL Predictions API - game predictions and trained model packages over HTTP
#[derive(Parser)]
#[command(name = "nfl-predictions-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve(serve::ServeArgs),
}

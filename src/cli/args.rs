//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::config::DEFAULT_SEED_COUNT;

/// Usuarios service - user registry HTTP API
#[derive(Parser, Debug)]
#[command(name = "usuarios-service")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Run database migrations
    Migrate(MigrateArgs),

    /// Insert generated sample users
    Seed(SeedArgs),
}

/// Arguments for the serve command; unset values come from the environment config
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

/// Migration actions
#[derive(Subcommand, Debug)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset and re-run all migrations
    Fresh,
}

/// Arguments for the seed command
#[derive(Parser, Debug)]
pub struct SeedArgs {
    /// Number of users to generate
    #[arg(short, long, default_value_t = DEFAULT_SEED_COUNT)]
    pub count: u32,
}

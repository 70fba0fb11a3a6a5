//! Main CLI application structure

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::shape_cmd;
use crate::storage::{Config, Project};

#[derive(Parser)]
#[command(name = "polygons")]
#[command(author, version, about = "Validated rectangles and squares with JSON and CSV persistence")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the global config, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new polygons project
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,
    },

    /// Manage rectangles
    #[command(subcommand)]
    Rect(shape_cmd::RectCommands),

    /// Manage squares
    #[command(subcommand)]
    Square(shape_cmd::SquareCommands),
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let format = match cli.format {
        Some(format) => format,
        None => Config::load()?.global.default_format,
    };
    let output = Output::new(format, cli.verbose);

    output.verbose("polygons starting");

    match cli.command {
        Commands::Init { path } => {
            output.verbose_ctx("init", &format!("Initializing project at: {}", path));
            let project = Project::init(&path)?;
            output.verbose_ctx(
                "init",
                &format!("Created config at: {}", project.project_dir().join("config.toml").display()),
            );
            output.success(&format!(
                "Initialized polygons project at {}",
                project.root().display()
            ));
        }

        Commands::Rect(cmd) => shape_cmd::run_rect(cmd, &output)?,
        Commands::Square(cmd) => shape_cmd::run_square(cmd, &output)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}

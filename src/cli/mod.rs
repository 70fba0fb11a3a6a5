//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Command Groups
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Core | Project setup | `init` |
//! | Rectangle | Rectangle collection | `rect add 4 6`, `rect list`, `rect update 1 --set x=2` |
//! | Square | Square collection | `square add 5`, `square render`, `square export-csv` |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output on stderr:
//! ```bash
//! polygons --verbose rect list
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod shape_cmd;

pub use app::{Cli, Commands, run};
pub use output::{Output, OutputFormat};

//! # Storage Layer
//!
//! Persistence for shape collections using flat, single-file formats.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Rectangles | JSON array of objects | `{data_dir}/Rectangle.json` |
//! | Squares | JSON array of objects | `{data_dir}/Square.json` |
//! | CSV exports | one record per line, no header | `{data_dir}/{TypeName}.csv` |
//! | Config | TOML | `.polygons/config.toml` |
//!
//! Writes go through a temp file and an atomic rename under an exclusive
//! `fs2` lock; reads take a shared lock.
//!
//! ## Key Types
//!
//! - [`Project`] - Entry point for accessing a polygons project
//! - [`ShapeStore`] - Read/write shape collections as JSON or CSV
//! - [`Config`] - Project and global configuration

pub mod codec;
mod store;
mod config;
mod project;

pub use codec::CodecError;
pub use store::ShapeStore;
pub use config::{Config, ConfigError, GlobalConfig, OutputFormat, ProjectConfig};
pub use project::{Project, ProjectError};

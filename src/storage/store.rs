//! File storage for shape collections
//!
//! Each shape type owns two files in the store directory, named after the
//! type: `Rectangle.json` / `Rectangle.csv`, `Square.json` / `Square.csv`.
//! Saving overwrites the whole file. A missing file loads as an empty list.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use super::codec;
use crate::domain::{IdGenerator, Shape};

/// Store for shape collections in a single directory
pub struct ShapeStore {
    dir: PathBuf,
}

impl ShapeStore {
    /// Creates a store rooted at the given directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the JSON file for `S`
    pub fn json_path<S: Shape>(&self) -> PathBuf {
        self.dir.join(format!("{}.json", S::TYPE_NAME))
    }

    /// Path of the CSV file for `S`
    pub fn csv_path<S: Shape>(&self) -> PathBuf {
        self.dir.join(format!("{}.csv", S::TYPE_NAME))
    }

    /// Writes `shapes` to `<TypeName>.json`; `None` writes an empty array
    pub fn save<S: Shape>(&self, shapes: Option<&[S]>) -> Result<()> {
        let dicts = shapes.map(codec::to_dicts);
        let text = codec::to_json_string(dicts.as_deref())
            .with_context(|| format!("Failed to serialize {} list", S::TYPE_NAME))?;

        write_atomic(&self.json_path::<S>(), &text)
    }

    /// Reads `<TypeName>.json`, or an empty list if it does not exist
    pub fn load<S: Shape>(&self, ids: &IdGenerator) -> Result<Vec<S>> {
        let path = self.json_path::<S>();
        let Some(text) = read_locked(&path)? else {
            return Ok(Vec::new());
        };

        let dicts = codec::from_json_string(Some(&text))
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        codec::from_dicts(ids, &dicts)
            .with_context(|| format!("Invalid {} in {}", S::TYPE_NAME, path.display()))
    }

    /// Writes `shapes` to `<TypeName>.csv`; `None` writes an empty file
    pub fn save_csv<S: Shape>(&self, shapes: Option<&[S]>) -> Result<()> {
        let text = codec::to_csv_string(shapes.unwrap_or_default());
        write_atomic(&self.csv_path::<S>(), &text)
    }

    /// Reads `<TypeName>.csv`, or an empty list if it does not exist
    pub fn load_csv<S: Shape>(&self, ids: &IdGenerator) -> Result<Vec<S>> {
        let path = self.csv_path::<S>();
        let Some(text) = read_locked(&path)? else {
            return Ok(Vec::new());
        };

        let dicts = codec::from_csv_string::<S>(&text)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        codec::from_dicts(ids, &dicts)
            .with_context(|| format!("Invalid {} in {}", S::TYPE_NAME, path.display()))
    }
}

/// Reads a whole file under a shared lock; `None` if the file does not exist
fn read_locked(path: &Path) -> Result<Option<String>> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to open {}", path.display()));
        }
    };

    file.lock_shared()
        .with_context(|| format!("Failed to acquire read lock on {}", path.display()))?;

    let mut text = String::new();
    file.read_to_string(&mut text)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    // Lock is released when file is dropped
    Ok(Some(text))
}

/// Replaces `path` with `content` via a locked temp file and rename
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }

    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

        file.lock_exclusive()
            .with_context(|| format!("Failed to acquire write lock on {}", temp_path.display()))?;

        let mut writer = BufWriter::new(&file);
        writer
            .write_all(content.as_bytes())
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        writer
            .flush()
            .with_context(|| format!("Failed to flush {}", temp_path.display()))?;
    }

    fs::rename(&temp_path, path).with_context(|| {
        format!(
            "Failed to rename {} to {}",
            temp_path.display(),
            path.display()
        )
    })?;

    Ok(())
}

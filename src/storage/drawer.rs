//! Drawer storage
//!
//! A drawer is a plain text file with one record per line (see
//! [`crate::domain::codec`]). Every operation scans the whole file and
//! every mutation rewrites it:
//!
//! - the new content is written to `<drawer>.tmp` and renamed over the
//!   drawer, so a failed write never leaves a half-written drawer
//! - access is serialized through a sidecar `<drawer>.lock` file, shared
//!   for reads and exclusive for the whole read-modify-write of a mutation
//!
//! Names ending in `.tmp` or `.lock` are reserved for these sidecars and
//! cannot be opened as drawers. Processes that edit a drawer without going
//! through this store are not guarded by the lock.

use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;
use thiserror::Error;

use crate::domain::{codec, Record, Value};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Drawer not found: {0}")]
    NotFound(PathBuf),

    #[error("Not a drawer file: {0}")]
    InvalidPath(PathBuf),

    #[error("Record '{name}' not found in {}", drawer.display())]
    KeyNotFound { name: String, drawer: PathBuf },
}

/// Creates an empty file if none exists, leaving existing content alone
pub fn create_file(path: &Path) -> Result<()> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .with_context(|| format!("Failed to create drawer: {}", path.display()))?;
    Ok(())
}

/// Returns true if a regular file exists at the path
pub fn file_exists(path: &Path) -> bool {
    path.is_file()
}

/// Path of a sibling file named `<file name>.<suffix>`
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}

/// Store for the records of a single drawer file
#[derive(Debug, Clone)]
pub struct DrawerStore {
    path: PathBuf,
}

impl DrawerStore {
    pub(crate) const LOCK_SUFFIX: &'static str = "lock";
    pub(crate) const TEMP_SUFFIX: &'static str = "tmp";

    /// Returns true if the path has a lock or temp file suffix
    ///
    /// Such names belong to another drawer's sidecar files and cannot be
    /// opened as drawers.
    pub fn is_reserved(path: &Path) -> bool {
        path.extension()
            .is_some_and(|ext| ext == Self::LOCK_SUFFIX || ext == Self::TEMP_SUFFIX)
    }

    /// Opens an existing drawer file
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if Self::is_reserved(&path) {
            return Err(StoreError::InvalidPath(path).into());
        }
        if !path.exists() {
            return Err(StoreError::NotFound(path).into());
        }
        if !path.is_file() {
            return Err(StoreError::InvalidPath(path).into());
        }

        Ok(Self { path })
    }

    /// Opens a drawer file, creating it empty if it does not exist
    ///
    /// The parent directory must already exist.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if Self::is_reserved(&path) {
            return Err(StoreError::InvalidPath(path).into());
        }
        if !path.exists() {
            create_file(&path)?;
            log::debug!("Created drawer {}", path.display());
        }

        Self::open(path)
    }

    /// Returns the path to the drawer file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the path to the drawer's lock file
    pub fn lock_path(&self) -> PathBuf {
        sibling(&self.path, Self::LOCK_SUFFIX)
    }

    fn temp_path(&self) -> PathBuf {
        sibling(&self.path, Self::TEMP_SUFFIX)
    }

    /// Acquires the drawer lock; released when the returned file is dropped
    fn lock(&self, exclusive: bool) -> Result<File> {
        let lock_path = self.lock_path();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .with_context(|| format!("Failed to open lock file: {}", lock_path.display()))?;

        if exclusive {
            file.lock_exclusive()
                .context("Failed to acquire write lock on drawer")?;
        } else {
            file.lock_shared()
                .context("Failed to acquire read lock on drawer")?;
        }

        Ok(file)
    }

    /// Reads every non-blank line of the drawer
    fn read_lines(&self) -> Result<Vec<String>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(self.path.clone()).into());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to open drawer: {}", self.path.display()));
            }
        };

        let reader = BufReader::new(file);
        let mut lines = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.with_context(|| {
                format!(
                    "Failed to read line {} of {}",
                    line_num + 1,
                    self.path.display()
                )
            })?;

            if line.trim().is_empty() {
                continue;
            }

            lines.push(line);
        }

        Ok(lines)
    }

    /// Replaces the drawer content with the given lines
    fn write_lines(&self, lines: &[String]) -> Result<()> {
        let temp_path = self.temp_path();

        let written = (|| -> Result<()> {
            let file = File::create(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            let mut writer = BufWriter::new(&file);
            for line in lines {
                writeln!(writer, "{}", line).context("Failed to write record")?;
            }
            writer.flush().context("Failed to flush drawer")?;
            drop(writer);

            file.sync_all().context("Failed to sync drawer")?;
            Ok(())
        })();

        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }

        // Atomic rename
        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }

    /// Inserts a record, replacing any record with the same name
    ///
    /// The record moves to the end of the drawer; all other lines keep
    /// their order.
    pub fn upsert(&self, record: &Record) -> Result<()> {
        let encoded = codec::encode(record)
            .with_context(|| format!("Failed to encode record '{}'", record.name()))?;

        let _lock = self.lock(true)?;

        let mut lines = self.read_lines()?;
        let before = lines.len();
        lines.retain(|line| codec::line_name(line) != record.name());
        let replaced = before - lines.len();

        lines.push(encoded);
        self.write_lines(&lines)?;

        log::debug!(
            "Upserted '{}' into {} ({} value(s), replaced {} line(s))",
            record.name(),
            self.path.display(),
            record.len(),
            replaced
        );

        Ok(())
    }

    /// Looks up a record by name
    ///
    /// Returns the first matching record, or `None` when no line has the name.
    pub fn get(&self, name: &str) -> Result<Option<Record>> {
        let _lock = self.lock(false)?;

        let found = self
            .read_lines()?
            .iter()
            .find(|line| codec::line_name(line) == name)
            .map(|line| codec::decode(line));

        Ok(found)
    }

    /// Looks up a record by name, returning an empty record when absent
    ///
    /// A stored record with no values and a missing record look the same
    /// here; use [`DrawerStore::get`] to tell them apart.
    pub fn take(&self, name: &str) -> Result<Record> {
        Ok(self.get(name)?.unwrap_or_else(|| Record::empty(name)))
    }

    /// Reads a single value of a record
    pub fn read(&self, name: &str, index: usize) -> Result<Value> {
        let record = self.get(name)?.ok_or_else(|| StoreError::KeyNotFound {
            name: name.to_string(),
            drawer: self.path.clone(),
        })?;

        let value = record.get(index)?;
        Ok(value.clone())
    }

    /// Removes a record by name
    ///
    /// Returns whether a record was removed. Removing a name that is not
    /// stored leaves the drawer untouched.
    pub fn remove(&self, name: &str) -> Result<bool> {
        let _lock = self.lock(true)?;

        let mut lines = self.read_lines()?;
        let before = lines.len();
        lines.retain(|line| codec::line_name(line) != name);

        let removed = lines.len() != before;
        if removed {
            self.write_lines(&lines)?;
            log::debug!("Removed '{}' from {}", name, self.path.display());
        }

        Ok(removed)
    }

    /// Returns true if a record with the name is stored
    pub fn contains(&self, name: &str) -> Result<bool> {
        Ok(self.get(name)?.is_some())
    }

    /// Reads every record in file order
    pub fn records(&self) -> Result<Vec<Record>> {
        let _lock = self.lock(false)?;

        Ok(self
            .read_lines()?
            .iter()
            .map(|line| codec::decode(line))
            .collect())
    }

    /// Returns record names in file order
    pub fn names(&self) -> Result<Vec<String>> {
        let _lock = self.lock(false)?;

        Ok(self
            .read_lines()?
            .iter()
            .map(|line| codec::line_name(line).to_string())
            .collect())
    }

    /// Rewrites the drawer keeping only the first line for each name
    ///
    /// Returns the number of records kept.
    pub fn compact(&self) -> Result<usize> {
        let _lock = self.lock(true)?;

        let lines = self.read_lines()?;
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(lines.len());

        for line in lines {
            let name = codec::line_name(&line).to_string();
            if seen.insert(name.clone()) {
                kept.push(line);
            } else {
                log::warn!(
                    "Dropping duplicate record '{}' from {}",
                    name,
                    self.path.display()
                );
            }
        }

        self.write_lines(&kept)?;
        Ok(kept.len())
    }
}

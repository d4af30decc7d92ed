//! Rooms and the base directory
//!
//! A [`Room`] is a directory of drawers. Connecting gives the base room;
//! entering a name gives a subdirectory of the base. Every room carries
//! its own absolute paths, nothing here touches the process working
//! directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use super::drawer::{DrawerStore, StoreError};

#[derive(Debug, Error)]
pub enum RoomError {
    #[error("Directory not found: {0}")]
    NotFound(PathBuf),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Resolves a directory to an absolute path, optionally creating it
pub fn resolve(path: &Path, create: bool) -> Result<PathBuf> {
    let absolute = std::path::absolute(path)
        .with_context(|| format!("Failed to resolve path: {}", path.display()))?;

    if absolute.exists() {
        if !absolute.is_dir() {
            return Err(RoomError::NotADirectory(absolute).into());
        }
    } else if create {
        fs::create_dir_all(&absolute)
            .with_context(|| format!("Failed to create directory: {}", absolute.display()))?;
        log::debug!("Created directory {}", absolute.display());
    } else {
        return Err(RoomError::NotFound(absolute).into());
    }

    Ok(absolute)
}

/// A directory holding drawers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    base: PathBuf,
    path: PathBuf,
}

impl Room {
    /// Connects to a base directory
    pub fn connect(base: impl AsRef<Path>, create: bool) -> Result<Self> {
        let base = resolve(base.as_ref(), create)?;
        log::debug!("Connected to {}", base.display());

        Ok(Self {
            path: base.clone(),
            base,
        })
    }

    /// Enters a room below the base directory
    ///
    /// Names are resolved against the base, not the current room.
    pub fn enter(&self, name: impl AsRef<Path>, create: bool) -> Result<Self> {
        let path = resolve(&self.base.join(name), create)?;
        log::debug!("Entered room {}", path.display());

        Ok(Self {
            base: self.base.clone(),
            path,
        })
    }

    /// Returns to the base room, or `None` if already there
    pub fn exit(&self) -> Option<Self> {
        if self.is_base() {
            return None;
        }

        Some(Self {
            base: self.base.clone(),
            path: self.base.clone(),
        })
    }

    /// Returns the base directory
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Returns this room's directory
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if this is the base room
    pub fn is_base(&self) -> bool {
        self.path == self.base
    }

    /// Returns the room's name relative to the base (empty for the base)
    pub fn name(&self) -> String {
        self.path
            .strip_prefix(&self.base)
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| self.path.display().to_string())
    }

    /// Opens a drawer in this room, optionally creating an empty one
    pub fn open(&self, drawer: impl AsRef<Path>, create: bool) -> Result<DrawerStore> {
        let path = self.path.join(drawer);

        if create {
            DrawerStore::create(path)
        } else {
            DrawerStore::open(path)
        }
    }

    /// Deletes a drawer and its lock file
    pub fn destroy(&self, drawer: impl AsRef<Path>) -> Result<()> {
        let store = DrawerStore::open(self.path.join(drawer))?;
        let lock_path = store.lock_path();

        fs::remove_file(store.path())
            .with_context(|| format!("Failed to remove drawer: {}", store.path().display()))?;

        if lock_path.exists() {
            fs::remove_file(&lock_path).with_context(|| {
                format!("Failed to remove lock file: {}", lock_path.display())
            })?;
        }

        log::debug!("Destroyed drawer {}", store.path().display());
        Ok(())
    }

    /// Lists drawer file names in this room, sorted
    pub fn drawers(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self
            .entries()?
            .into_iter()
            .filter(|(path, _)| path.is_file() && !DrawerStore::is_reserved(path))
            .map(|(_, name)| name)
            .collect();

        names.sort();
        Ok(names)
    }

    /// Lists room names below the base directory, sorted
    pub fn rooms(&self) -> Result<Vec<String>> {
        let base = Self {
            base: self.base.clone(),
            path: self.base.clone(),
        };

        let mut names: Vec<String> = base
            .entries()?
            .into_iter()
            .filter(|(path, _)| path.is_dir())
            .map(|(_, name)| name)
            .collect();

        names.sort();
        Ok(names)
    }

    fn entries(&self) -> Result<Vec<(PathBuf, String)>> {
        let entries = fs::read_dir(&self.path)
            .with_context(|| format!("Failed to read directory: {}", self.path.display()))?;

        let mut found = Vec::new();
        for entry in entries {
            let entry = entry
                .with_context(|| format!("Failed to read directory: {}", self.path.display()))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            found.push((entry.path(), name));
        }

        Ok(found)
    }
}

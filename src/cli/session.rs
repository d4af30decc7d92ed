//! Resolved locations for a single CLI invocation

use std::path::PathBuf;

use anyhow::Result;

use crate::storage::{Config, DrawerStore, Room};

/// Base directory, room and creation policy after applying flags,
/// environment and config
#[derive(Debug, Clone)]
pub struct Session {
    base: PathBuf,
    room: Option<String>,
    create: bool,
}

impl Session {
    pub fn new(
        base: Option<PathBuf>,
        room: Option<String>,
        create: bool,
        config: &Config,
    ) -> Self {
        Self {
            base: base.unwrap_or_else(|| config.base_dir()),
            room: room.or_else(|| config.default_room.clone()),
            create: create || config.create_missing,
        }
    }

    /// Connects to the base room
    pub fn base_room(&self) -> Result<Room> {
        Room::connect(&self.base, self.create)
    }

    /// Connects to the selected room (the base room when none is selected)
    pub fn room(&self) -> Result<Room> {
        let base = self.base_room()?;

        match &self.room {
            Some(name) => base.enter(name, self.create),
            None => Ok(base),
        }
    }

    /// Opens a drawer in the selected room
    pub fn drawer(&self, name: &str) -> Result<DrawerStore> {
        self.room()?.open(name, self.create)
    }
}

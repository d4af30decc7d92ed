//! # Storage Layer
//!
//! Persistence for Locker: rooms are directories, drawers are text files.
//!
//! ## Layout
//!
//! ```text
//! <base>/
//! ├── settings.txt          # A drawer in the base room
//! └── players/              # A room
//!     ├── alice.txt         # A drawer
//!     └── alice.txt.lock    # Lock file (created on first access)
//! ```
//!
//! ## Concurrency Safety
//!
//! - [`DrawerStore`] serializes access with a sidecar lock file (`fs2`)
//! - All writes are atomic (temp file + rename)
//!
//! ## Key Types
//!
//! - [`Room`] - Resolves the base directory, rooms and drawer files
//! - [`DrawerStore`] - Upsert, lookup and remove records in one drawer
//! - [`Config`] - User configuration

mod config;
mod drawer;
mod room;

pub use config::{Config, ConfigError, OutputFormat};
pub use drawer::{create_file, file_exists, DrawerStore, StoreError};
pub use room::{resolve, Room, RoomError};

//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Command Groups
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Record | Read and write records | `put`, `take`, `read`, `remove`, `list`, `compact` |
//! | Drawer | Drawer files in a room | `drawer new`, `drawer list`, `drawer destroy` |
//! | Room | Rooms below the base | `room new`, `room list` |
//!
//! ## Locations
//!
//! `--base` (or `LOCKER_BASE`) picks the base directory, `--room` (or
//! `LOCKER_ROOM`) a room below it, and `--create` creates whatever is
//! missing. Unset values fall back to the config file.
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output, including storage logs:
//! ```bash
//! locker --verbose take stats.txt alice
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod session;
mod record_cmd;
mod drawer_cmd;
mod room_cmd;

pub use app::{Cli, Commands, run};
pub use output::{Output, OutputFormat};
pub use session::Session;

//! Locker - A locker-room record store backed by plain text files
//!
//! Records (a name plus an ordered list of text, integer, float or boolean
//! values) are kept one per line in drawer files, which live in room
//! directories below a base directory.
//!
//! ```no_run
//! use locker::{Record, Room, Value};
//!
//! # fn main() -> anyhow::Result<()> {
//! let room = Room::connect("data", true)?.enter("players", true)?;
//! let drawer = room.open("stats.txt", true)?;
//!
//! drawer.upsert(&Record::new("alice", vec![Value::from(30), Value::from(true)]))?;
//! let alice = drawer.take("alice")?;
//! assert_eq!(alice.get(0)?, &Value::from(30));
//! # Ok(())
//! # }
//! ```

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{Record, RecordError, Value};
pub use storage::{DrawerStore, Room, StoreError};

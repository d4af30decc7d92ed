//! Domain models for Locker
//!
//! Values, records and the line codec, without any I/O concerns.

mod value;
mod record;
pub mod codec;

pub use value::Value;
pub use record::{Record, RecordError};
pub use codec::CodecError;

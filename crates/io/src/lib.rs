//! PTB IO
//!
//! Canonical binary encoding primitives: a little-endian writer and reader
//! with ULEB128 length prefixes, and the [`Serializable`] trait every
//! transaction object implements.

mod binary_writer;
mod error;
mod memory_reader;
pub mod serializable;

pub use binary_writer::BinaryWriter;
pub use error::{IoError, IoResult};
pub use memory_reader::MemoryReader;
pub use serializable::{Serializable, SerializableExt};

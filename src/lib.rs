//! Incremental MP4/ISOBMFF box reader.
//!
//! Frames and traverses length-prefixed, type-tagged, nested boxes directly
//! out of a byte buffer that may still be growing (e.g. a network append).
//! "Not enough bytes yet" is a soft outcome (`Ok(None)` from the top-level
//! entry points) distinct from malformed data ([`ParseError`]); callers poll
//! [`BoxReader::start_top_level_box`] to learn how many bytes to wait for,
//! then hand the full box to [`BoxReader::read_top_level_box`] and pull typed
//! payloads out through the [`BoxDecode`] contract.

pub mod boxes;
pub mod buffer;
pub mod known_boxes;
pub mod parser;
pub mod reader;

pub use boxes::{BoxHeader, FourCC};
pub use buffer::BufferReader;
pub use known_boxes::is_valid_top_level_box;
pub use parser::{ParseError, Result, read_box_header};
pub use reader::{BoxDecode, BoxReader};

//! # quarry-chunking
//!
//! Splits raw document text into bounded, ordered, trimmed chunks.
//!
//! ```text
//! paragraphs (blank lines, hard boundaries)
//! └── lines ("\n")
//!     └── sentences (". ", "! ", "? ")
//!         └── words (whitespace)
//!             └── fixed-stride slices (stride = max_size - overlap)
//! ```
//!
//! Each level greedily packs its segments up to `max_size`; a segment that
//! still does not fit is handed to the next level down.

pub mod separators;
pub mod splitter;
pub mod stride;

pub use splitter::{chunk, Chunker};

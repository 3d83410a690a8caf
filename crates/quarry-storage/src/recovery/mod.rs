//! Index recovery.

pub mod fts5_rebuild;

pub use fts5_rebuild::rebuild_fts5_index;

//! SQL for documents, chunks, and both search paths.

pub mod chunk_ops;
pub mod document_ops;
pub mod lexical_search;
pub mod vector_search;

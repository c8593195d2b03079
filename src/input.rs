//! Decoded documents handed to the importer.

pub mod document;

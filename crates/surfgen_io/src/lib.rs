//! I/O for the experiment generator: circuit text, layout and setup
//! files, and binary shot data.
//!
//! Compiled circuits travel as stim text, layouts and hardware setups as
//! JSON documents, and sampled measurement data as packed `.b8` files.
//! This crate owns all three formats so the core stays free of
//! filesystem concerns.

/// Packed binary shot data (.b8) reading, writing and reshaping.
pub mod b8;

/// JSON layout and setup documents.
pub mod layout_file;

/// Stim circuit text writing and parsing.
pub mod stim_text;

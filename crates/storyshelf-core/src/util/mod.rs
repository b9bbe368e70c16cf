//! Utility modules for file operations and path handling.
//!
//! # Modules
//!
//! - [`files`]: Async file discovery, reading and writing
//! - [`paths`]: Tilde expansion and traversal-safe path joining

pub mod files;
pub mod paths;

//! Keepsake Core
//!
//! Platform-agnostic core types, traits, and error handling for Keepsake.
//!
//! This crate provides the foundational building blocks shared by the
//! slideshow engine and the hosts that embed it.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `MemoryRecord`, `MemoryEntry`, `EntryType`, id newtypes
//! - **Core Traits**: `AudioBackend` (the platform audio capability)
//! - **Error Handling**: Unified `KeepsakeError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use keepsake_core::types::{EntryType, MemoryEntry, MemoryRecord};
//! use chrono::NaiveDate;
//!
//! let date = NaiveDate::from_ymd_opt(2021, 6, 12).unwrap();
//! let entry = MemoryEntry::photo(vec!["file:///photos/beach.jpg".to_string()], date)
//!     .with_caption("First trip to the beach");
//! let memory = MemoryRecord::new(entry, 3, 2021);
//!
//! assert_eq!(memory.entry.kind, EntryType::Photo);
//! assert_eq!(memory.entry.media_uris.len(), 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{KeepsakeError, Result};
pub use traits::AudioBackend;

pub use types::{AudioHandle, EntryId, EntryType, MemoryEntry, MemoryId, MemoryRecord};

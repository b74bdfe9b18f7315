//! Core domain model for sparkify.
//!
//! This crate defines the star-schema records (artists, songs, users, the
//! time dimension and the songplays fact table), the SQLite schema and the
//! conflict-tolerant statements used to load them, and the song catalog
//! lookup used to resolve songplay foreign keys.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod catalog;
pub mod error;
pub mod model;
pub mod schema;

pub use catalog::{InMemoryCatalog, SongCatalog, SongMatch};
pub use error::{Error, Result};

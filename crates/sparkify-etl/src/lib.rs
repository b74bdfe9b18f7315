//! ETL stages for sparkify.
//!
//! Discovers song metadata and event log files, transforms them into typed
//! star-schema rows, and loads them one file per transaction.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod discover;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod transform;

pub use config::Config;
pub use discover::discover_files;
pub use error::{EtlError, EtlResult};
pub use loader::{process_data, LoadSummary, Progress};
pub use pipeline::{run_pipeline, Domain, PipelineSummary};
pub use transform::{LogFileTransformer, SongFileTransformer, Transformer};

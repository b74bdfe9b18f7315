//! SQLite schema, load statements and the database handle.

pub mod db;
pub mod migrations;
pub mod statements;

pub use db::{Batch, Database, TableCounts};
pub use migrations::{CREATE_TABLE_QUERIES, DROP_TABLE_QUERIES, MIGRATIONS};
pub use statements::Statements;

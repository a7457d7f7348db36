//! Storage layer
//!
//! Uses SQLite (embedded) so the server needs no external services.

pub mod db;

pub use db::Database;

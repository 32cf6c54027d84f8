//! Modules layer - infrastructure behind the feature services
//!
//! Contains the storage backends (SQLite and JSON documents) and their traits.

pub mod storage;

//! Record Storage Module
//!
//! Durable, append-only persistence of survey responses.
//!
//! ## Core Concepts
//! - **Collection**: Every accepted response, kept in append order as one JSON array on disk.
//! - **Append**: Stamps a validated submission, reads the collection, pushes the record and
//!   rewrites the whole file through a temp file and rename.
//! - **Read**: Loads the collection; a missing, unreadable or malformed file reads as empty.
//! - **Write policy**: Appends are serialized by default. `WritePolicy::Unserialized` lets
//!   overlapping read-modify-write cycles race, in which case the last rename wins.

pub mod store;
pub mod types;

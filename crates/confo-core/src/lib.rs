//! Core types and trait definitions for the ConfoUP compliance backend.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod alert;
pub mod boxes;
pub mod document;
pub mod error;
pub mod profile;
pub mod store;
pub mod user;
pub mod validate;

pub use error::{Error, Result};

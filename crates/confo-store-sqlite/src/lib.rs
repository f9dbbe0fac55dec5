//! SQLite backend for the ConfoUP compliance store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated
//! thread without blocking the async runtime. That single worker thread also
//! serialises store operations, which is what makes each one atomic — no
//! partial write is ever observable from another request.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;

//! In-memory backend for the ConfoUP compliance store.
//!
//! The reference implementation of
//! [`ComplianceStore`](confo_core::store::ComplianceStore): plain vectors
//! behind a lock, linear scans, eager joins. Suitable for tests, demos, and
//! as the behavioural yardstick for the SQLite backend.

mod store;

pub mod seed;

pub use store::MemoryStore;

//! In-process storage adapter.
//!
//! Used when no database URL is configured and by the HTTP integration
//! tests. All tables sit behind one lock so multi-table reads, such as the
//! workspace statistics, observe a single snapshot.

mod store;

pub use store::InMemoryStore;

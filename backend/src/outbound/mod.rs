//! Driven adapters: storage back ends and credential hashing.

pub mod credentials;
pub mod memory;
pub mod persistence;

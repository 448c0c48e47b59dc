//! Bug tracker backend library.
//!
//! The crate follows a hexagonal layout: `domain` holds entities, policy and
//! use-case services behind ports, `inbound` adapts HTTP requests onto the
//! driving ports and `outbound` implements the driven ports for PostgreSQL,
//! in-process storage and credential hashing.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;

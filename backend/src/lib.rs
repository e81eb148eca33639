//! Inventory web application library.
//!
//! Layout follows a hexagonal split: `domain` holds types, ports and
//! use-cases; `inbound` adapts HTTP onto the driving ports; `outbound`
//! implements the driven ports over SQLite.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(feature = "test-support")]
pub mod test_support;

pub use domain::TraceId;
pub use middleware::Trace;

//! Networking modules for identity and market-data HTTP APIs.
//!
//! SYSTEM CONTEXT
//! ==============
//! `identity` talks to the hosted identity service and owns the persisted
//! session, `market` reads quotes, portfolios and news from the backend, and
//! `types` defines the shared wire schema.

pub mod identity;
pub mod market;
pub mod types;

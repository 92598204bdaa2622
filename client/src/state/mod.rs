//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `auth` holds the session gate. Page-local data lives in resources on the
//! pages themselves.

pub mod auth;

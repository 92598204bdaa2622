//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped data loading and delegates rendering details
//! to `components`. Access control lives in the route guard, not in pages.

pub mod dashboard;
pub mod home;
pub mod login;
pub mod portfolio;
pub mod profile;
pub mod register;
pub mod stock;

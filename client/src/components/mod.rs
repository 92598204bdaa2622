//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render shared page chrome while reading session and market
//! state handed down from pages.

pub mod quote_table;
pub mod source_badge;

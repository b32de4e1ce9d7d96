//! Serde helpers.

pub mod duration_ms;

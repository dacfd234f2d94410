//! Shared helper functions.

pub mod text;

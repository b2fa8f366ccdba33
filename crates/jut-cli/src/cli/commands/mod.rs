//! Command handlers.

pub mod display;

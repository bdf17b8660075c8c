//! Utility helpers shared across model and builder modules.

pub mod color;

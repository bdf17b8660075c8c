//! # feign
//!
//! Settings model and stylesheet generator for Feign voice overlays.
//!
//! A host assigns up to thirteen colored characters to members of a Discord
//! voice channel. This crate owns the typed application state, its
//! persistence in a browser-style key-value store (with migration of older
//! snapshots), the reconciliation rules between users and player slots, and
//! the pure layout + CSS compiler whose output is loaded by the streamkit
//! overlay.

pub mod consts;
pub mod css_builder;
pub mod io;
pub mod models;
pub mod state;
pub mod util;

//! Persistence, import/export, and file adapters.
//!
//! SYSTEM CONTEXT
//! ==============
//! `storage` abstracts the browser `localStorage` shape (string keys to string
//! values). `loaders` holds one typed parser per persisted slice, and
//! `app_state_io` composes them into whole-state load, save, export, and
//! import. `file` covers the checks around user-picked files.

pub mod app_state_io;
pub mod file;
pub mod loaders;
pub mod storage;

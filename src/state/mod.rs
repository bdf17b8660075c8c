//! State container, reconciliation, and the transforms the UI dispatches.
//!
//! SYSTEM CONTEXT
//! ==============
//! The store is the only owner of [`AppState`](crate::models::app_state::AppState).
//! Callers never mutate it in place; they dispatch a pure transform from the
//! previous state to the next one. The store then repairs player slots when
//! the user list changed and writes back every slice that differs.

pub mod actions;
pub mod reconcile;
pub mod store;

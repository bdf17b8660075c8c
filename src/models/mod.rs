//! Typed application state and its value types.
//!
//! SYSTEM CONTEXT
//! ==============
//! Everything here is plain data plus pure derivation helpers. Mutation goes
//! through `state::store`; persistence lives in `io`.

pub mod app_state;
pub mod channel;
pub mod discord_user;
pub mod feign_players;
pub mod table_settings;
pub mod view_settings;

/// Inline validation failure for a user-entered form field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("{field} is required")]
    Required { field: &'static str },
    #[error("{field} already exists")]
    AlreadyExists { field: &'static str },
    #[error("{field} must be numeric")]
    NotNumeric { field: &'static str },
    #[error("invalid voice channel URL")]
    InvalidUrl,
}

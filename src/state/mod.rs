//! Client-side session state.
//!
//! DESIGN
//! ======
//! Split by concern so each piece can be tested alone: `storage` is the raw
//! key/value area, `session_store` the typed token/profile view over it,
//! `auth` the login-state stream, `guilds` the managed-guild derivation, and
//! `session` the facade that composes them.

pub mod auth;
pub mod guilds;
pub mod session;
pub mod session_store;
pub mod storage;

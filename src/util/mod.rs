//! Utility helpers shared by the session core and the screens.
//!
//! SYSTEM CONTEXT
//! ==============
//! `oauth` is pure string handling for the provider round trip; `auth` adapts
//! the login-state stream to Leptos signals for route guards.

pub mod auth;
pub mod oauth;

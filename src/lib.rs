//! # guild-console
//!
//! Session and authorization core for the guild bot dashboard front end.
//! Runs in the browser as WASM (feature `hydrate`) and compiles natively for
//! SSR builds and tests, where browser-only paths are stubbed out.
//!
//! This crate owns the auth token and user profile for the current tab, the
//! request middleware that attaches the token and reacts to rejected
//! credentials, the replay-latest login-state stream, and the managed-guild
//! derivation used by the profile screen. Screens and routing live elsewhere
//! and talk to [`state::session::SessionFacade`].

pub mod config;
pub mod net;
pub mod state;
pub mod util;

#[cfg(feature = "hydrate")]
pub mod browser;

#[cfg(test)]
mod test_support;

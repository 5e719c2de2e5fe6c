//! Networking modules for the dashboard API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` defines the request model and the send capability, `interceptor`
//! decorates a sender with the session token, `api` holds typed endpoint
//! calls, and `types` defines the wire schema.

pub mod api;
pub mod http;
pub mod interceptor;
pub mod types;

//! Netdraft Daemon - HTTP API for the network design assistant.
//!
//! Proxies chat turns to the Gemini upstream, tracks conversation state,
//! and runs the design generator on request.

pub mod gemini;
pub mod routes;
pub mod server;

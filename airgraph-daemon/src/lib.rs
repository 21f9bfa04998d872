//! airgraph daemon library - HTTP surface over the flight network engine.
//!
//! Exposed as a library so integration tests can build the router without
//! binding a socket.

pub mod server;

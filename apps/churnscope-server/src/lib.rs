//! Churnscope server library.
//!
//! The binary in `main.rs` is a thin shell over this crate: configuration
//! loading, service construction and router composition live here so the
//! integration tests can drive the exact router the binary serves.

pub mod bootstrap;
pub mod config;
pub mod gateway;
pub mod openapi;

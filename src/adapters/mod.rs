//! Adapters connecting the ports to real infrastructure.
//!
//! Each submodule pairs a production implementation with a mock used by
//! tests: HTTP inference for classification, an OpenAI-compatible endpoint
//! for generation, Postgres and in-memory stores, JWT verification, a file
//! transcript sink, and the axum HTTP surface.

pub mod auth;
pub mod classifier;
pub mod generation;
pub mod http;
pub mod store;
pub mod transcript;

//! Cover Ambient
//!
//! HTTP service that turns book covers into ambient palettes and gradient
//! layouts, built on the `cover-palette` engine.
//! This library exposes modules for integration testing.

pub mod api;
pub mod error;
pub mod models;
pub mod server;
pub mod services;

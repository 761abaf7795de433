//! Embedlinker - a single-file short link store with social-preview pages
//!
//! This library provides the pieces a hosting HTTP layer calls into:
//! the short link store, Instagram CDN expiry detection, and the embed
//! redirect page renderer.
//!
//! # Features
//! - **cli**: Command-line front end (default)
//!
//! # Architecture
//! - `storage`: In-memory link map mirrored to a JSON file, legacy format migration
//! - `services`: Embed HTML rendering and CDN link expiry detection
//! - `config`: Configuration management
//! - `system`: Logging initialization
//! - `utils`: Short code generation
//! - `cli`: Command-line interface

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod errors;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;

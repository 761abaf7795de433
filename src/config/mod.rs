//! Configuration management
//!
//! Static configuration is read once at startup from an optional TOML file
//! and `EL__*` environment variables, then shared through a global handle.

mod r#impl;
mod structs;

pub use r#impl::{get_config, init_config, init_config_from};
pub use structs::*;

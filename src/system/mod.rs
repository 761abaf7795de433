//! System-level modules
//!
//! Process plumbing shared by the binary: logging initialization.

pub mod logging;

//! Library crate for netscan-rs exposing reusable modules.
pub mod error;
pub mod ports;
pub mod scanner;
pub mod sink;
pub mod targets;
pub mod types;

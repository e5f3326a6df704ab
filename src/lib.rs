//! Library crate for port-scan-rs exposing reusable modules.
pub mod output;
pub mod ports;
pub mod probe;
pub mod scanner;
pub mod services;
pub mod types;

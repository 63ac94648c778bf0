//! NttCalc-rs library: application logic for the transform driver.

pub mod app;
pub mod config;
pub mod errors;
pub mod orchestrator;
pub mod output;
pub mod presenter;
pub mod version;

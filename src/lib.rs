//! Workspace-level integration tests for NttCalc-rs.
//!
//! The tests live under `tests/`; this crate has no code of its own.

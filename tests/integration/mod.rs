//! Integration tests for boltbench.

pub mod core_test;
pub mod detect_test;
pub mod runner_test;
pub mod stub;

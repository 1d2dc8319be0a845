//! boltbench - Runtime-agnostic query runner for Firebolt Cloud and Firebolt Core.
//!
//! This library exposes the core modules for use in the binary and in
//! integration tests.

pub mod benchmark;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod runner;
pub mod runtime;
pub mod script;
pub mod suites;
pub mod table;
pub mod timed;

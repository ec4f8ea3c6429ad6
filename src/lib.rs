//! RAILBIRD — Poker Table Symbol Engine & Decision-Support Agent
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod table;
pub mod providers;
pub mod engine;
pub mod history;

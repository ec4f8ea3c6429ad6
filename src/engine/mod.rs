//! Core engine — the provider registry and the per-frame session driver.

pub mod registry;
pub mod session;

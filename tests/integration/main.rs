//! Integration suite: full-session scenarios over the standard registry.

mod mock_table;
mod session_flow;
mod symbols_flow;

//! Match-3 board engine (workspace facade crate).
//!
//! Re-exports the member crates under one name so the binary, the integration tests
//! and the benches can write `match3::core::Grid` instead of naming each crate.

pub use match3_adapter as adapter;
pub use match3_core as core;
pub use match3_input as input;
pub use match3_term as term;
pub use match3_types as types;

//! Displaced array views (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this
//! package re-exports them as `dispview::{types, core, surface}` and hosts
//! the demo binary's configuration.

pub mod config;

pub use dispview_core as core;
pub use dispview_surface as surface;
pub use dispview_types as types;

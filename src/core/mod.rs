// ElasChat - core/mod.rs
//
// Core business logic layer: the display transforms, record search, and
// the content model.
// Dependencies: standard library, chrono, serde, tracing.
// Must NOT depend on: app, platform, or any I/O.

pub mod catalog;
pub mod count;
pub mod filter;
pub mod identity;
pub mod model;
pub mod relative_time;

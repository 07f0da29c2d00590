// ElasChat - platform/mod.rs
//
// Platform abstraction layer: directories, config.toml, local storage.
// Dependencies: standard library, directories, toml, serde_json.
// Must NOT depend on: app.

pub mod config;
pub mod storage;

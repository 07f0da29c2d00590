// ElasChat - app/mod.rs
//
// Application layer: the auth session, screen searches, and display rows.
// Dependencies: core, platform, util.

pub mod discover;
pub mod session;
pub mod views;

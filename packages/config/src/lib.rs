// ABOUTME: Shared configuration names and defaults for Tickoff
// ABOUTME: Keeps environment variable names in one place for the server and its tests

pub mod constants;

pub use constants::*;

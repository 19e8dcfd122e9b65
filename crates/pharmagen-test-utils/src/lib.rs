//! Shared fixtures for pharmagen tests.

pub mod fixtures;

//! Test helpers module
//!
//! This module provides utilities and helpers for testing the LevelUp backend:
//! database provisioning and seeded service contexts.

#![allow(dead_code)]

pub mod database_helper;
pub mod test_data;

pub use database_helper::*;
pub use test_data::*;

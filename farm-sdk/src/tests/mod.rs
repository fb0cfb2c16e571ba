//! Unit tests for the Farm SDK
//!
//! This module contains tests for various components of the SDK.

pub mod config_tests;
pub mod core_tests;

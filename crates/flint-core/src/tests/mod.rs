//! Test module for flint-core
//!
//! This module contains tests for:
//! - End-to-end query resolution over both catalogs
//! - The debounced controller and its async driver
//! - Plugin directory and app catalog loading
//! - Configuration loading and defaults
//! - Properties of resolution (determinism, precedence, dedup, strict mode)

mod resolve_tests;

//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Identifier generation
//! - Math types and operations
//! - Logging utilities

pub mod ids;
pub mod math;
pub mod logging;

//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Math types and screen-space rectangles
//! - Time management and frame-rate counting
//! - Logging utilities

pub mod math;
pub mod time;
pub mod logging;

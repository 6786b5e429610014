//! Utilities shared by the package layers.
//!
//! This module provides the XML tree that every part is parsed into and the
//! unit conversions used to size drawings.

pub mod unit;
pub mod xml;

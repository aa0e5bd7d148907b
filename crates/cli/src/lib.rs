//! CLI utilities for Nutrion tools
//!
//! Provides shared CLI functionality:
//! - Status messages
//! - Food record tables

#![warn(missing_docs)]

pub mod output;

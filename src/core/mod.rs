//! Core module - shared infrastructure for OR-AF
//!
//! This module contains the payload types, configuration, and error handling
//! used throughout the crate.

pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::{OrafError, Result};
pub use types::*;

//! Core types and configuration for the lifegrid cellular-automaton engine.

pub mod types;
pub mod config;
pub mod error;

pub use error::{Error, Result};
pub use types::*;
pub use config::*;

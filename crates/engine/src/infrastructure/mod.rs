//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod clock;
pub mod compendium_store;
pub mod config;
pub mod importers;
pub mod openai_compat;
pub mod player_store;
pub mod ports;
pub mod session_store;
pub mod sqlite;

//! Printworks Core - Shared domain library.
//!
//! This crate provides the types and logic used across all Printworks
//! components:
//! - `server` - Public shop API and admin API
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no database
//! access, no HTTP clients. The cart reconciliation and theme rendering here
//! operate on plain values; the server supplies stock snapshots and persists
//! the results.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, and statuses
//! - [`cart`] - Cart value type and stock-checked reconciliation
//! - [`theme`] - Theme configuration, presets, and stylesheet rendering
//! - [`variants`] - Print-size selection shaping for product creation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod theme;
pub mod types;
pub mod variants;

pub use types::*;

//! Printworks server library.
//!
//! Exposes the server's modules for the CLI (migrations, admin bootstrap)
//! and integration tests. The binary entrypoint lives in `main.rs`.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

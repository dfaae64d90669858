//! Integration tests for Printworks.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations
//! cargo run -p printworks-cli -- migrate
//!
//! # Start the server
//! cargo run -p printworks-server
//!
//! # Run integration tests
//! cargo test -p printworks-integration-tests -- --ignored
//! ```
//!
//! Tests are `#[ignore]`d by default because they need a running server
//! (`SHOP_BASE_URL`, default `http://localhost:3000`) with a migrated,
//! seedable database behind it.

use reqwest::Client;

/// Base URL for the shop API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("SHOP_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Create an HTTP client with a cookie store, so the session (and with it
/// the cart) persists across requests like a browser's would.
#[must_use]
pub fn session_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

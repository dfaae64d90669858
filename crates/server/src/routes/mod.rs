//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Liveness check
//! GET  /health/ready                    - Readiness check (DB ping)
//!
//! # Public shop API
//! GET    /api/products                  - Product listing (?search=&category=)
//! GET    /api/products/meta/categories  - Category filter options
//! GET    /api/products/{id}             - Product detail
//! GET    /api/print-sizes               - Print-size templates
//! GET    /api/settings/public           - Branding + theme document
//! GET    /api/settings/theme.css        - Rendered theme stylesheet
//!
//! # Cart (session-backed)
//! GET    /api/cart                      - Cart view (totals computed at read time)
//! POST   /api/cart/add                  - Add a line (product + optional size)
//! PUT    /api/cart/update/{productId}   - Set absolute quantity (<= 0 removes)
//! DELETE /api/cart/remove/{productId}   - Remove one line (?size= for variants)
//! DELETE /api/cart/clear                - Drop the whole cart
//!
//! # Checkout
//! POST   /api/checkout/session          - Create hosted checkout session
//! POST   /api/checkout/confirm          - Confirm payment, snapshot the order
//! GET    /api/orders/mine               - Order history (?email=)
//!
//! # Auth
//! POST   /api/auth/login                - Admin login
//! POST   /api/auth/logout               - Admin logout
//!
//! # Admin API (session-gated)
//! POST   /api/admin/products            - Create product (multipart)
//! PUT    /api/admin/products/{id}       - Update product (multipart)
//! DELETE /api/admin/products/{id}       - Delete product
//! GET    /api/admin/orders              - All orders, newest first
//! PUT    /api/admin/orders/{id}         - Advance order status
//! POST   /api/admin/print-sizes         - Create template
//! PUT    /api/admin/print-sizes/{id}    - Update template
//! DELETE /api/admin/print-sizes/{id}    - Delete template
//! GET    /api/admin/settings            - Full settings (secret redacted)
//! PUT    /api/admin/settings            - Update branding (multipart, logo upload)
//! PUT    /api/admin/settings/design     - Replace the theme document
//! POST   /api/admin/settings/design/preview        - Render a draft theme to CSS
//! GET    /api/admin/settings/design/presets/{name} - Preset merged over default
//! ```

pub mod admin_orders;
pub mod admin_products;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod print_sizes;
pub mod products;
pub mod settings;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

/// Create the public product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/meta/categories", get(products::categories))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update/{product_id}", put(cart::update))
        .route("/remove/{product_id}", delete(cart::remove))
        .route("/clear", delete(cart::clear))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/session", post(checkout::create_session))
        .route("/confirm", post(checkout::confirm))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create the admin routes router.
///
/// Individual handlers enforce authentication via `RequireAdminAuth`.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/products", post(admin_products::create))
        .route(
            "/products/{id}",
            put(admin_products::update).delete(admin_products::delete),
        )
        .route("/orders", get(admin_orders::index))
        .route("/orders/{id}", put(admin_orders::update_status))
        .route("/print-sizes", post(print_sizes::create))
        .route(
            "/print-sizes/{id}",
            put(print_sizes::update).delete(print_sizes::delete),
        )
        .route(
            "/settings",
            get(settings::admin_show).put(settings::admin_update),
        )
        .route("/settings/design", put(settings::admin_update_design))
        .route("/settings/design/preview", post(settings::preview_design))
        .route(
            "/settings/design/presets/{name}",
            get(settings::preset),
        )
}

/// Create all routes for the shop server.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/products", product_routes())
        .nest("/api/cart", cart_routes())
        .nest("/api/checkout", checkout_routes())
        .route("/api/orders/mine", get(checkout::my_orders))
        .route("/api/print-sizes", get(print_sizes::index))
        .route("/api/settings/public", get(settings::public_settings))
        .route("/api/settings/theme.css", get(settings::theme_css))
        .nest("/api/auth", auth_routes())
        .nest("/api/admin", admin_routes())
}

//! Persisted records and session types.

pub mod admin_user;
pub mod order;
pub mod print_size;
pub mod product;
pub mod settings;

pub use admin_user::{AdminUser, CurrentAdmin, session_keys};
pub use order::{NewOrder, Order, OrderItem, ShippingAddress};
pub use print_size::PrintSize;
pub use product::{NewProduct, Product, ProductPatch, Stock, StockLookupError};
pub use settings::{PublicSettings, Settings, SettingsPatch};

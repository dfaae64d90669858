//! Seed the catalog with demo data.
//!
//! Idempotent enough for development use: print sizes collide on their
//! unique names and are skipped on re-runs; products are inserted fresh
//! each time.

use rust_decimal::Decimal;
use tracing::{info, warn};

use printworks_core::variants::{SizeSelection, shape_variants};
use printworks_server::db::print_sizes::PrintSizeRepository;
use printworks_server::db::products::ProductRepository;
use printworks_server::db::{self, RepositoryError};
use printworks_server::models::{NewProduct, Stock};

use super::CommandError;

const PRINT_SIZES: &[(&str, &str, i32)] = &[
    ("8x10", "8\" x 10\"", 1),
    ("11x14", "11\" x 14\"", 2),
    ("16x20", "16\" x 20\"", 3),
];

/// Insert demo print sizes and products.
///
/// # Errors
///
/// Returns an error if the database is unreachable or an insert fails.
pub async fn run() -> Result<(), CommandError> {
    let database_url = super::database_url()?;
    let pool = db::create_pool(&database_url).await?;

    let sizes = PrintSizeRepository::new(&pool);
    for (name, dimensions, sort_order) in PRINT_SIZES {
        match sizes.create(name, dimensions, *sort_order).await {
            Ok(_) => info!(name, "Seeded print size"),
            Err(RepositoryError::Conflict(_)) => warn!(name, "Print size exists, skipping"),
            Err(e) => return Err(e.into()),
        }
    }

    let products = ProductRepository::new(&pool);

    let sized_variants = shape_variants(&[
        SizeSelection {
            template_name: "8x10".to_owned(),
            dimensions: "8\" x 10\"".to_owned(),
            checked: true,
            quantity: 10,
            additional_price: Decimal::ZERO,
        },
        SizeSelection {
            template_name: "11x14".to_owned(),
            dimensions: "11\" x 14\"".to_owned(),
            checked: true,
            quantity: 5,
            additional_price: Decimal::new(1500, 2),
        },
    ]);

    products
        .insert(NewProduct {
            name: "Harbor at Dusk".to_owned(),
            description: "Giclée print of an original oil painting.".to_owned(),
            price: Decimal::new(4500, 2),
            category: Some("Home".to_owned()),
            images: vec!["/uploads/seed-harbor.jpg".to_owned()],
            stock: Stock::Variants {
                variants: sized_variants,
            },
        })
        .await?;

    products
        .insert(NewProduct {
            name: "Field Notes Tote".to_owned(),
            description: "Heavyweight canvas tote with gusseted base.".to_owned(),
            price: Decimal::new(2200, 2),
            category: Some("Other".to_owned()),
            images: vec!["/uploads/seed-tote.jpg".to_owned()],
            stock: Stock::Flat { quantity: 25 },
        })
        .await?;

    info!("Seeded demo products");
    Ok(())
}

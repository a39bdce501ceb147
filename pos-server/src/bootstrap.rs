//! Reference-data bootstrap
//!
//! Runs once at process start. Each entity kind is seeded only when no
//! record of that kind exists yet, so restarting never duplicates or
//! resets data an operator has since changed.

use rust_decimal::Decimal;

use crate::core::ServerState;
use crate::repository::{DiningTableRepository, ProductRepository, StoreConfigRepository};
use crate::utils::AppResult;
use shared::models::{ProductCreate, StoreConfig};

/// (number, capacity) of the default floor plan
const TABLES: [(&str, i32); 12] = [
    ("1", 4),
    ("2", 2),
    ("3", 6),
    ("4", 4),
    ("5", 8),
    ("6", 2),
    ("7", 4),
    ("8", 6),
    ("9", 4),
    ("10", 2),
    ("11", 4),
    ("12", 6),
];

/// (name, category, price, stock, min_stock) of the starter menu
const PRODUCTS: [(&str, &str, i64, i32, i32); 8] = [
    ("Bandeja Paisa", "Platos Fuertes", 28000, 50, 10),
    ("Ajiaco Santafereño", "Platos Fuertes", 22000, 30, 10),
    ("Sancocho", "Platos Fuertes", 20000, 40, 10),
    ("Arroz con Pollo", "Platos Fuertes", 18000, 35, 10),
    ("Limonada Natural", "Bebidas", 5000, 100, 20),
    ("Café", "Bebidas", 3000, 150, 30),
    ("Jugo de Naranja", "Bebidas", 6000, 80, 20),
    ("Brownie", "Postres", 8000, 25, 5),
];

/// Seed tables, products and the store configuration, each guarded by a
/// presence check per entity kind
pub fn seed(state: &ServerState) -> AppResult<()> {
    let tables = DiningTableRepository::new(state.store.clone());
    if tables.find_all()?.is_empty() {
        for (number, capacity) in TABLES {
            tables.insert(number, capacity)?;
        }
        tracing::info!("Seeded {} dining tables", TABLES.len());
    }

    let products = ProductRepository::new(state.store.clone());
    if products.find_all()?.is_empty() {
        for (name, category, price, stock, min_stock) in PRODUCTS {
            products.create(
                ProductCreate {
                    name: name.to_string(),
                    category: category.to_string(),
                    price: Decimal::new(price * 100, 2),
                    stock,
                    min_stock,
                },
                None,
            )?;
        }
        tracing::info!("Seeded {} products", PRODUCTS.len());
    }

    let config = StoreConfigRepository::new(state.store.clone());
    if !config.exists()? {
        config.put(&StoreConfig::default())?;
        tracing::info!("Seeded default store configuration");
    }

    Ok(())
}

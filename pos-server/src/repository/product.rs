//! Product Repository
//!
//! The only entity kind with a delete path (inventory management).

use super::{RepoError, RepoResult, new_record_id};
use crate::store::KvStore;
use shared::models::{Product, ProductCreate, ProductUpdate};

const KIND: &str = "product";
const PREFIX: &str = "product:";

#[derive(Clone)]
pub struct ProductRepository {
    store: KvStore,
}

impl ProductRepository {
    pub fn new(store: KvStore) -> Self {
        Self { store }
    }

    pub fn create(&self, data: ProductCreate, created_by: Option<String>) -> RepoResult<Product> {
        if data.price < rust_decimal::Decimal::ZERO {
            return Err(RepoError::Validation(format!(
                "Product price cannot be negative: {}",
                data.price
            )));
        }

        let id = new_record_id(&self.store, KIND)?;
        let product = Product {
            id: id.clone(),
            name: data.name,
            category: data.category,
            price: data.price,
            stock: data.stock,
            min_stock: data.min_stock,
            created_at: shared::util::now_millis(),
            created_by,
            updated_at: None,
            updated_by: None,
        };
        self.store.set(&id, &product)?;
        Ok(product)
    }

    pub fn find_all(&self) -> RepoResult<Vec<Product>> {
        Ok(self.store.get_by_prefix(PREFIX)?)
    }

    pub fn update(
        &self,
        id: &str,
        data: ProductUpdate,
        updated_by: Option<String>,
    ) -> RepoResult<Product> {
        if let Some(price) = data.price {
            if price < rust_decimal::Decimal::ZERO {
                return Err(RepoError::Validation(format!(
                    "Product price cannot be negative: {price}"
                )));
            }
        }

        self.store.update(id, |current: Option<Product>| {
            let mut product =
                current.ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))?;

            if let Some(name) = data.name {
                product.name = name;
            }
            if let Some(category) = data.category {
                product.category = category;
            }
            if let Some(price) = data.price {
                product.price = price;
            }
            if let Some(stock) = data.stock {
                product.stock = stock;
            }
            if let Some(min_stock) = data.min_stock {
                product.min_stock = min_stock;
            }
            product.updated_at = Some(shared::util::now_millis());
            product.updated_by = updated_by;
            Ok(product)
        })
    }

    pub fn delete(&self, id: &str) -> RepoResult<bool> {
        Ok(self.store.delete(id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_update_preserves_id() {
        let repo = ProductRepository::new(KvStore::open_in_memory().unwrap());
        let product = repo
            .create(
                ProductCreate {
                    name: "Limonada Natural".to_string(),
                    category: "Bebidas".to_string(),
                    price: Decimal::new(5000, 2),
                    stock: 100,
                    min_stock: 20,
                },
                None,
            )
            .unwrap();

        let updated = repo
            .update(
                &product.id,
                ProductUpdate {
                    name: None,
                    category: None,
                    price: Some(Decimal::new(5500, 2)),
                    stock: Some(90),
                    min_stock: None,
                },
                Some("user-1".to_string()),
            )
            .unwrap();

        assert_eq!(updated.id, product.id);
        assert_eq!(updated.price, Decimal::new(5500, 2));
        assert_eq!(updated.stock, 90);
        assert_eq!(updated.min_stock, 20);
        assert!(updated.updated_at.is_some());
    }

    #[test]
    fn test_negative_price_rejected() {
        let repo = ProductRepository::new(KvStore::open_in_memory().unwrap());
        let result = repo.create(
            ProductCreate {
                name: "Broken".to_string(),
                category: "Bebidas".to_string(),
                price: Decimal::new(-100, 2),
                stock: 0,
                min_stock: 0,
            },
            None,
        );
        assert!(matches!(result, Err(RepoError::Validation(_))));
    }

    #[test]
    fn test_delete() {
        let repo = ProductRepository::new(KvStore::open_in_memory().unwrap());
        let product = repo
            .create(
                ProductCreate {
                    name: "Brownie".to_string(),
                    category: "Postres".to_string(),
                    price: Decimal::new(8000, 2),
                    stock: 25,
                    min_stock: 5,
                },
                None,
            )
            .unwrap();

        assert!(repo.delete(&product.id).unwrap());
        assert!(repo.find_all().unwrap().is_empty());
    }
}

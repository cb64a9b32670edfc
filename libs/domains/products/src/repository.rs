use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{Category, Product, ProductInput};

/// Repository trait for Product persistence
///
/// Every listing is ordered by ascending id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Store a new product under a fresh id
    async fn create(&self, input: ProductInput) -> ProductResult<Product>;

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>>;

    /// Overwrite every mutable field of an existing product
    async fn update(&self, id: i32, input: ProductInput) -> ProductResult<Product>;

    /// Returns whether a product was removed
    async fn delete(&self, id: i32) -> ProductResult<bool>;

    async fn list_all(&self) -> ProductResult<Vec<Product>>;

    async fn find_by_name(&self, name: &str) -> ProductResult<Vec<Product>>;

    async fn find_by_category(&self, category: Category) -> ProductResult<Vec<Product>>;

    async fn find_by_availability(&self, available: bool) -> ProductResult<Vec<Product>>;
}

/// Ids are assigned by the store, so anything below 1 cannot name a product.
pub(crate) fn ensure_assigned_id(id: i32) -> ProductResult<()> {
    if id <= 0 {
        return Err(ProductError::Validation(
            "Update called with empty ID field".to_string(),
        ));
    }
    Ok(())
}

#[derive(Debug, Default)]
struct Store {
    last_id: i32,
    products: BTreeMap<i32, Product>,
}

/// In-memory implementation of ProductRepository (for development/testing)
///
/// Ids come from a counter that never goes backwards, so a deleted id is not reused.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn filtered<F>(&self, predicate: F) -> Vec<Product>
    where
        F: Fn(&Product) -> bool,
    {
        let store = self.store.read().await;
        store
            .products
            .values()
            .filter(|p| predicate(*p))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: ProductInput) -> ProductResult<Product> {
        let mut store = self.store.write().await;

        store.last_id += 1;
        let product = Product {
            id: store.last_id,
            name: input.name,
            description: input.description,
            price: input.price,
            available: input.available,
            category: input.category,
        };
        store.products.insert(product.id, product.clone());

        tracing::info!(product_id = product.id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let store = self.store.read().await;
        Ok(store.products.get(&id).cloned())
    }

    async fn update(&self, id: i32, input: ProductInput) -> ProductResult<Product> {
        ensure_assigned_id(id)?;

        let mut store = self.store.write().await;
        let product = store
            .products
            .get_mut(&id)
            .ok_or(ProductError::NotFound(id))?;

        product.name = input.name;
        product.description = input.description;
        product.price = input.price;
        product.available = input.available;
        product.category = input.category;

        tracing::info!(product_id = id, "Updated product");
        Ok(product.clone())
    }

    async fn delete(&self, id: i32) -> ProductResult<bool> {
        let mut store = self.store.write().await;

        if store.products.remove(&id).is_some() {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn list_all(&self) -> ProductResult<Vec<Product>> {
        Ok(self.filtered(|_| true).await)
    }

    async fn find_by_name(&self, name: &str) -> ProductResult<Vec<Product>> {
        Ok(self.filtered(|p| p.name == name).await)
    }

    async fn find_by_category(&self, category: Category) -> ProductResult<Vec<Product>> {
        Ok(self.filtered(|p| p.category == category).await)
    }

    async fn find_by_availability(&self, available: bool) -> ProductResult<Vec<Product>> {
        Ok(self.filtered(|p| p.available == available).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn input(name: &str, category: Category, available: bool) -> ProductInput {
        ProductInput {
            name: name.to_string(),
            description: None,
            price: Decimal::new(1999, 2),
            available,
            category,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_product() {
        let repo = InMemoryProductRepository::new();

        let product = repo
            .create(input("Hammer", Category::Tools, true))
            .await
            .unwrap();
        assert_eq!(product.id, 1);
        assert_eq!(product.name, "Hammer");

        let fetched = repo.get_by_id(product.id).await.unwrap();
        assert_eq!(fetched, Some(product));
        assert_eq!(repo.get_by_id(99).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = InMemoryProductRepository::new();

        let first = repo.create(input("A", Category::Food, true)).await.unwrap();
        assert!(repo.delete(first.id).await.unwrap());
        let second = repo.create(input("B", Category::Food, true)).await.unwrap();

        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_update_overwrites_fields() {
        let repo = InMemoryProductRepository::new();
        let product = repo.create(input("Hat", Category::Cloths, true)).await.unwrap();

        let mut change = input("Cap", Category::Cloths, false);
        change.description = Some("Baseball cap".to_string());
        let updated = repo.update(product.id, change).await.unwrap();

        assert_eq!(updated.id, product.id);
        assert_eq!(updated.name, "Cap");
        assert!(!updated.available);
        assert_eq!(updated.description.as_deref(), Some("Baseball cap"));
    }

    #[tokio::test]
    async fn test_update_rejects_unassigned_id() {
        let repo = InMemoryProductRepository::new();

        let err = repo
            .update(0, input("Hat", Category::Cloths, true))
            .await
            .unwrap_err();
        assert!(
            matches!(err, ProductError::Validation(msg) if msg == "Update called with empty ID field")
        );
    }

    #[tokio::test]
    async fn test_update_missing_product() {
        let repo = InMemoryProductRepository::new();

        let err = repo
            .update(5, input("Hat", Category::Cloths, true))
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::NotFound(5)));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let repo = InMemoryProductRepository::new();
        let product = repo.create(input("Pan", Category::Housewares, true)).await.unwrap();

        assert!(repo.delete(product.id).await.unwrap());
        assert!(!repo.delete(product.id).await.unwrap());
        assert!(repo.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_finders_return_matching_subset_in_id_order() {
        let repo = InMemoryProductRepository::new();
        repo.create(input("Apple", Category::Food, true)).await.unwrap();
        repo.create(input("Tyre", Category::Automotive, false)).await.unwrap();
        repo.create(input("Bread", Category::Food, false)).await.unwrap();
        repo.create(input("Apple", Category::Food, false)).await.unwrap();

        let food: Vec<i32> = repo
            .find_by_category(Category::Food)
            .await
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(food, vec![1, 3, 4]);

        let apples = repo.find_by_name("Apple").await.unwrap();
        assert_eq!(apples.len(), 2);
        assert!(apples.iter().all(|p| p.name == "Apple"));

        let unavailable = repo.find_by_availability(false).await.unwrap();
        assert_eq!(unavailable.len(), 3);

        assert_eq!(repo.list_all().await.unwrap().len(), 4);
    }
}

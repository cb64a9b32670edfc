//! Integration tests for Products domain
//!
//! These tests use real PostgreSQL via testcontainers to ensure:
//! - The migration and the SeaORM entity agree on the schema
//! - Decimal prices survive the NUMERIC(10,2) column exactly
//! - Filters and ordering run as SQL, not in memory
//!
//! They need Docker: `cargo test -- --ignored`

use domain_products::*;
use rust_decimal::Decimal;
use test_utils::{TestDataBuilder, TestDatabase, assertions::*};

fn input(builder: &TestDataBuilder, suffix: &str, index: u64, category: Category) -> ProductInput {
    ProductInput {
        name: builder.name("product", suffix),
        description: Some(format!("Integration test product {}", suffix)),
        price: builder.price(index),
        available: index % 2 == 0,
        category,
    }
}

// ============================================================================
// Repository Tests
// ============================================================================

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_create_and_get_product() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("create_and_get");

    let input = input(&builder, "main", 0, Category::Housewares);
    let created = repo.create(input.clone()).await.unwrap();

    assert!(created.id > 0);
    assert_eq!(ProductInput::from(&created), input);

    let retrieved = repo.get_by_id(created.id).await.unwrap();
    let retrieved = assert_some(retrieved, "product should exist");
    assert_eq!(retrieved, created);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_price_round_trips_exactly() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("price_round_trip");

    for price in [Decimal::new(1, 2), Decimal::new(1250, 2), Decimal::new(99_999_999_99, 2)] {
        let created = repo
            .create(ProductInput {
                price,
                ..input(&builder, &price.to_string(), 0, Category::Food)
            })
            .await
            .unwrap();

        let fetched = assert_some(repo.get_by_id(created.id).await.unwrap(), "stored product");
        assert_eq!(fetched.price, price);
        assert_eq!(fetched.price.to_string(), price.to_string());
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_product() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("update");

    let created = repo
        .create(input(&builder, "before", 0, Category::Tools))
        .await
        .unwrap();

    let change = ProductInput {
        description: None,
        available: false,
        ..input(&builder, "after", 1, Category::Automotive)
    };
    let updated = repo.update(created.id, change.clone()).await.unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(ProductInput::from(&updated), change);

    let missing = repo.update(created.id + 1000, change.clone()).await;
    assert!(matches!(missing, Err(ProductError::NotFound(_))));

    let unassigned = repo.update(0, change).await;
    assert!(matches!(unassigned, Err(ProductError::Validation(_))));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_delete_product() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("delete");

    let created = repo
        .create(input(&builder, "doomed", 0, Category::Unknown))
        .await
        .unwrap();

    assert!(repo.delete(created.id).await.unwrap());
    assert!(!repo.delete(created.id).await.unwrap());
    assert!(repo.get_by_id(created.id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_filters_and_ordering() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("filters");

    let categories = [
        Category::Food,
        Category::Cloths,
        Category::Food,
        Category::Tools,
        Category::Cloths,
    ];
    for (i, category) in categories.into_iter().enumerate() {
        repo.create(input(&builder, &i.to_string(), i as u64, category))
            .await
            .unwrap();
    }

    let all = repo.list_all().await.unwrap();
    assert_eq!(all.len(), 5);
    let ids: Vec<i32> = all.iter().map(|p| p.id).collect();
    assert_ascending_ids(&ids, "list_all");

    let food = repo.find_by_category(Category::Food).await.unwrap();
    assert_eq!(food.len(), 2);
    assert!(food.iter().all(|p| p.category == Category::Food));

    let available = repo.find_by_availability(true).await.unwrap();
    assert_eq!(available.len(), 3);

    let by_name = repo.find_by_name(&builder.name("product", "3")).await.unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].category, Category::Tools);

    assert!(repo.find_by_category(Category::Housewares).await.unwrap().is_empty());
}

// ============================================================================
// Service Tests
// ============================================================================

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_service_against_postgres() {
    let db = TestDatabase::new().await;
    let service = ProductService::new(PgProductRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("service");

    let created = service
        .create_product(input(&builder, "svc", 0, Category::Food))
        .await
        .unwrap();

    let listed = service
        .list_products(ProductQuery::Category(Category::Food))
        .await
        .unwrap();
    assert_eq!(listed, vec![created.clone()]);

    service.delete_product(created.id).await.unwrap();
    service.delete_product(created.id).await.unwrap();

    let err = service.get_product(created.id).await.unwrap_err();
    assert!(matches!(err, ProductError::NotFound(_)));
}

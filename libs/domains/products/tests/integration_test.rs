//! Integration tests for the Products domain
//!
//! These run against a real PostgreSQL via testcontainers and need Docker:
//!
//! ```sh
//! cargo test -p domain_products --test integration_test -- --ignored
//! ```

use domain_products::*;
use test_utils::{TestDataBuilder, TestDatabase, assertions::*};

fn new_product(builder: &TestDataBuilder, suffix: &str) -> NewProduct {
    NewProduct {
        name: builder.name("product", suffix),
        price: builder.price(0),
        description: Some("Integration test product".to_string()),
        image: Some("product.jpg".to_string()),
    }
}

// ============================================================================
// Repository Tests
// ============================================================================

#[tokio::test]
#[ignore] // Requires Docker
async fn test_create_and_get_product() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("create_and_get");

    let input = new_product(&builder, "main");
    let created = repo.create(input.clone()).await.unwrap();

    assert!(created.id > 0);
    assert_eq!(created.name, input.name);
    assert_eq!(created.price, input.price);

    let retrieved = repo.get_by_id(created.id).await.unwrap();
    let retrieved = assert_some(retrieved, "product should exist");
    assert_eq!(retrieved, created);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_list_is_ordered_by_id() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("list_order");

    for suffix in ["z", "a", "m"] {
        repo.create(new_product(&builder, suffix)).await.unwrap();
    }

    let ids: Vec<i32> = repo.list().await.unwrap().iter().map(|p| p.id).collect();
    assert_eq!(ids.len(), 3);
    assert_ascending(&ids, "list");
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_partial_update_keeps_other_columns() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("partial_update");

    let created = repo.create(new_product(&builder, "orig")).await.unwrap();

    let updated = repo
        .update(
            created.id,
            ProductChanges {
                price: Some("99.99".to_string()),
                description: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, created.name);
    assert_eq!(updated.price, "99.99");
    assert_eq!(updated.description, None);
    assert_eq!(updated.image, created.image);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_update_missing_product_is_not_found() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());

    let result = repo.update(12345, ProductChanges::default()).await;
    assert!(
        matches!(result, Err(ProductError::NotFound(12345))),
        "Expected NotFound, got {:?}",
        result
    );
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_delete_product() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("delete");

    let created = repo.create(new_product(&builder, "gone")).await.unwrap();

    let deleted = repo.delete(created.id).await.unwrap();
    assert_eq!(deleted, created);

    let retrieved = repo.get_by_id(created.id).await.unwrap();
    assert!(retrieved.is_none(), "product should be deleted");

    assert!(matches!(
        repo.delete(created.id).await,
        Err(ProductError::NotFound(_))
    ));
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_ids_are_not_reused() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("no_reuse");

    let first = repo.create(new_product(&builder, "first")).await.unwrap();
    repo.delete(first.id).await.unwrap();
    let second = repo.create(new_product(&builder, "second")).await.unwrap();

    assert!(second.id > first.id);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_concurrent_creates() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("concurrent");

    let creates = (0..10).map(|i| {
        let repo = repo.clone();
        let input = new_product(&builder, &format!("c{i}"));
        async move { repo.create(input).await }
    });

    let results = futures::future::join_all(creates).await;
    let mut ids: Vec<i32> = results.into_iter().map(|r| r.unwrap().id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 10);
}

// ============================================================================
// Service Tests
// ============================================================================

#[tokio::test]
#[ignore] // Requires Docker
async fn test_service_stores_numeric_price_as_string() {
    let db = TestDatabase::new().await;
    let service = ProductService::new(PgProductRepository::new(db.connection()));

    let created = service
        .create_product(CreateProduct {
            name: "Pen".to_string(),
            price: PriceInput::from(2.5),
            description: None,
            image: None,
        })
        .await
        .unwrap();
    assert_eq!(created.price, "2.5");

    let replaced = service
        .replace_product(
            created.id,
            CreateProduct {
                name: "Pen".to_string(),
                price: PriceInput::from(10.0),
                description: None,
                image: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(replaced.price, "10");

    db.truncate_products().await;
    assert!(service.list_products().await.unwrap().is_empty());
}

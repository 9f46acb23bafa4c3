//! Brand repository against a real MongoDB (requires Docker).

use domain_brands::*;
use test_utils::{TestDataBuilder, TestMongo};

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_brand_lifecycle() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("test_brand_lifecycle");
    let repository = MongoBrandRepository::new(&mongo.database(&builder.database()));
    repository.init_indexes().await.unwrap();

    let service = BrandService::new(repository);
    let name = builder.letters(8);

    let created = service
        .create_brand(BrandInput { name: name.clone() })
        .await
        .unwrap();
    assert_eq!(service.get_brand(created.id).await.unwrap().name, name);

    let renamed = service
        .update_brand(created.id, BrandInput { name: "Renamed".into() })
        .await
        .unwrap();
    assert_eq!(renamed.name, "Renamed");
    assert!(renamed.updated_at >= created.updated_at);

    let deleted = service.delete_brand(created.id).await.unwrap();
    assert_eq!(deleted.id, created.id);
    assert!(matches!(
        service.get_brand(created.id).await,
        Err(BrandError::NotFound)
    ));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_unique_index_maps_to_conflict() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("test_unique_index_maps_to_conflict");
    let repository = MongoBrandRepository::new(&mongo.database(&builder.database()));
    repository.init_indexes().await.unwrap();

    // Straight to the repository, bypassing the service's pre-check
    repository.create(BrandInput { name: "HP".into() }).await.unwrap();
    let second = repository.create(BrandInput { name: "HP".into() }).await;

    assert!(matches!(second, Err(BrandError::NameTaken)));
    assert_eq!(repository.list().await.unwrap().len(), 1);
}

//! Repository errors surface catalog-specific codes
//! Run: cargo test -p catalog-server --test catalog_repository

mod common;

use catalog_server::db::repository::{
    BrandRepository, CategoryRepository, ProductRepository, RepoError,
};
use catalog_server::{AppError, ErrorCode};
use common::{open_db, seed_catalog, specs};
use http::StatusCode;
use shared::models::{BrandCreate, CategoryCreate, ProductCreate};

fn product(slug: &str, sku: &str) -> ProductCreate {
    ProductCreate {
        title: "Test Product".into(),
        slug: Some(slug.into()),
        sku: Some(sku.into()),
        price: 10.0,
        stock: 1,
        availability: None,
        specs: specs(&[("Color", "Black")]),
        attribute_groups: Vec::new(),
        brand: None,
        categories: Vec::new(),
        is_active: None,
    }
}

fn app_error(err: RepoError) -> AppError {
    err.into()
}

#[tokio::test]
async fn duplicate_slugs_report_their_own_code() {
    let (_tmp, db) = open_db().await;
    seed_catalog(&db).await;

    let err = CategoryRepository::new(db.clone())
        .create(CategoryCreate {
            name: "GPUs".into(),
            slug: "graphics-cards".into(),
            sort_order: None,
            is_active: None,
        })
        .await
        .unwrap_err();
    let err = app_error(err);
    assert_eq!(err.code, ErrorCode::CategorySlugExists);
    assert_eq!(err.http_status(), StatusCode::CONFLICT);

    let err = BrandRepository::new(db.clone())
        .create(BrandCreate {
            name: "Nvidia".into(),
            slug: "nvidia".into(),
            is_active: None,
        })
        .await
        .unwrap_err();
    assert_eq!(app_error(err).code, ErrorCode::BrandSlugExists);

    let products = ProductRepository::new(db);
    let err = products
        .create(product("rtx-4070", "NEW-SKU"))
        .await
        .unwrap_err();
    assert_eq!(app_error(err).code, ErrorCode::ProductSlugExists);

    // sku 冲突同样报告 ProductSlugExists
    let err = products
        .create(product("new-product", "RTX-4070"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Duplicate(ErrorCode::ProductSlugExists, _)
    ));
}

#[tokio::test]
async fn missing_references_report_their_own_code() {
    let (_tmp, db) = open_db().await;
    seed_catalog(&db).await;
    let products = ProductRepository::new(db);

    let mut data = product("orphan", "ORPHAN");
    data.brand = Some("brand:missing".into());
    let err = products.create(data).await.unwrap_err();
    assert_eq!(app_error(err).code, ErrorCode::BrandNotFound);

    let mut data = product("orphan", "ORPHAN");
    data.categories = vec!["category:missing".into()];
    let err = products.create(data).await.unwrap_err();
    let err = app_error(err);
    assert_eq!(err.code, ErrorCode::CategoryNotFound);
    assert_eq!(err.http_status(), StatusCode::NOT_FOUND);

    let err = products
        .update_specs("product:missing", specs(&[("Color", "Red")]))
        .await
        .unwrap_err();
    assert_eq!(app_error(err).code, ErrorCode::ProductNotFound);
}

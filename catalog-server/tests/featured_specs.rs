//! Featured spec configuration store against an embedded database
//! Run: cargo test -p catalog-server --test featured_specs

mod common;

use std::time::Duration;

use catalog_server::audit::{AuditAction, AuditService};
use catalog_server::{CurrentUser, ErrorCode, FeaturedSpecsService};
use common::{open_db, seed_catalog};
use serde_json::json;
use shared::models::FeaturedMode;

fn admin() -> CurrentUser {
    CurrentUser {
        id: "user:ops".into(),
        username: "ops".into(),
        role: "admin".into(),
    }
}

#[tokio::test]
async fn available_keys_are_normalized_and_sorted() {
    let (_tmp, db) = open_db().await;
    seed_catalog(&db).await;
    let service = FeaturedSpecsService::new(db.clone(), AuditService::start(db));

    let available = service.available_spec_keys("graphics-cards").await.unwrap();
    assert_eq!(available.category_key, "graphics-cards");
    // 下架商品的 "Memory Bus" 不出现
    assert_eq!(
        available.available_spec_keys,
        vec!["Chipset", "Vram", "Wattage"]
    );

    let empty = service.available_spec_keys("monitors").await.unwrap();
    assert!(empty.available_spec_keys.is_empty());

    let err = service.available_spec_keys("keyboards").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::CategoryNotFound);
}

#[tokio::test]
async fn update_read_delete_cycle() {
    let (_tmp, db) = open_db().await;
    seed_catalog(&db).await;
    let service = FeaturedSpecsService::new(db.clone(), AuditService::start(db));

    let initial = service.featured_specs("graphics-cards").await.unwrap();
    assert_eq!(initial.mode, FeaturedMode::DefaultAll);
    assert!(initial.featured_spec_keys.is_empty());

    let updated = service
        .update_featured_specs(
            "graphics-cards",
            &json!({ "featuredSpecKeys": ["VRAM", "Vram", "chipset"] }),
            Some(&admin()),
        )
        .await
        .unwrap();
    assert_eq!(updated.mode, FeaturedMode::Restricted);
    assert_eq!(updated.featured_spec_keys, vec!["Vram", "Chipset"]);

    let read = service.featured_specs("graphics-cards").await.unwrap();
    assert_eq!(read, updated);

    let none = service
        .update_featured_specs(
            "graphics-cards",
            &json!({ "featuredSpecKeys": [] }),
            Some(&admin()),
        )
        .await
        .unwrap();
    assert_eq!(none.mode, FeaturedMode::None);

    let deleted = service
        .delete_featured_specs("graphics-cards", Some(&admin()))
        .await
        .unwrap();
    assert_eq!(deleted.mode, FeaturedMode::DefaultAll);
    assert!(deleted.featured_spec_keys.is_empty());

    let err = service
        .delete_featured_specs("graphics-cards", Some(&admin()))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::FeaturedSpecsNotFound);
}

#[tokio::test]
async fn update_rejects_unknown_category_and_bad_payload() {
    let (_tmp, db) = open_db().await;
    seed_catalog(&db).await;
    let service = FeaturedSpecsService::new(db.clone(), AuditService::start(db));

    let err = service
        .update_featured_specs("keyboards", &json!({ "featuredSpecKeys": ["Switch"] }), None)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::CategoryNotFound);

    for body in [
        json!({ "featuredSpecKeys": "Vram" }),
        json!({ "featuredSpecKeys": [1, 2] }),
        json!({ "keys": ["Vram"] }),
    ] {
        let err = service
            .update_featured_specs("graphics-cards", &body, None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.details.unwrap()["field"], "featuredSpecKeys");
    }

    // 校验失败不写入
    let state = service.featured_specs("graphics-cards").await.unwrap();
    assert_eq!(state.mode, FeaturedMode::DefaultAll);
}

#[tokio::test]
async fn changes_are_audited() {
    let (_tmp, db) = open_db().await;
    seed_catalog(&db).await;
    let audit = AuditService::start(db.clone());
    let service = FeaturedSpecsService::new(db, audit.clone());

    service
        .update_featured_specs(
            "processors",
            &json!({ "featuredSpecKeys": ["socket"] }),
            Some(&admin()),
        )
        .await
        .unwrap();

    // worker 异步落库，轮询等待
    let mut entries = Vec::new();
    for _ in 0..50 {
        entries = audit.storage().query_recent(10).await.unwrap();
        if !entries.is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    assert_eq!(entries.len(), 1);
    let entry = &entries[0];
    assert_eq!(entry.action, AuditAction::FeaturedSpecsUpdated);
    assert_eq!(entry.resource_id, "processors");
    assert_eq!(entry.operator_name.as_deref(), Some("ops"));
    assert_eq!(entry.details["featuredSpecKeys"], json!(["Socket"]));
    assert_eq!(entry.details["mode"], "restricted");
}

//! Shared fixtures for integration tests
#![allow(dead_code)]

use std::collections::BTreeMap;

use catalog_server::core::PageLimits;
use catalog_server::db::DbService;
use catalog_server::db::repository::{BrandRepository, CategoryRepository, ProductRepository};
use catalog_server::ProductFilter;
use shared::models::{Availability, BrandCreate, CategoryCreate, ProductCreate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tempfile::TempDir;

/// Open a fresh embedded database with the schema applied
///
/// The `TempDir` must outlive the handle.
pub async fn open_db() -> (TempDir, Surreal<Db>) {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("catalog.db");
    let service = DbService::new(&path.to_string_lossy(), "test", "test")
        .await
        .unwrap();
    (tmp, service.db)
}

pub fn specs(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub fn query(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub fn filter(pairs: &[(&str, &str)]) -> ProductFilter {
    ProductFilter::from_pairs(&query(pairs), PageLimits::default()).unwrap()
}

struct Seed<'a> {
    title: &'a str,
    slug: &'a str,
    price: f64,
    stock: i64,
    availability: Availability,
    specs: &'a [(&'a str, &'a str)],
    brand: &'a str,
    category: &'a str,
    is_active: bool,
}

/// Seed the storefront fixture
///
/// | product | price | brand | category | stock | availability |
/// |---------|-------|-------|----------|-------|--------------|
/// | rtx-4070 | 599 | nvidia | graphics-cards | 5 | in_stock |
/// | rtx-4060 | 299 | nvidia | graphics-cards | 0 | out_of_stock |
/// | rx-7800-xt | 499 | amd | graphics-cards | 2 | in_stock |
/// | ryzen-7-7800x3d | 449 | amd | processors | 10 | in_stock |
/// | rtx-4090 (inactive) | 1599 | nvidia | graphics-cards | 1 | pre_order |
pub async fn seed_catalog(db: &Surreal<Db>) {
    let categories = CategoryRepository::new(db.clone());
    for (name, slug, sort_order) in [
        ("Graphics Cards", "graphics-cards", 1),
        ("Processors", "processors", 2),
        ("Monitors", "monitors", 3),
    ] {
        categories
            .create(CategoryCreate {
                name: name.into(),
                slug: slug.into(),
                sort_order: Some(sort_order),
                is_active: Some(true),
            })
            .await
            .unwrap();
    }

    let brands = BrandRepository::new(db.clone());
    for (name, slug) in [("NVIDIA", "nvidia"), ("AMD", "amd")] {
        brands
            .create(BrandCreate {
                name: name.into(),
                slug: slug.into(),
                is_active: Some(true),
            })
            .await
            .unwrap();
    }

    let seeds = [
        Seed {
            title: "GeForce RTX 4070",
            slug: "rtx-4070",
            price: 599.0,
            stock: 5,
            availability: Availability::InStock,
            specs: &[("VRAM", "12GB"), ("Chipset", "AD104"), ("Wattage", "200W")],
            brand: "nvidia",
            category: "graphics-cards",
            is_active: true,
        },
        Seed {
            title: "GeForce RTX 4060",
            slug: "rtx-4060",
            price: 299.0,
            stock: 0,
            availability: Availability::OutOfStock,
            specs: &[("Vram", "8GB"), ("Chipset", "AD107"), ("Wattage", "115W")],
            brand: "nvidia",
            category: "graphics-cards",
            is_active: true,
        },
        Seed {
            title: "Radeon RX 7800 XT",
            slug: "rx-7800-xt",
            price: 499.0,
            stock: 2,
            availability: Availability::InStock,
            specs: &[("vram", "16GB"), ("Chipset", "Navi 32"), ("Wattage", "263W")],
            brand: "amd",
            category: "graphics-cards",
            is_active: true,
        },
        Seed {
            title: "Ryzen 7 7800X3D",
            slug: "ryzen-7-7800x3d",
            price: 449.0,
            stock: 10,
            availability: Availability::InStock,
            specs: &[("Cores", "8"), ("Socket", "AM5")],
            brand: "amd",
            category: "processors",
            is_active: true,
        },
        Seed {
            title: "GeForce RTX 4090",
            slug: "rtx-4090",
            price: 1599.0,
            stock: 1,
            availability: Availability::PreOrder,
            specs: &[("VRAM", "24GB"), ("Memory Bus", "384-bit")],
            brand: "nvidia",
            category: "graphics-cards",
            is_active: false,
        },
    ];

    let products = ProductRepository::new(db.clone());
    for seed in seeds {
        let brand = brands.find_by_slug(seed.brand).await.unwrap().unwrap();
        let category = categories.find_by_slug(seed.category).await.unwrap().unwrap();
        products
            .create(ProductCreate {
                title: seed.title.into(),
                slug: Some(seed.slug.into()),
                sku: Some(seed.slug.to_uppercase()),
                price: seed.price,
                stock: seed.stock,
                availability: Some(seed.availability),
                specs: specs(seed.specs),
                attribute_groups: Vec::new(),
                brand: brand.id.map(|id| id.to_string()),
                categories: category.id.map(|id| id.to_string()).into_iter().collect(),
                is_active: Some(seed.is_active),
            })
            .await
            .unwrap();
    }
}

//! 类型转换模块
//!
//! 将数据库模型 (db::models) 转换为 API 响应模型 (shared::models)

use surrealdb::RecordId;

use crate::db::models as db;
use shared::models as api;

// ============ Helper ============

pub fn record_to_string(id: &RecordId) -> String {
    id.to_string()
}

pub fn option_record_to_string(id: &Option<RecordId>) -> Option<String> {
    id.as_ref().map(record_to_string)
}

pub fn records_to_strings(ids: &[RecordId]) -> Vec<String> {
    ids.iter().map(record_to_string).collect()
}

// ============ Category ============

impl From<db::Category> for api::Category {
    fn from(c: db::Category) -> Self {
        Self {
            id: option_record_to_string(&c.id).unwrap_or_default(),
            name: c.name,
            slug: c.slug,
            sort_order: c.sort_order,
            is_active: c.is_active,
        }
    }
}

// ============ Brand ============

impl From<db::Brand> for api::Brand {
    fn from(b: db::Brand) -> Self {
        Self {
            id: option_record_to_string(&b.id).unwrap_or_default(),
            name: b.name,
            slug: b.slug,
            is_active: b.is_active,
        }
    }
}

// ============ Product ============

impl From<db::Product> for api::Product {
    fn from(p: db::Product) -> Self {
        Self {
            id: option_record_to_string(&p.id).unwrap_or_default(),
            title: p.title,
            slug: p.slug,
            sku: p.sku,
            price: p.price,
            stock: p.stock,
            availability: p.availability,
            specs: p.specs,
            attribute_groups: p.attribute_groups,
            brand: option_record_to_string(&p.brand),
            categories: records_to_strings(&p.categories),
            is_active: p.is_active,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

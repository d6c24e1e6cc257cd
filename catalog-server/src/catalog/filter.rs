//! Listing query parsing
//!
//! Turns raw query pairs into a [`ProductFilter`]. Spec filters arrive as
//! bracket notation (`spec[VRAM]=8GB,12GB`, repeatable) and/or as one
//! `spec=<json object>` parameter; both are merged under normalized keys.

use std::collections::BTreeMap;

use serde_json::Value;
use shared::models::{Availability, SortOrder};
use shared::normalize_spec_key;
use shared::util::split_csv;

use crate::core::config::PageLimits;
use crate::utils::validation::{MAX_SEARCH_LEN, MAX_SPEC_KEY_LEN};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Parsed listing request
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFilter {
    /// Lowercased search term
    pub search: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub in_stock: bool,
    pub availability: Vec<Availability>,
    /// Brand tokens (slug or record id)
    pub brands: Vec<String>,
    /// Category tokens (slug or record id)
    pub categories: Vec<String>,
    /// Normalized spec key → accepted values
    pub specs: BTreeMap<String, Vec<String>>,
    pub sort: SortOrder,
    pub page: u32,
    pub limit: u32,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            search: None,
            min_price: None,
            max_price: None,
            in_stock: false,
            availability: Vec::new(),
            brands: Vec::new(),
            categories: Vec::new(),
            specs: BTreeMap::new(),
            sort: SortOrder::default(),
            page: 1,
            limit: PageLimits::default().default_limit,
        }
    }
}

impl ProductFilter {
    /// Parse query pairs; unknown parameters are ignored
    pub fn from_pairs(pairs: &[(String, String)], limits: PageLimits) -> AppResult<Self> {
        let mut filter = Self {
            limit: limits.default_limit,
            ..Self::default()
        };

        for (name, value) in pairs {
            match name.as_str() {
                "search" => filter.search = parse_search(value)?,
                "minPrice" => filter.min_price = parse_price("minPrice", value)?,
                "maxPrice" => filter.max_price = parse_price("maxPrice", value)?,
                "inStock" => filter.in_stock = matches!(value.trim(), "true" | "1"),
                "availability" => {
                    for token in split_csv(value) {
                        let availability = token.parse::<Availability>().map_err(|e| {
                            AppError::invalid_field("availability", e)
                        })?;
                        if !filter.availability.contains(&availability) {
                            filter.availability.push(availability);
                        }
                    }
                }
                "brand" => extend_unique(&mut filter.brands, split_csv(value)),
                "category" => extend_unique(&mut filter.categories, split_csv(value)),
                "sort" => filter.sort = SortOrder::parse(value.trim()),
                "page" => {
                    filter.page = value.trim().parse::<u32>().ok().filter(|p| *p >= 1).unwrap_or(1)
                }
                "limit" => {
                    filter.limit = value
                        .trim()
                        .parse::<u32>()
                        .map(|l| l.clamp(1, limits.max_limit))
                        .unwrap_or(limits.default_limit)
                }
                "spec" => merge_spec_json(&mut filter.specs, value)?,
                other => {
                    if let Some(raw_key) = bracket_key(other) {
                        merge_spec_values(&mut filter.specs, raw_key, split_csv(value))?;
                    }
                }
            }
        }

        Ok(filter)
    }
}

fn extend_unique(target: &mut Vec<String>, tokens: Vec<String>) {
    for token in tokens {
        if !target.contains(&token) {
            target.push(token);
        }
    }
}

fn parse_search(value: &str) -> AppResult<Option<String>> {
    let term = value.trim();
    if term.is_empty() {
        return Ok(None);
    }
    if term.chars().count() > MAX_SEARCH_LEN {
        return Err(AppError::invalid_field(
            "search",
            format!("search is too long (max {MAX_SEARCH_LEN})"),
        ));
    }
    Ok(Some(term.to_lowercase()))
}

fn parse_price(field: &str, value: &str) -> AppResult<Option<f64>> {
    let raw = value.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<f64>() {
        Ok(price) if price.is_finite() => Ok(Some(price)),
        _ => Err(AppError::invalid_field(
            field,
            format!("{field} must be a number"),
        )),
    }
}

/// `spec[VRAM]` / `spec[VRAM][]` → `VRAM`
fn bracket_key(name: &str) -> Option<&str> {
    let inner = name.strip_prefix("spec[")?;
    let inner = inner.strip_suffix("[]").unwrap_or(inner);
    inner.strip_suffix(']')
}

/// `spec={"VRAM":["8GB","12GB"],"Chipset":"AD104"}`
fn merge_spec_json(specs: &mut BTreeMap<String, Vec<String>>, raw: &str) -> AppResult<()> {
    if raw.trim().is_empty() {
        return Ok(());
    }
    let parsed: Value = serde_json::from_str(raw)
        .map_err(|_| AppError::invalid_field("spec", "spec must be a JSON object"))?;
    let Value::Object(entries) = parsed else {
        return Err(AppError::invalid_field("spec", "spec must be a JSON object"));
    };

    for (raw_key, value) in entries {
        let values = match value {
            Value::String(s) => split_csv(&s),
            Value::Array(items) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.trim().to_string()),
                    Value::Number(n) => Some(n.to_string()),
                    Value::Bool(b) => Some(b.to_string()),
                    _ => None,
                })
                .filter(|s| !s.is_empty())
                .collect(),
            Value::Number(n) => vec![n.to_string()],
            Value::Bool(b) => vec![b.to_string()],
            _ => Vec::new(),
        };
        merge_spec_values(specs, &raw_key, values)?;
    }
    Ok(())
}

fn merge_spec_values(
    specs: &mut BTreeMap<String, Vec<String>>,
    raw_key: &str,
    values: Vec<String>,
) -> AppResult<()> {
    if raw_key.chars().count() > MAX_SPEC_KEY_LEN {
        return Err(AppError::invalid_field(
            "spec",
            format!("spec key is too long (max {MAX_SPEC_KEY_LEN})"),
        ));
    }
    let key = normalize_spec_key(raw_key);
    if key.is_empty() || values.is_empty() {
        return Ok(());
    }
    // 键名会被拼入查询语句的反引号标识符内
    if key.contains('`') {
        return Err(
            AppError::with_message(ErrorCode::SpecKeyInvalid, format!("Invalid spec key: {raw_key}"))
                .with_detail("field", "spec"),
        );
    }

    let entry = specs.entry(key).or_default();
    extend_unique(entry, values);
    Ok(())
}

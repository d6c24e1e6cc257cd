//! Spec key normalization
//!
//! Product `specs` keys are free text ("VRAM", "v-ram", "Vram Size"). Every
//! place that reads a key from product data, reads it from admin input or
//! writes it to featured-spec storage goes through [`normalize_spec_key`] so
//! that the same logical key always has one facet identity.
//!
//! 规则：`_ - / \` 视为分隔符 → 折叠空白 → 每个单词首字母大写其余小写 → 用 `_` 连接

use std::collections::{BTreeMap, HashSet};

/// Canonicalize a free-text spec key.
///
/// ```
/// use shared::normalize_spec_key;
///
/// assert_eq!(normalize_spec_key("v-ram"), "V_Ram");
/// assert_eq!(normalize_spec_key("VRAM Size"), "Vram_Size");
/// assert_eq!(normalize_spec_key("   "), "");
/// ```
pub fn normalize_spec_key(raw: &str) -> String {
    let spaced: String = raw
        .chars()
        .map(|c| match c {
            '_' | '-' | '/' | '\\' => ' ',
            other => other,
        })
        .collect();

    spaced
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join("_")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Normalize a list of keys, dropping empties and duplicates.
///
/// First occurrence wins, so the caller's ordering is kept.
pub fn normalize_spec_keys<I, S>(keys: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    keys.into_iter()
        .map(|k| normalize_spec_key(k.as_ref()))
        .filter(|k| !k.is_empty())
        .filter(|k| seen.insert(k.clone()))
        .collect()
}

/// Re-key a product spec map with normalized keys.
///
/// Values are trimmed and blank values dropped, so stored values match the
/// trimmed values filters send. When two raw keys collapse onto the same
/// normalized key the first one in key order is kept.
pub fn normalize_spec_map(specs: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    for (key, value) in specs {
        let normalized = normalize_spec_key(key);
        let value = value.trim();
        if normalized.is_empty() || value.is_empty() {
            continue;
        }
        out.entry(normalized).or_insert_with(|| value.to_string());
    }
    out
}

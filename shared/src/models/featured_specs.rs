//! Category featured-spec configuration

use serde::{Deserialize, Serialize};

/// Which spec facets a category exposes
///
/// Derived from the configuration row, never stored:
///
/// | row | keys | mode |
/// |-----|------|------|
/// | absent | - | `default_all` |
/// | present | ≥ 1 | `restricted` |
/// | present | 0 | `none` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeaturedMode {
    DefaultAll,
    Restricted,
    None,
}

impl FeaturedMode {
    /// Derive the mode from an optional stored key list
    pub fn derive(stored_keys: Option<&[String]>) -> Self {
        match stored_keys {
            None => Self::DefaultAll,
            Some([]) => Self::None,
            Some(_) => Self::Restricted,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DefaultAll => "default_all",
            Self::Restricted => "restricted",
            Self::None => "none",
        }
    }
}

impl Default for FeaturedMode {
    fn default() -> Self {
        Self::DefaultAll
    }
}

/// GET/PUT/DELETE `/featured-specs` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedSpecs {
    pub category_key: String,
    pub featured_spec_keys: Vec<String>,
    pub mode: FeaturedMode,
}

impl FeaturedSpecs {
    /// State of a category without configuration row
    pub fn default_all(category_key: impl Into<String>) -> Self {
        Self {
            category_key: category_key.into(),
            featured_spec_keys: Vec::new(),
            mode: FeaturedMode::DefaultAll,
        }
    }

    /// State of a category with a stored key list
    pub fn stored(category_key: impl Into<String>, keys: Vec<String>) -> Self {
        let mode = FeaturedMode::derive(Some(&keys));
        Self {
            category_key: category_key.into(),
            featured_spec_keys: keys,
            mode,
        }
    }
}

/// PUT `/featured-specs` body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedSpecsUpdate {
    pub featured_spec_keys: Vec<String>,
}

/// GET `/spec-keys` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableSpecKeys {
    pub category_key: String,
    pub available_spec_keys: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_derivation() {
        assert_eq!(FeaturedMode::derive(None), FeaturedMode::DefaultAll);
        assert_eq!(FeaturedMode::derive(Some(&[])), FeaturedMode::None);
        assert_eq!(
            FeaturedMode::derive(Some(&["Vram".to_string()])),
            FeaturedMode::Restricted
        );
    }

    #[test]
    fn test_constructors() {
        let state = FeaturedSpecs::default_all("gpu");
        assert_eq!(state.mode, FeaturedMode::DefaultAll);
        assert!(state.featured_spec_keys.is_empty());

        let state = FeaturedSpecs::stored("gpu", vec![]);
        assert_eq!(state.mode, FeaturedMode::None);

        let state = FeaturedSpecs::stored("gpu", vec!["Vram".into()]);
        assert_eq!(state.mode, FeaturedMode::Restricted);
    }

    #[test]
    fn test_wire_format() {
        let state = FeaturedSpecs::stored("graphics-cards", vec!["Vram".into()]);
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["categoryKey"], "graphics-cards");
        assert_eq!(json["featuredSpecKeys"][0], "Vram");
        assert_eq!(json["mode"], "restricted");

        let json = serde_json::to_value(FeaturedMode::DefaultAll).unwrap();
        assert_eq!(json, "default_all");
    }
}

//! Featured-spec gate
//!
//! Narrows the spec facet histogram to what the active category exposes.

use shared::models::{FeaturedMode, SpecHistogram};
use shared::normalize_spec_key;

/// Apply the featured mode to a histogram keyed by normalized spec keys
///
/// - `default_all`: unchanged
/// - `restricted`: only keys whose normalized form is featured
/// - `none`: empty
pub fn apply(histogram: SpecHistogram, mode: FeaturedMode, featured: &[String]) -> SpecHistogram {
    match mode {
        FeaturedMode::DefaultAll => histogram,
        FeaturedMode::None => SpecHistogram::new(),
        FeaturedMode::Restricted => {
            let allowed: Vec<String> = featured.iter().map(|k| normalize_spec_key(k)).collect();
            histogram
                .into_iter()
                .filter(|(key, _)| allowed.contains(&normalize_spec_key(key)))
                .collect()
        }
    }
}

//! Filter bounds over the catalog: four optional numeric constraints kept as
//! raw user-entered text so in-progress input survives until it parses.

/// The four filterable bounds, in their fixed query-parameter order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundField {
    MinPopularity,
    MaxPopularity,
    MinPrice,
    MaxPrice,
}

impl BoundField {
    pub fn query_name(self) -> &'static str {
        match self {
            BoundField::MinPopularity => "min_popularity",
            BoundField::MaxPopularity => "max_popularity",
            BoundField::MinPrice => "min_price",
            BoundField::MaxPrice => "max_price",
        }
    }
}

/// Popularity is normalized; text above the domain maximum is clamped to its
/// canonical form at entry time.
const POPULARITY_MAX_TEXT: &str = "1";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterBounds {
    pub min_popularity: String,
    pub max_popularity: String,
    pub min_price: String,
    pub max_price: String,
}

impl FilterBounds {
    /// Stores `raw` verbatim, except that popularity text parsing above 1 is
    /// replaced with "1". Empty text means "no constraint".
    pub fn set_bound(&mut self, field: BoundField, raw: impl Into<String>) {
        let mut text = raw.into();
        if matches!(field, BoundField::MinPopularity | BoundField::MaxPopularity) {
            if let Ok(value) = text.trim().parse::<f64>() {
                if value > 1.0 {
                    text = POPULARITY_MAX_TEXT.to_string();
                }
            }
        }
        match field {
            BoundField::MinPopularity => self.min_popularity = text,
            BoundField::MaxPopularity => self.max_popularity = text,
            BoundField::MinPrice => self.min_price = text,
            BoundField::MaxPrice => self.max_price = text,
        }
    }

    pub fn bound(&self, field: BoundField) -> &str {
        match field {
            BoundField::MinPopularity => &self.min_popularity,
            BoundField::MaxPopularity => &self.max_popularity,
            BoundField::MinPrice => &self.min_price,
            BoundField::MaxPrice => &self.max_price,
        }
    }

    /// Clears all four bounds in one step.
    pub fn reset(&mut self) {
        *self = FilterBounds::default();
    }

    /// One parameter per present bound, in the fixed field order. Empty when
    /// no bound is set.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        [
            BoundField::MinPopularity,
            BoundField::MaxPopularity,
            BoundField::MinPrice,
            BoundField::MaxPrice,
        ]
        .into_iter()
        .filter_map(|field| {
            let text = self.bound(field);
            if text.is_empty() {
                None
            } else {
                Some((field.query_name(), text.to_string()))
            }
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_contains_only_present_bounds_in_fixed_order() {
        let mut bounds = FilterBounds::default();
        bounds.set_bound(BoundField::MaxPrice, "500");
        bounds.set_bound(BoundField::MinPopularity, "0.3");

        assert_eq!(
            bounds.to_query(),
            vec![
                ("min_popularity", "0.3".to_string()),
                ("max_price", "500".to_string()),
            ]
        );
    }

    #[test]
    fn all_absent_bounds_produce_an_empty_query() {
        assert!(FilterBounds::default().to_query().is_empty());
    }

    #[test]
    fn popularity_above_domain_maximum_is_clamped_to_canonical_text() {
        let mut bounds = FilterBounds::default();
        bounds.set_bound(BoundField::MinPopularity, "1.7");
        assert_eq!(bounds.min_popularity, "1");

        bounds.set_bound(BoundField::MaxPopularity, "42");
        assert_eq!(bounds.max_popularity, "1");
    }

    #[test]
    fn popularity_within_domain_is_stored_verbatim() {
        let mut bounds = FilterBounds::default();
        bounds.set_bound(BoundField::MaxPopularity, "0.95");
        assert_eq!(bounds.max_popularity, "0.95");

        bounds.set_bound(BoundField::MinPopularity, "1");
        assert_eq!(bounds.min_popularity, "1");
    }

    #[test]
    fn price_text_passes_through_unchanged() {
        let mut bounds = FilterBounds::default();
        bounds.set_bound(BoundField::MinPrice, "100.50");
        bounds.set_bound(BoundField::MaxPrice, "99999");
        assert_eq!(bounds.min_price, "100.50");
        assert_eq!(bounds.max_price, "99999");
    }

    #[test]
    fn in_progress_text_is_preserved_without_coercion() {
        let mut bounds = FilterBounds::default();
        bounds.set_bound(BoundField::MaxPopularity, "0.");
        assert_eq!(bounds.max_popularity, "0.");
    }

    #[test]
    fn reset_clears_everything_at_once() {
        let mut bounds = FilterBounds::default();
        bounds.set_bound(BoundField::MinPopularity, "0.2");
        bounds.set_bound(BoundField::MaxPopularity, "0.8");
        bounds.set_bound(BoundField::MinPrice, "10");
        bounds.set_bound(BoundField::MaxPrice, "20");

        bounds.reset();
        assert_eq!(bounds, FilterBounds::default());
        assert!(bounds.to_query().is_empty());
    }
}

use serde::{Deserialize, Serialize};

/// Inclusive range of asking prices
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriceRange {
    pub min_price: i64,
    pub max_price: i64,
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min_price: 0,
            max_price: i64::MAX,
        }
    }
}

impl PriceRange {
    pub fn between(min_price: i64, max_price: i64) -> Self {
        Self {
            min_price,
            max_price,
        }
    }

    pub fn up_to(max_price: i64) -> Self {
        Self {
            max_price,
            ..Self::default()
        }
    }

    pub fn at_least(min_price: i64) -> Self {
        Self {
            min_price,
            ..Self::default()
        }
    }

    /// A missing price never falls inside a range
    pub fn contains(&self, price: Option<i64>) -> bool {
        price.is_some_and(|price| (self.min_price..=self.max_price).contains(&price))
    }
}

/// Variant filter for catalog searches
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    Garage,
    Apartment,
    House,
}

/// Search parameters for catalog queries
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchParams {
    /// Asking price bounds
    pub price: PriceRange,
    /// Minimum living area in square meters
    pub min_living_area: Option<u32>,
    /// Maximum living area in square meters
    pub max_living_area: Option<u32>,
    /// Restrict results to one kind of property
    pub variant: Option<Variant>,
}

pub mod types;

pub use types::{PriceRange, SearchParams, Variant};

use crate::models::{Property, PropertyKind};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};
use tracing::debug;

/// Catalog of advertised properties.
///
/// Properties are held by `Arc` so callers can keep their own handle,
/// e.g. to place bids, while the property stays listed.
#[derive(Debug, Default)]
pub struct HousingMarket {
    listings: RwLock<Vec<Arc<Property>>>,
}

impl HousingMarket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single property to the catalog
    pub fn advertise(&self, property: Arc<Property>) {
        debug!("Advertising {} at {}", property.kind().name(), property.address());
        self.listings
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(property);
    }

    /// Add several properties at once, keeping their order
    pub fn advertise_all(&self, properties: impl IntoIterator<Item = Arc<Property>>) {
        let mut listings = self.listings.write().unwrap_or_else(PoisonError::into_inner);
        let before = listings.len();
        listings.extend(properties);
        debug!("Advertised {} properties", listings.len() - before);
    }

    /// All properties matching `query`, in the order they were advertised
    pub fn search<F>(&self, query: F) -> Vec<Arc<Property>>
    where
        F: Fn(&Property) -> bool,
    {
        let found: Vec<Arc<Property>> = self
            .read()
            .iter()
            .filter(|property| query(property))
            .cloned()
            .collect();
        debug!("Search matched {} properties", found.len());
        found
    }

    /// Properties whose asking price lies inside `range`; price-on-request never matches
    pub fn search_price(&self, range: PriceRange) -> Vec<Arc<Property>> {
        self.search(|property| range.contains(property.price_asked()))
    }

    pub fn search_params(&self, params: &SearchParams) -> Vec<Arc<Property>> {
        self.search(|property| {
            let area = property.living_area();
            params.price.contains(property.price_asked())
                && params.min_living_area.map_or(true, |min| area >= min)
                && params.max_living_area.map_or(true, |max| area <= max)
                && params
                    .variant
                    .map_or(true, |variant| variant_matches(variant, property.kind()))
        })
    }

    /// Snapshot of every listing
    pub fn all(&self) -> Vec<Arc<Property>> {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Arc<Property>>> {
        self.listings.read().unwrap_or_else(PoisonError::into_inner)
    }
}

fn variant_matches(variant: Variant, kind: &PropertyKind) -> bool {
    matches!(
        (variant, kind),
        (Variant::Garage, PropertyKind::Garage { .. })
            | (Variant::Apartment, PropertyKind::Apartment { .. })
            | (Variant::House, PropertyKind::House { .. })
    )
}

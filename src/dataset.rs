use crate::error::Result;
use crate::models::{Customer, HousingType, Property};
use std::sync::Arc;

/// The Breda listings used by the demo binary and tests
#[derive(Debug, Clone)]
pub struct BredaListings {
    pub houses: [Arc<Property>; 4],
    pub apartments: [Arc<Property>; 2],
    pub garages: [Arc<Property>; 3],
}

impl BredaListings {
    pub fn new() -> Result<Self> {
        Ok(Self {
            houses: [
                Arc::new(Property::house("Gastakker 12", 130, Some(380_000), HousingType::Terraced, 210)?),
                Arc::new(Property::house("Singel 123", 120, Some(650_000), HousingType::Terraced, 180)?),
                Arc::new(Property::house("Hogeschoollaan 1", 40_000, None, HousingType::Detached, 25_000)?),
                Arc::new(Property::house("Bosrijk 10", 110, Some(510_000), HousingType::Bungalow, 380)?),
            ],
            apartments: [
                Arc::new(Property::apartment("Teteringsdijk 110", 65, Some(260_000), 99, 3)?),
                Arc::new(Property::apartment("Tuinzigtlaan 117", 90, Some(290_000), 130, 5)?),
            ],
            garages: [
                Arc::new(Property::garage("Hofjes 11", 19, Some(21_000), true)?),
                Arc::new(Property::garage("Hofjes 13", 19, Some(19_000), false)?),
                Arc::new(Property::garage("Hofjes 13", 19, None, true)?),
            ],
        })
    }

    /// Houses, then apartments, then garages
    pub fn all(&self) -> Vec<Arc<Property>> {
        self.houses
            .iter()
            .chain(&self.apartments)
            .chain(&self.garages)
            .cloned()
            .collect()
    }
}

pub fn henk() -> Customer {
    Customer::new("Henk", "Henk@breda.nl")
}

pub fn anne() -> Customer {
    Customer::new("Anne", "Anne@avans.nl")
}

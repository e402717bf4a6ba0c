pub mod property;
pub mod traits;

pub use property::{BidOutcome, Property, PropertyDisplay, PropertyKind};
pub use traits::Locatable;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A prospective buyer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Customer {
    pub name: String,
    pub email: String,
}

impl Customer {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// An accepted offer on a property
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bid {
    pub price_offered: i64,
    pub customer: Customer,
    pub placed_at: DateTime<Utc>,
}

impl fmt::Display for Bid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} offered by {} <{}> at {}",
            self.price_offered,
            self.customer.name,
            self.customer.email,
            self.placed_at.to_rfc3339()
        )
    }
}

/// A picture attached to an advertisement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Picture {
    pub description: String,
    pub url: String,
}

impl Picture {
    pub fn new(description: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            url: url.into(),
        }
    }
}

/// Kind of house, drives the energy factor
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HousingType {
    Detached,
    SemiDetached,
    Terraced,
    Bungalow,
}

impl fmt::Display for HousingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HousingType::Detached => "detached",
            HousingType::SemiDetached => "semi_detached",
            HousingType::Terraced => "terraced",
            HousingType::Bungalow => "bungalow",
        };
        f.write_str(name)
    }
}

/// Geographic coordinate of a property
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LatLong {
    pub latitude: f64,
    pub longitude: f64,
}

use crate::config::MarketConfig;
use crate::error::{MarketError, Result};
use crate::models::traits::{jittered_reference, Locatable};
use crate::models::{Bid, Customer, HousingType, LatLong, Picture};
use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

/// Yearly maintenance cost of a house as a share of its asking price
const HOUSE_MAINTENANCE_RATE: f64 = 0.01;
/// Yearly maintenance cost of a house per m2 of plot area
const HOUSE_PLOT_COST_PER_M2: f64 = 5.0;

/// Variant-specific part of an advertised property
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum PropertyKind {
    Garage {
        has_electricity: bool,
    },
    Apartment {
        monthly_hoa_fee: i64,
        floor: i32,
    },
    House {
        housing_type: HousingType,
        plot_area: u32,
    },
}

impl PropertyKind {
    pub fn name(&self) -> &'static str {
        match self {
            PropertyKind::Garage { .. } => "Garage",
            PropertyKind::Apartment { .. } => "Apartment",
            PropertyKind::House { .. } => "House",
        }
    }

    /// Factor used to estimate the yearly energy cost as `living_area * factor`
    pub fn energy_factor(&self) -> f64 {
        match self {
            PropertyKind::Garage { .. } => 0.0,
            PropertyKind::Apartment { .. } => 9.0,
            PropertyKind::House { housing_type, .. } => match housing_type {
                HousingType::Detached | HousingType::Bungalow => 15.0,
                HousingType::SemiDetached => 13.0,
                HousingType::Terraced => 11.0,
            },
        }
    }
}

/// Result of a valid bid submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidOutcome {
    Accepted,
    /// The offer did not beat the highest bid and was not recorded
    Rejected { highest_bid: i64 },
}

/// An advertised property with its bid ledger and pictures.
///
/// Properties are shared between the market and whoever holds them, so the
/// ledger and pictures sit behind their own locks and are only changed
/// through the methods below.
#[derive(Debug)]
pub struct Property {
    address: String,
    living_area: u32,
    price_asked: Option<i64>,
    kind: PropertyKind,
    bids: Mutex<Vec<Bid>>,
    pictures: Mutex<Vec<Picture>>,
}

impl Property {
    /// Create a property. A price of `None` means "price on request".
    pub fn new(
        address: impl Into<String>,
        living_area: u32,
        price_asked: Option<i64>,
        kind: PropertyKind,
    ) -> Result<Self> {
        if let Some(price) = price_asked {
            if price <= 0 {
                return Err(MarketError::InvalidArgument(format!(
                    "price asked should be positive, got {price}"
                )));
            }
        }

        Ok(Self {
            address: address.into(),
            living_area,
            price_asked,
            kind,
            bids: Mutex::new(Vec::new()),
            pictures: Mutex::new(Vec::new()),
        })
    }

    pub fn garage(
        address: impl Into<String>,
        living_area: u32,
        price_asked: Option<i64>,
        has_electricity: bool,
    ) -> Result<Self> {
        Self::new(
            address,
            living_area,
            price_asked,
            PropertyKind::Garage { has_electricity },
        )
    }

    pub fn apartment(
        address: impl Into<String>,
        living_area: u32,
        price_asked: Option<i64>,
        monthly_hoa_fee: i64,
        floor: i32,
    ) -> Result<Self> {
        Self::new(
            address,
            living_area,
            price_asked,
            PropertyKind::Apartment {
                monthly_hoa_fee,
                floor,
            },
        )
    }

    pub fn house(
        address: impl Into<String>,
        living_area: u32,
        price_asked: Option<i64>,
        housing_type: HousingType,
        plot_area: u32,
    ) -> Result<Self> {
        Self::new(
            address,
            living_area,
            price_asked,
            PropertyKind::House {
                housing_type,
                plot_area,
            },
        )
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn living_area(&self) -> u32 {
        self.living_area
    }

    pub fn price_asked(&self) -> Option<i64> {
        self.price_asked
    }

    pub fn kind(&self) -> &PropertyKind {
        &self.kind
    }

    pub fn energy_factor(&self) -> f64 {
        self.kind.energy_factor()
    }

    /// Estimated monthly costs (mortgage, energy, maintenance), truncated to whole units.
    /// Returns `None` when the price is on request.
    pub fn monthly_payments(&self, config: &MarketConfig) -> Option<i64> {
        let price = self.price_asked? as f64;
        let mortgage_year = price * config.interest_rate;
        let energy_year = self.living_area as f64 * self.energy_factor();

        let yearly = match &self.kind {
            PropertyKind::Garage { .. } => mortgage_year,
            PropertyKind::Apartment {
                monthly_hoa_fee, ..
            } => mortgage_year + (monthly_hoa_fee * 12) as f64 + energy_year,
            PropertyKind::House { plot_area, .. } => {
                let maintenance_year =
                    price * HOUSE_MAINTENANCE_RATE + *plot_area as f64 * HOUSE_PLOT_COST_PER_M2;
                mortgage_year + maintenance_year + energy_year
            }
        };

        Some((yearly / 12.0) as i64)
    }

    /// Place a bid. Non-positive prices are an error; an offer that does not
    /// beat the current highest bid is dropped without error.
    pub fn submit_bid(&self, customer: Customer, price_offered: i64) -> Result<BidOutcome> {
        if price_offered <= 0 {
            warn!(
                "Refusing bid of {} on {}: price should be positive",
                price_offered, self.address
            );
            return Err(MarketError::InvalidArgument(format!(
                "price offered should be positive, got {price_offered}"
            )));
        }

        // Read of the highest bid and the append happen under one guard
        let mut bids = self.lock_bids();
        let highest = bids.iter().map(|bid| bid.price_offered).max();

        match highest {
            Some(highest_bid) if price_offered <= highest_bid => {
                debug!(
                    "Bid of {} by {} on {} does not beat {}",
                    price_offered, customer.name, self.address, highest_bid
                );
                Ok(BidOutcome::Rejected { highest_bid })
            }
            _ => {
                debug!(
                    "Accepted bid of {} by {} on {}",
                    price_offered, customer.name, self.address
                );
                bids.push(Bid {
                    price_offered,
                    customer,
                    placed_at: Utc::now(),
                });
                Ok(BidOutcome::Accepted)
            }
        }
    }

    /// Like [`Property::submit_bid`], then waits `latency` once the bid is processed, win or lose.
    pub fn submit_bid_with_latency(
        &self,
        customer: Customer,
        price_offered: i64,
        latency: Duration,
    ) -> Result<BidOutcome> {
        let outcome = self.submit_bid(customer, price_offered)?;
        if !latency.is_zero() {
            thread::sleep(latency);
        }
        Ok(outcome)
    }

    /// Accepted bids in the order they were placed
    pub fn bids(&self) -> Vec<Bid> {
        self.lock_bids().clone()
    }

    pub fn highest_bid(&self) -> Option<Bid> {
        self.lock_bids()
            .iter()
            .max_by_key(|bid| bid.price_offered)
            .cloned()
    }

    pub fn add_picture(&self, picture: Picture) {
        self.lock_pictures().push(picture);
    }

    /// Remove the first matching picture, returns whether one was removed
    pub fn remove_picture(&self, picture: &Picture) -> bool {
        let mut pictures = self.lock_pictures();
        match pictures.iter().position(|p| p == picture) {
            Some(index) => {
                pictures.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn pictures(&self) -> Vec<Picture> {
        self.lock_pictures().clone()
    }

    /// Human readable advertisement text using the given config for payment estimates
    pub fn display<'a>(&'a self, config: &'a MarketConfig) -> PropertyDisplay<'a> {
        PropertyDisplay {
            property: self,
            config,
        }
    }

    fn lock_bids(&self) -> MutexGuard<'_, Vec<Bid>> {
        self.bids.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_pictures(&self) -> MutexGuard<'_, Vec<Picture>> {
        self.pictures.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Locatable for Property {
    fn location_with<R: Rng + ?Sized>(&self, rng: &mut R) -> LatLong {
        jittered_reference(rng)
    }
}

/// Advertisement text of a property, see [`Property::display`]
pub struct PropertyDisplay<'a> {
    property: &'a Property,
    config: &'a MarketConfig,
}

impl fmt::Display for PropertyDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let property = self.property;

        write!(f, "{} at {} price: ", property.kind.name(), property.address)?;
        match property.price_asked {
            Some(price) => write!(f, "{price}")?,
            None => f.write_str("price information on request.")?,
        }
        write!(f, " living area: {}", property.living_area)?;

        f.write_str("\n\testimated monthly costs (mortgage, energy, maintenance): ")?;
        match property.monthly_payments(self.config) {
            Some(payments) => write!(f, "{payments}")?,
            None => f.write_str("on request")?,
        }

        match &property.kind {
            PropertyKind::Garage { has_electricity } => {
                if *has_electricity {
                    f.write_str("\n\t with electricity!")?;
                }
            }
            PropertyKind::Apartment { floor, .. } => {
                write!(f, "\n\tlocated at {} floor", ordinal(*floor))?;
            }
            PropertyKind::House {
                housing_type,
                plot_area,
            } => {
                write!(
                    f,
                    "\n\tthis {housing_type} house is situated at {plot_area} m2 plot area"
                )?;
            }
        }

        Ok(())
    }
}

fn ordinal(n: i32) -> String {
    match n {
        1 => "first".to_string(),
        2 => "second".to_string(),
        3 => "third".to_string(),
        _ => format!("{n}th"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn terraced(living_area: u32, price: Option<i64>, plot_area: u32) -> Property {
        Property::house("", living_area, price, HousingType::Terraced, plot_area).unwrap()
    }

    #[test]
    fn energy_factor_per_variant() {
        let house = |housing_type| Property::house("", 0, None, housing_type, 0).unwrap();

        assert_eq!(house(HousingType::Terraced).energy_factor(), 11.0);
        assert_eq!(house(HousingType::SemiDetached).energy_factor(), 13.0);
        assert_eq!(house(HousingType::Detached).energy_factor(), 15.0);
        assert_eq!(house(HousingType::Bungalow).energy_factor(), 15.0);
        assert_eq!(
            Property::apartment("", 0, None, 0, 1).unwrap().energy_factor(),
            9.0
        );
        assert_eq!(
            Property::garage("", 0, None, true).unwrap().energy_factor(),
            0.0
        );
    }

    #[test]
    fn monthly_payments_of_terraced_house() {
        // (0.04 * 300000 + 0.01 * 300000 + 11 * 100 + 5 * 200) / 12 = 17100 / 12
        let house = terraced(100, Some(300_000), 200);
        assert_eq!(
            house.monthly_payments(&MarketConfig::default()),
            Some(17_100 / 12)
        );
    }

    #[test]
    fn monthly_payments_of_apartment_and_garage() {
        let config = MarketConfig::default();

        let apartment = Property::apartment("", 65, Some(260_000), 99, 3).unwrap();
        assert_eq!(apartment.monthly_payments(&config), Some(1014));

        let garage = Property::garage("", 19, Some(19_000), false).unwrap();
        assert_eq!(garage.monthly_payments(&config), Some(63));
    }

    #[test]
    fn monthly_payments_follow_configured_interest() {
        let garage = Property::garage("", 19, Some(12_000), false).unwrap();
        let config = MarketConfig {
            interest_rate: 0.1,
            ..MarketConfig::default()
        };
        assert_eq!(garage.monthly_payments(&config), Some(100));
    }

    #[test]
    fn monthly_payments_on_request_without_price() {
        let house = terraced(100, None, 200);
        assert_eq!(house.monthly_payments(&MarketConfig::default()), None);
    }

    #[test]
    fn non_positive_asking_price_is_rejected() {
        let result = Property::garage("Hofjes 1", 19, Some(0), false);
        assert!(matches!(result, Err(MarketError::InvalidArgument(_))));
    }

    #[test]
    fn lower_bid_is_not_accepted() {
        let house = terraced(0, Some(300_000), 0);
        let henk = Customer::new("Henk", "");
        let anne = Customer::new("Anne", "");

        assert_eq!(
            house.submit_bid(henk.clone(), 500_000),
            Ok(BidOutcome::Accepted)
        );
        assert_eq!(house.submit_bid(anne, 510_000), Ok(BidOutcome::Accepted));
        assert_eq!(
            house.submit_bid(henk, 505_000),
            Ok(BidOutcome::Rejected {
                highest_bid: 510_000
            })
        );

        let prices: Vec<i64> = house.bids().iter().map(|bid| bid.price_offered).collect();
        assert_eq!(prices, vec![500_000, 510_000]);
        assert_eq!(house.highest_bid().map(|bid| bid.customer.name), Some("Anne".to_string()));
    }

    #[test]
    fn equal_bid_is_not_accepted() {
        let house = terraced(0, None, 0);
        house.submit_bid(Customer::new("Henk", ""), 100).unwrap();
        let outcome = house.submit_bid(Customer::new("Anne", ""), 100).unwrap();

        assert_eq!(outcome, BidOutcome::Rejected { highest_bid: 100 });
        assert_eq!(house.bids().len(), 1);
    }

    #[test]
    fn non_positive_bid_is_an_error() {
        let house = terraced(0, Some(300_000), 0);

        for price in [-1, 0] {
            let result = house.submit_bid(Customer::new("Henk", ""), price);
            assert!(matches!(result, Err(MarketError::InvalidArgument(_))));
        }
        assert!(house.bids().is_empty());
    }

    #[test]
    fn bid_does_not_change_asking_price() {
        let house = terraced(0, Some(300_000), 0);
        house.submit_bid(Customer::new("Henk", ""), 400_000).unwrap();
        assert_eq!(house.price_asked(), Some(300_000));
    }

    #[test]
    fn latency_applies_after_processing() {
        let house = terraced(0, None, 0);
        let latency = Duration::from_millis(20);

        let started = std::time::Instant::now();
        house
            .submit_bid_with_latency(Customer::new("Henk", ""), 10, latency)
            .unwrap();
        house
            .submit_bid_with_latency(Customer::new("Anne", ""), 5, latency)
            .unwrap();

        assert!(started.elapsed() >= latency * 2);
        assert_eq!(house.bids().len(), 1);
    }

    #[test]
    fn concurrent_bids_stay_strictly_increasing() {
        let house = Arc::new(terraced(0, None, 0));

        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let house = Arc::clone(&house);
                thread::spawn(move || {
                    for step in 1..=50 {
                        let price = step * 10 + worker;
                        let _ = house.submit_bid(Customer::new(format!("bidder {worker}"), ""), price);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let bids = house.bids();
        assert!(!bids.is_empty());
        assert!(bids
            .windows(2)
            .all(|pair| pair[0].price_offered < pair[1].price_offered));
    }

    #[test]
    fn pictures_can_be_added_and_removed() {
        let garage = Property::garage("Hofjes 11", 19, Some(21_000), true).unwrap();
        let front = Picture::new("front", "https://example.org/front.jpg");
        let back = Picture::new("back", "https://example.org/back.jpg");

        garage.add_picture(front.clone());
        garage.add_picture(back.clone());
        assert!(garage.remove_picture(&front));
        assert!(!garage.remove_picture(&front));
        assert_eq!(garage.pictures(), vec![back]);
    }

    #[test]
    fn seeded_location_is_reproducible_and_near_reference() {
        let garage = Property::garage("Hofjes 11", 19, None, false).unwrap();

        let first = garage.location_with(&mut StdRng::seed_from_u64(7));
        let second = garage.location_with(&mut StdRng::seed_from_u64(7));
        assert_eq!(first, second);

        let random = garage.location();
        for point in [first, random] {
            assert!((point.latitude - 51.58494229691791).abs() <= 0.1);
            assert!((point.longitude - 4.797559120743779).abs() <= 0.1);
        }
    }

    #[test]
    fn display_of_each_variant() {
        let config = MarketConfig::default();

        let garage = Property::garage("Hofjes 13", 19, None, true).unwrap();
        assert_eq!(
            garage.display(&config).to_string(),
            "Garage at Hofjes 13 price: price information on request. living area: 19\
             \n\testimated monthly costs (mortgage, energy, maintenance): on request\
             \n\t with electricity!"
        );

        let apartment = Property::apartment("Teteringsdijk 110", 65, Some(260_000), 99, 3).unwrap();
        assert_eq!(
            apartment.display(&config).to_string(),
            "Apartment at Teteringsdijk 110 price: 260000 living area: 65\
             \n\testimated monthly costs (mortgage, energy, maintenance): 1014\
             \n\tlocated at third floor"
        );

        let house = terraced(100, Some(300_000), 200);
        assert!(house
            .display(&config)
            .to_string()
            .ends_with("\n\tthis terraced house is situated at 200 m2 plot area"));
    }

    #[test]
    fn ordinals() {
        assert_eq!(ordinal(1), "first");
        assert_eq!(ordinal(2), "second");
        assert_eq!(ordinal(3), "third");
        assert_eq!(ordinal(5), "5th");
    }
}

pub mod config;
pub mod dataset;
pub mod error;
pub mod market;
pub mod models;
pub mod report;

pub use config::{load_config, MarketConfig, ReportFormat};
pub use error::MarketError;
pub use market::{HousingMarket, PriceRange, SearchParams, Variant};
pub use models::{
    Bid, BidOutcome, Customer, HousingType, LatLong, Locatable, Picture, Property, PropertyKind,
};

use crate::config::MarketConfig;
use crate::models::{Bid, Picture, Property, PropertyKind};
use serde::Serialize;
use std::fmt::Write;
use std::sync::Arc;

const RULE_WIDTH: usize = 80;

/// Render the advertisement text of `selection`, optionally with each property's bids
pub fn render_advertisements(
    selection: &[Arc<Property>],
    include_bids: bool,
    description: &str,
    config: &MarketConfig,
) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(out, "All advertisements ({description}):");
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
    for property in selection {
        let _ = writeln!(out, "\t{}", property.display(config));
        if include_bids {
            let bids: Vec<String> = property.bids().iter().map(Bid::to_string).collect();
            let _ = writeln!(out, "\t\t{}", bids.join("\n\t\t"));
        }
        let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
    }
    let _ = writeln!(out, "{}", "#".repeat(RULE_WIDTH));
    out.push('\n');

    out
}

/// Print the advertisement text of `selection` to stdout
pub fn show_advertisements(
    selection: &[Arc<Property>],
    include_bids: bool,
    description: &str,
    config: &MarketConfig,
) {
    print!(
        "{}",
        render_advertisements(selection, include_bids, description, config)
    );
}

/// Serializable view of an advertised property
#[derive(Debug, Clone, Serialize)]
pub struct AdvertisementSnapshot {
    pub address: String,
    pub living_area: u32,
    pub price_asked: Option<i64>,
    #[serde(flatten)]
    pub kind: PropertyKind,
    pub monthly_payments: Option<i64>,
    pub bids: Vec<Bid>,
    pub pictures: Vec<Picture>,
}

impl AdvertisementSnapshot {
    pub fn of(property: &Property, config: &MarketConfig) -> Self {
        Self {
            address: property.address().to_string(),
            living_area: property.living_area(),
            price_asked: property.price_asked(),
            kind: property.kind().clone(),
            monthly_payments: property.monthly_payments(config),
            bids: property.bids(),
            pictures: property.pictures(),
        }
    }
}

/// JSON report of `selection` under the given description
pub fn render_json(
    selection: &[Arc<Property>],
    description: &str,
    config: &MarketConfig,
) -> serde_json::Value {
    let advertisements: Vec<AdvertisementSnapshot> = selection
        .iter()
        .map(|property| AdvertisementSnapshot::of(property, config))
        .collect();

    serde_json::json!({
        "description": description,
        "advertisements": advertisements,
    })
}

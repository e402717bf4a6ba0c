use anyhow::Context;
use housing_market::dataset::{anne, henk, BredaListings};
use housing_market::models::PropertyKind;
use housing_market::report::{render_json, show_advertisements};
use housing_market::{
    load_config, HousingMarket, Locatable, MarketConfig, PriceRange, Property, ReportFormat,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let config = load_config()?;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("🏠 Housing Market - Breda listings");
    info!(
        "Interest rate {}, bid latency {:?}",
        config.interest_rate,
        config.bid_latency()
    );

    let funda = HousingMarket::new();
    let listings = BredaListings::new().context("Failed to build demo listings")?;
    funda.advertise_all(listings.all());
    info!("Advertised {} properties", funda.len());

    let bungalow = &listings.houses[3];
    let location = bungalow.location();
    info!(
        "Bidding on {} near ({:.5}, {:.5})",
        bungalow.address(),
        location.latitude,
        location.longitude
    );
    for (customer, price) in [(henk(), 500_000), (anne(), 510_000), (henk(), 505_000)] {
        let outcome = bungalow.submit_bid_with_latency(customer, price, config.bid_latency())?;
        info!("Bid of {} on {}: {:?}", price, bungalow.address(), outcome);
    }

    let affordable = funda.search_price(PriceRange::up_to(400_000));
    report(&affordable, "houses with max price 400.000", &config)?;

    let powered_garages = funda.search(|property| {
        matches!(property.kind(), PropertyKind::Garage { has_electricity: true })
    });
    report(&powered_garages, "garages with electricity", &config)?;

    Ok(())
}

fn report(
    selection: &[Arc<Property>],
    description: &str,
    config: &MarketConfig,
) -> anyhow::Result<()> {
    match config.report_format {
        ReportFormat::Text => show_advertisements(selection, false, description, config),
        ReportFormat::Json => {
            let json = serde_json::to_string_pretty(&render_json(selection, description, config))?;
            println!("{json}");
        }
    }
    Ok(())
}

//! Offline Gateway Demo
//!
//! Points the gateway at a backend that is not running and shows that every
//! call still returns usable data, tagged with the reason it is a fallback.
//!
//! Run with `FARMGURU_API_URL` set to a live backend to see live responses.

use farm_sdk::{
    config::load_dotenv,
    init_logging,
    models::{MarketRequest, PolicyMatchRequest, QueryRequest},
    Gateway, GatewayConfig, LoggingConfig, Result,
};

#[tokio::main]
async fn main() -> Result<()> {
    load_dotenv();
    init_logging(LoggingConfig::default())?;

    let config = match std::env::var("FARMGURU_API_URL") {
        Ok(_) => GatewayConfig::from_env()?,
        Err(_) => GatewayConfig::with_base_url("http://127.0.0.1:1"),
    };
    let gateway = Gateway::new(config)?;

    println!("Farm-Guru Gateway Demo");
    println!("======================\n");

    let answer = gateway
        .submit_query(QueryRequest::new("How do I control aphids on mustard?"))
        .await;
    println!("Query ({}):", if answer.is_live() { "live" } else { "fallback" });
    println!("  {}", answer.data().answer);
    for action in &answer.data().actions {
        println!("  - {}", action);
    }
    if let Some(reason) = answer.fallback_reason() {
        println!("  [{}]", reason);
    }

    let market = gateway.get_market_data(MarketRequest::new("wheat")).await;
    println!("\nMarket: {} at ₹{} ({})", market.data().commodity, market.data().latest_price, market.data().signal);
    for point in &market.data().price_history {
        println!("  {}  ₹{}", point.date, point.price);
    }
    if let Some(cause) = market.cause() {
        println!("  cause: {}", cause);
    }

    let schemes = gateway
        .match_policies(PolicyMatchRequest::new("Karnataka").farmer_type("small"))
        .await;
    println!("\nSchemes ({} matches):", schemes.data().total_matches);
    for scheme in &schemes.data().matched_schemes {
        println!("  {} - {}", scheme.code, scheme.benefits);
    }

    println!("\nBackend available: {}", gateway.is_backend_available().await);

    Ok(())
}

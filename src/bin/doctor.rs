use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

use strategy_sync::config::Config;
use strategy_sync::workspace;

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();

    println!("Strategy workspace setup check");
    println!(
        "  mode: {}",
        if cfg.testnet { "TESTNET" } else { "LIVE" }
    );
    println!("  capital: {:.2} USDT", cfg.initial_capital);
    println!();

    let report = workspace::check(&cfg).await;
    report.print_summary();

    if !report.is_ok() {
        std::process::exit(1);
    }

    Ok(())
}

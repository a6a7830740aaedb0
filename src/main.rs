use bridge_tracker::aggregate::build_report;
use bridge_tracker::config::{Config, LEADERBOARD_LIMIT, REFRESH_INTERVAL_SECS};
use bridge_tracker::csv::export_leaderboard_csv;
use bridge_tracker::format::{format_eth, format_time, short_addr, wei_to_eth};
use bridge_tracker::models::{BridgeReport, Direction};
use bridge_tracker::scanner::{fetch_bridge_feeds, EtherscanClient, ScanError, TransferSource};
use chrono::Utc;
use log::{error, info, warn};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = Config::from_env()?;
    let client = EtherscanClient::new(&config.api_key);
    info!("tracking bridge {}", config.bridge_address);

    let mut last_good: Option<BridgeReport> = None;
    let mut ticker = tokio::time::interval(Duration::from_secs(REFRESH_INTERVAL_SECS));

    loop {
        ticker.tick().await;

        match refresh(&client, &config.bridge_address).await {
            Ok(report) => {
                render_report(&report, &config.bridge_address);
                if let Some(path) = &config.export_path {
                    if let Err(e) = export_leaderboard_csv(&report.leaderboard, path) {
                        warn!("csv export failed: {}", e);
                    }
                }
                last_good = Some(report);
            }
            Err(e) => {
                error!("refresh failed: {}", e);
                match &last_good {
                    Some(prev) => {
                        println!("\n!! refresh failed ({}), showing last successful data", e);
                        render_report(prev, &config.bridge_address);
                    }
                    None => println!("\n!! refresh failed ({}), no data yet", e),
                }
            }
        }
    }
}

async fn refresh<S>(source: &S, address: &str) -> Result<BridgeReport, ScanError>
where
    S: TransferSource + Sync,
{
    let (normal, internal) = fetch_bridge_feeds(source, address).await?;
    let now = Utc::now().timestamp() as u64;
    Ok(build_report(&[normal, internal], address, now))
}

fn render_report(report: &BridgeReport, address: &str) {
    println!(
        "\n=== Bridge {} | updated {} ===",
        short_addr(address),
        Utc::now().format("%H:%M:%S")
    );
    println!(
        "IN  {:>16} ETH  ({} txs)",
        format_eth(wei_to_eth(report.total_in_wei)),
        report.inbound_count
    );
    println!(
        "OUT {:>16} ETH  ({} txs)",
        format_eth(wei_to_eth(report.total_out_wei)),
        report.outbound_count
    );
    println!(
        "24h volume {} ETH, unique wallets {}",
        format_eth(wei_to_eth(report.window_volume_wei)),
        report.unique_wallets
    );

    println!("\nTop bridgers:");
    if report.leaderboard.is_empty() {
        println!("  No bridge data available");
    } else {
        for (i, wallet) in report.leaderboard.iter().take(LEADERBOARD_LIMIT).enumerate() {
            println!(
                "  {:>2}. {}  {:>16} ETH  {:>4} deposits  last {}",
                i + 1,
                short_addr(&wallet.address),
                format_eth(wei_to_eth(wallet.total_amount)),
                wallet.transfer_count,
                format_time(wallet.last_seen)
            );
        }
    }

    println!("\nRecent activity:");
    if report.recent.is_empty() {
        println!("  No recent activity");
    } else {
        for entry in &report.recent {
            let (badge, who) = match entry.direction {
                Direction::In => ("IN ", &entry.transfer.from),
                Direction::Out => ("OUT", &entry.transfer.to),
            };
            println!(
                "  [{}] {}  {:>16} ETH  {}",
                badge,
                short_addr(who),
                format_eth(wei_to_eth(entry.transfer.amount)),
                format_time(entry.transfer.timestamp)
            );
        }
    }
}

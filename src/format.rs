use chrono::DateTime;
use ethers::types::U256;
use once_cell::sync::Lazy;

static WEI_PER_ETH: Lazy<U256> = Lazy::new(|| U256::exp10(18));

/// Display-only conversion; truncates past f64 precision. The aggregation
/// path never feeds this value back into accounting.
pub fn wei_to_eth(wei: U256) -> f64 {
    let whole = wei / *WEI_PER_ETH;
    let frac = wei % *WEI_PER_ETH;
    whole.low_u128() as f64 + frac.low_u128() as f64 / 1e18
}

pub fn format_eth(amount: f64) -> String {
    format!("{:.4}", amount)
}

/// `0x0ca3a2...ee75` style shortening for terminal output.
pub fn short_addr(address: &str) -> String {
    if address.len() <= 10 {
        return address.to_string();
    }
    format!("{}...{}", &address[..6], &address[address.len() - 4..])
}

pub fn format_time(ts: u64) -> String {
    DateTime::from_timestamp(ts as i64, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| ts.to_string())
}

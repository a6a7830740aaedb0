use std::env;

/// `isError` value the account API uses for a successful transaction. The
/// internal feed omits the field entirely, which also counts as success.
pub const SUCCESS_FLAG: &str = "0";

/// Trailing inbound-volume window, seconds.
pub const DEFAULT_WINDOW_SECS: u64 = 86_400;

/// Rows shown in the rendered leaderboard. The CSV export is never truncated.
pub const LEADERBOARD_LIMIT: usize = 20;

/// Entries kept in the recent-activity feed.
pub const RECENT_LIMIT: usize = 12;

pub const REFRESH_INTERVAL_SECS: u64 = 60;

/// Account API pagination. The free tier stops serving results past
/// page * offset = 10_000.
pub const PAGE_SIZE: usize = 1_000;
pub const MAX_PAGES: u32 = 10;

pub const ETHERSCAN_BASE: &str = "https://api.etherscan.io/v2/api";
pub const CHAIN_ID: u64 = 1;

/// MegaETH bridge contract on mainnet.
pub const DEFAULT_BRIDGE_CA: &str = "0x0ca3a2fbc3d770b578223fbb6b062fa875a2ee75";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub bridge_address: String,
    pub export_path: Option<String>,
}

impl Config {
    /// Reads `ETHERSCAN_API_KEY` (required), `BRIDGE_CA` (optional override)
    /// and `EXPORT_CSV` (optional path for the leaderboard export).
    pub fn from_env() -> Result<Self, String> {
        let api_key = env::var("ETHERSCAN_API_KEY")
            .map_err(|_| "ETHERSCAN_API_KEY is not set".to_string())?;
        let bridge_address = env::var("BRIDGE_CA")
            .unwrap_or_else(|_| DEFAULT_BRIDGE_CA.to_string())
            .to_lowercase();
        let export_path = env::var("EXPORT_CSV").ok();

        Ok(Config {
            api_key,
            bridge_address,
            export_path,
        })
    }
}

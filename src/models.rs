use ethers::types::U256;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One transfer as the Etherscan account API returns it. Every field is
/// optional: the normal and internal feeds disagree about which fields they
/// emit, and `value`/`timeStamp` show up as strings or bare numbers depending
/// on the endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTransferRecord {
    #[serde(default)]
    pub hash: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub value: Option<String>,
    #[serde(rename = "timeStamp", default, deserialize_with = "string_or_number")]
    pub time_stamp: Option<String>,
    #[serde(rename = "isError", default)]
    pub is_error: Option<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Response envelope of the account API. `result` holds an array of records on
/// success and a bare string when the API rejects the request (rate limit,
/// invalid key).
#[derive(Debug, Deserialize)]
pub struct TxListResponse {
    pub status: String,
    pub message: String,
    pub result: Value,
}

/// A transfer after normalization: lower-cased addresses, exact wei amount,
/// unix timestamp. Unique by `id` once merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalTransfer {
    pub id: String,
    pub from: String,
    pub to: String,
    pub amount: U256,
    pub timestamp: u64,
    pub failed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    In,
    Out,
}

/// Entry of the recent-activity feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentEntry {
    pub transfer: CanonicalTransfer,
    pub direction: Direction,
}

/// Per-wallet rollup over the inbound set: everything one counterparty has
/// bridged in, how often, and when it was last seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletAggregate {
    pub address: String,
    pub total_amount: U256,
    pub transfer_count: u64,
    pub last_seen: u64,
}

/// Everything one refresh cycle produces. Rebuilt from scratch on every pass;
/// the caller decides what to keep when a later cycle fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeReport {
    pub total_in_wei: U256,
    pub total_out_wei: U256,
    pub window_volume_wei: U256,
    pub inbound_count: usize,
    pub outbound_count: usize,
    pub unique_wallets: usize,
    pub leaderboard: Vec<WalletAggregate>,
    pub recent: Vec<RecentEntry>,
}

/// Flat leaderboard row for tabular export. Field order is the column order;
/// `total_wei` stays a decimal base-unit integer so the export is exact.
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardRow {
    pub rank: usize,
    pub address: String,
    pub total_wei: String,
    pub transfer_count: u64,
    pub last_seen: u64,
}

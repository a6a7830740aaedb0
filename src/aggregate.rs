use crate::config::{DEFAULT_WINDOW_SECS, RECENT_LIMIT, SUCCESS_FLAG};
use crate::models::{
    BridgeReport, CanonicalTransfer, Direction, RawTransferRecord, RecentEntry, WalletAggregate,
};
use ethers::types::U256;
use std::collections::{HashMap, HashSet};

/// Total over its input: a record that cannot be parsed still yields a
/// canonical transfer (zero amount, zero timestamp, empty addresses) instead
/// of poisoning the whole batch.
pub fn normalize_tx(raw: &RawTransferRecord) -> CanonicalTransfer {
    let failed = match raw.is_error.as_deref() {
        Some(flag) => flag != SUCCESS_FLAG,
        None => false,
    };

    CanonicalTransfer {
        id: raw.hash.clone().unwrap_or_default(),
        from: raw.from.as_deref().unwrap_or("").to_lowercase(),
        to: raw.to.as_deref().unwrap_or("").to_lowercase(),
        amount: raw.value.as_deref().map(parse_wei).unwrap_or_default(),
        timestamp: raw.time_stamp.as_deref().map(parse_timestamp).unwrap_or(0),
        failed,
    }
}

/// Collapse any number of feeds into one set keyed by tx hash. The first
/// occurrence of an id wins; the normal and internal feeds never disagree on
/// a hash they both carry. Output keeps first-appearance order, which fixes
/// the input ordering for every stable sort downstream.
pub fn merge_streams(streams: &[Vec<CanonicalTransfer>]) -> Vec<CanonicalTransfer> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut merged = Vec::new();
    for stream in streams {
        for tx in stream {
            if seen.insert(tx.id.clone()) {
                merged.push(tx.clone());
            }
        }
    }
    merged
}

/// Split into deposits (to the watched contract) and withdrawals (from it),
/// dropping zero-value and failed transactions. Both sides re-test full
/// membership, so a self-transfer lands in both sets: they model cash flow
/// per direction, not a partition of the records.
pub fn classify(
    transfers: &[CanonicalTransfer],
    watched: &str,
) -> (Vec<CanonicalTransfer>, Vec<CanonicalTransfer>) {
    let watched = watched.to_lowercase();
    let live = |t: &&CanonicalTransfer| !t.amount.is_zero() && !t.failed;

    let inbound = transfers
        .iter()
        .filter(|t| t.to == watched)
        .filter(live)
        .cloned()
        .collect();
    let outbound = transfers
        .iter()
        .filter(|t| t.from == watched)
        .filter(live)
        .cloned()
        .collect();

    (inbound, outbound)
}

pub fn total_amount(transfers: &[CanonicalTransfer]) -> U256 {
    transfers.iter().fold(U256::zero(), |acc, t| acc + t.amount)
}

/// Inbound volume over the trailing window. `saturating_sub` keeps
/// future-dated records (upstream clock skew) inside the window instead of
/// rejecting them.
pub fn volume_window(inbound: &[CanonicalTransfer], window_secs: u64, now: u64) -> U256 {
    inbound
        .iter()
        .filter(|t| now.saturating_sub(t.timestamp) <= window_secs)
        .fold(U256::zero(), |acc, t| acc + t.amount)
}

/// One aggregate per distinct sender among the inbound set, in first-seen
/// order.
pub fn wallet_rollup(inbound: &[CanonicalTransfer]) -> Vec<WalletAggregate> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut wallets: Vec<WalletAggregate> = Vec::new();

    for tx in inbound {
        match index.get(&tx.from) {
            Some(&slot) => {
                let wallet = &mut wallets[slot];
                wallet.total_amount = wallet.total_amount + tx.amount;
                wallet.transfer_count += 1;
                wallet.last_seen = wallet.last_seen.max(tx.timestamp);
            }
            None => {
                index.insert(tx.from.clone(), wallets.len());
                wallets.push(WalletAggregate {
                    address: tx.from.clone(),
                    total_amount: tx.amount,
                    transfer_count: 1,
                    last_seen: tx.timestamp,
                });
            }
        }
    }

    wallets
}

/// Leaderboard order: total wei descending, ties by transfer count
/// descending. The sort is stable, so rows tied on both keys keep their
/// rollup order.
pub fn rank_wallets(mut wallets: Vec<WalletAggregate>) -> Vec<WalletAggregate> {
    wallets.sort_by(|a, b| {
        b.total_amount
            .cmp(&a.total_amount)
            .then(b.transfer_count.cmp(&a.transfer_count))
    });
    wallets
}

/// Newest transfers across both directions, tagged IN or OUT. Stable sort:
/// timestamp ties keep merge order.
pub fn recent_activity(
    inbound: &[CanonicalTransfer],
    outbound: &[CanonicalTransfer],
    limit: usize,
) -> Vec<RecentEntry> {
    let mut merged: Vec<RecentEntry> = inbound
        .iter()
        .map(|t| RecentEntry {
            transfer: t.clone(),
            direction: Direction::In,
        })
        .chain(outbound.iter().map(|t| RecentEntry {
            transfer: t.clone(),
            direction: Direction::Out,
        }))
        .collect();
    merged.sort_by(|a, b| b.transfer.timestamp.cmp(&a.transfer.timestamp));
    merged.truncate(limit);
    merged
}

/// Leaderboard search-box filter: case-insensitive substring match on the
/// address. An empty query returns everything.
pub fn filter_wallets(wallets: &[WalletAggregate], query: &str) -> Vec<WalletAggregate> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return wallets.to_vec();
    }
    wallets
        .iter()
        .filter(|w| w.address.contains(&query))
        .cloned()
        .collect()
}

/// One full aggregation pass: normalize each feed, merge, classify, roll up
/// and rank. Pure: the same feeds, watched address and `now` always produce
/// the same report.
pub fn build_report(streams: &[Vec<RawTransferRecord>], watched: &str, now: u64) -> BridgeReport {
    let canonical: Vec<Vec<CanonicalTransfer>> = streams
        .iter()
        .map(|stream| stream.iter().map(normalize_tx).collect())
        .collect();
    let merged = merge_streams(&canonical);
    let (inbound, outbound) = classify(&merged, watched);

    let leaderboard = rank_wallets(wallet_rollup(&inbound));
    let recent = recent_activity(&inbound, &outbound, RECENT_LIMIT);

    BridgeReport {
        total_in_wei: total_amount(&inbound),
        total_out_wei: total_amount(&outbound),
        window_volume_wei: volume_window(&inbound, DEFAULT_WINDOW_SECS, now),
        inbound_count: inbound.len(),
        outbound_count: outbound.len(),
        unique_wallets: leaderboard.len(),
        leaderboard,
        recent,
    }
}

fn parse_wei(value: &str) -> U256 {
    U256::from_dec_str(value.trim()).unwrap_or_default()
}

fn parse_timestamp(value: &str) -> u64 {
    value.trim().parse().unwrap_or(0)
}

/// # Modules Overview
///
/// This crate tracks deposits into and withdrawals out of a single bridge
/// contract. It pulls the contract's normal and internal transfer feeds from the
/// Etherscan account API, folds them into one deduplicated set, and derives
/// totals, a 24h trailing volume, a per-wallet leaderboard and a recent-activity
/// feed from the result.

/// `aggregate`
///
/// The aggregation engine. Pure functions from raw transfer records to a
/// `BridgeReport`: normalization, dedup merging, direction classification, exact
/// wei totals, trailing-window volume, per-wallet rollup, ranking and the
/// recency feed. Holds no state; every refresh recomputes from scratch.
///
/// Example usage:
/// ```rust,ignore
/// let report = aggregate::build_report(&[normal, internal], &watched, now);
/// println!("{} unique wallets", report.unique_wallets);
/// ```
pub mod aggregate;

pub mod config;

/// `csv`
///
/// Exports the ranked leaderboard as flat `{rank, address, total_wei,
/// transfer_count, last_seen}` rows via the `csv` crate.
///
/// Example usage:
/// ```rust,ignore
/// csv::export_leaderboard_csv(&report.leaderboard, "bridgers.csv")?;
/// ```
pub mod csv;

/// `format`
///
/// One-way display conversions: wei to an ETH float, address shortening,
/// timestamp formatting. Presentation only; nothing here flows back into the
/// aggregation path.
pub mod format;

/// `models`
///
/// Data types on both sides of the engine:
/// * `RawTransferRecord` / `TxListResponse` – the untrusted wire shapes.
/// * `CanonicalTransfer` – a normalized transfer, unique by hash once merged.
/// * `WalletAggregate`, `RecentEntry`, `BridgeReport` – the derived output.
/// * `LeaderboardRow` – the flat CSV export row.
pub mod models;

/// `scanner`
///
/// The retrieval layer: an Etherscan account-API client that pages through the
/// `txlist` and `txlistinternal` actions and fetches both feeds concurrently.
/// The `TransferSource` trait is the seam for substituting canned data in
/// tests.
///
/// Example usage:
/// ```rust,ignore
/// let client = EtherscanClient::new(&api_key);
/// let (normal, internal) = scanner::fetch_bridge_feeds(&client, &address).await?;
/// ```
pub mod scanner;

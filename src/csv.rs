use crate::models::{LeaderboardRow, WalletAggregate};
use csv::Writer;

/// Flattens a ranked leaderboard into export rows with 1-based ranks.
pub fn leaderboard_rows(wallets: &[WalletAggregate]) -> Vec<LeaderboardRow> {
    wallets
        .iter()
        .enumerate()
        .map(|(i, w)| LeaderboardRow {
            rank: i + 1,
            address: w.address.clone(),
            total_wei: w.total_amount.to_string(),
            transfer_count: w.transfer_count,
            last_seen: w.last_seen,
        })
        .collect()
}

pub fn export_leaderboard_csv(wallets: &[WalletAggregate], path: &str) -> csv::Result<()> {
    let mut wtr = Writer::from_path(path)?;
    for row in leaderboard_rows(wallets) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

use crate::config::{CHAIN_ID, ETHERSCAN_BASE, MAX_PAGES, PAGE_SIZE};
use crate::models::{RawTransferRecord, TxListResponse};
use async_trait::async_trait;
use log::{debug, info};
use serde_json::Value;
use std::error::Error;
use std::fmt;

/// What can go wrong between us and the account API. `Api` means the service
/// answered but rejected the request in its envelope.
#[derive(Debug)]
pub enum ScanError {
    Http(reqwest::Error),
    Api { message: String, detail: String },
    Decode(serde_json::Error),
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::Http(e) => write!(f, "request failed: {}", e),
            ScanError::Api { message, detail } => write!(f, "api error: {} ({})", message, detail),
            ScanError::Decode(e) => write!(f, "bad response shape: {}", e),
        }
    }
}

impl Error for ScanError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ScanError::Http(e) => Some(e),
            ScanError::Decode(e) => Some(e),
            ScanError::Api { .. } => None,
        }
    }
}

impl From<reqwest::Error> for ScanError {
    fn from(e: reqwest::Error) -> Self {
        ScanError::Http(e)
    }
}

/// Where the raw transfer feeds come from. Cut here so tests can feed canned
/// records instead of hitting the live API.
#[async_trait]
pub trait TransferSource {
    async fn fetch_normal(&self, address: &str) -> Result<Vec<RawTransferRecord>, ScanError>;
    async fn fetch_internal(&self, address: &str) -> Result<Vec<RawTransferRecord>, ScanError>;
}

pub struct EtherscanClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl EtherscanClient {
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url(api_key, ETHERSCAN_BASE)
    }

    pub fn with_base_url(api_key: &str, base_url: &str) -> Self {
        EtherscanClient {
            http: reqwest::Client::new(),
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Pages through one account-API action until a short page. Results come
    /// back newest first (`sort=desc`), matching the recency feed.
    async fn fetch_txlist(
        &self,
        action: &str,
        address: &str,
    ) -> Result<Vec<RawTransferRecord>, ScanError> {
        let mut all = Vec::new();

        for page in 1..=MAX_PAGES {
            let url = format!(
                "{}?chainid={}&module=account&action={}&address={}\
                 &startblock=0&endblock=99999999&page={}&offset={}&sort=desc&apikey={}",
                self.base_url, CHAIN_ID, action, address, page, PAGE_SIZE, self.api_key
            );

            let envelope: TxListResponse = self
                .http
                .get(&url)
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;

            let batch = parse_txlist(envelope)?;
            debug!("{}: page {} returned {} records", action, page, batch.len());

            let short_page = batch.len() < PAGE_SIZE;
            all.extend(batch);
            if short_page {
                break;
            }
        }

        info!("{}: fetched {} records for {}", action, all.len(), address);
        Ok(all)
    }
}

#[async_trait]
impl TransferSource for EtherscanClient {
    async fn fetch_normal(&self, address: &str) -> Result<Vec<RawTransferRecord>, ScanError> {
        self.fetch_txlist("txlist", address).await
    }

    async fn fetch_internal(&self, address: &str) -> Result<Vec<RawTransferRecord>, ScanError> {
        self.fetch_txlist("txlistinternal", address).await
    }
}

/// Fans out the normal and internal feeds concurrently and awaits both.
/// Either failure fails the whole refresh cycle; there is no partial result.
pub async fn fetch_bridge_feeds<S>(
    source: &S,
    address: &str,
) -> Result<(Vec<RawTransferRecord>, Vec<RawTransferRecord>), ScanError>
where
    S: TransferSource + Sync,
{
    futures::try_join!(source.fetch_normal(address), source.fetch_internal(address))
}

/// The account API reports "no transactions found" as a success with an empty
/// array; real failures (rate limit, invalid key) carry a string in `result`.
pub fn parse_txlist(envelope: TxListResponse) -> Result<Vec<RawTransferRecord>, ScanError> {
    match envelope.result {
        Value::Array(_) => serde_json::from_value(envelope.result).map_err(ScanError::Decode),
        Value::String(detail) => Err(ScanError::Api {
            message: envelope.message,
            detail,
        }),
        other => Err(ScanError::Api {
            message: envelope.message,
            detail: other.to_string(),
        }),
    }
}

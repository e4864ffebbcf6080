//! Wire-level record and status types.

use serde::{Deserialize, Serialize};

/// One cryptocurrency market-snapshot entry.
///
/// Every field is text on the wire and in the store, regardless of numeric
/// meaning; `id` is the lookup key. The ingestion process that writes these
/// is external, so this service never mutates them. `Default` yields the
/// zero-valued record (all fields empty), which is what a search for an
/// absent identifier returns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyRecord {
    /// Identifier, e.g. "bitcoin".
    pub id: String,
    /// Market-cap rank.
    pub rank: String,
    /// Ticker symbol, e.g. "BTC".
    pub symbol: String,
    /// Display name.
    pub name: String,
    /// Circulating supply.
    pub supply: String,
    /// Maximum supply, empty if uncapped.
    pub max_supply: String,
    /// Market capitalization in USD.
    pub market_cap_usd: String,
    /// Trailing 24h trade volume in USD.
    #[serde(rename = "volumeUsd24Hr")]
    pub volume_usd_24hr: String,
    /// Current price in USD.
    pub price_usd: String,
    /// Trailing 24h change in percent.
    #[serde(rename = "changePercent24Hr")]
    pub change_percent_24hr: String,
    /// Trailing 24h volume-weighted average price.
    #[serde(rename = "vwap24Hr")]
    pub vwap_24hr: String,
}

/// Live table status, synthesized per request from store metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableStatus {
    /// Backing table name.
    #[serde(rename = "table")]
    pub table_name: String,
    /// Item count as reported by the store's table metadata.
    #[serde(rename = "recordCount")]
    pub record_count: i64,
}

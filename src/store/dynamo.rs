//! DynamoDB-backed record store.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;

use crate::error::{Result, ServiceError};
use crate::record::{CurrencyRecord, TableStatus};

use super::RecordStore;

/// Region used when none is configured in the environment.
const DEFAULT_REGION: &str = "us-east-1";

/// DynamoDB record store.
///
/// Constructed once at startup and shared by reference into every handler;
/// the underlying SDK client multiplexes its own connection pool.
#[derive(Debug, Clone)]
pub struct DynamoStore {
    client: Client,
    table_name: String,
}

impl DynamoStore {
    /// Build a client from ambient AWS credentials and region configuration.
    pub async fn connect(table_name: &str) -> Self {
        let region = RegionProviderChain::default_provider().or_else(DEFAULT_REGION);
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(region)
            .load()
            .await;

        Self {
            client: Client::new(&config),
            table_name: table_name.to_string(),
        }
    }
}

#[async_trait]
impl RecordStore for DynamoStore {
    async fn scan_all(&self) -> Result<Vec<CurrencyRecord>> {
        let mut pages = self
            .client
            .scan()
            .table_name(&self.table_name)
            .into_paginator()
            .send();

        let mut records = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| ServiceError::store(DisplayErrorContext(e)))?;
            for item in page.items() {
                records.push(decode_item(item)?);
            }
        }

        Ok(records)
    }

    async fn find_by_id(&self, id: &str) -> Result<Vec<CurrencyRecord>> {
        // Equality filter on the identifier attribute; the table has no
        // secondary index, so this is a filtered scan like any other read.
        let result = self
            .client
            .scan()
            .table_name(&self.table_name)
            .filter_expression("#id = :name")
            .expression_attribute_names("#id", "Id")
            .expression_attribute_values(":name", AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|e| ServiceError::store(DisplayErrorContext(e)))?;

        result.items().iter().map(decode_item).collect()
    }

    async fn table_status(&self) -> Result<TableStatus> {
        let result = self
            .client
            .describe_table()
            .table_name(&self.table_name)
            .send()
            .await
            .map_err(|e| ServiceError::store(DisplayErrorContext(e)))?;

        let record_count = result
            .table()
            .and_then(|table| table.item_count())
            .unwrap_or_default();

        Ok(TableStatus {
            table_name: self.table_name.clone(),
            record_count,
        })
    }
}

/// Decode one stored item into a record.
///
/// Absent attributes decode as empty strings; a present attribute of the
/// wrong type is a decode error surfaced to the caller.
fn decode_item(item: &HashMap<String, AttributeValue>) -> Result<CurrencyRecord> {
    Ok(CurrencyRecord {
        id: string_attr(item, "Id")?,
        rank: string_attr(item, "Rank")?,
        symbol: string_attr(item, "Symbol")?,
        name: string_attr(item, "Name")?,
        supply: string_attr(item, "Supply")?,
        max_supply: string_attr(item, "MaxSupply")?,
        market_cap_usd: string_attr(item, "MarketCapUsd")?,
        volume_usd_24hr: string_attr(item, "VolumeUsd24Hr")?,
        price_usd: string_attr(item, "PriceUsd")?,
        change_percent_24hr: string_attr(item, "ChangePercent24Hr")?,
        vwap_24hr: string_attr(item, "Vwap24Hr")?,
    })
}

fn string_attr(item: &HashMap<String, AttributeValue>, key: &str) -> Result<String> {
    match item.get(key) {
        None => Ok(String::new()),
        Some(AttributeValue::S(value)) => Ok(value.clone()),
        Some(_) => Err(ServiceError::Decode(format!(
            "attribute {key} is not a string"
        ))),
    }
}

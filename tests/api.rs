//! End-to-end tests for the HTTP surface, backed by the in-memory mock store.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use serde_json::Value;
use tower::ServiceExt; // for oneshot

use crypto_server::api::{create_router, AppState};
use crypto_server::record::CurrencyRecord;
use crypto_server::store::{mock::MockConfig, MockRecordStore};
use crypto_server::telemetry::Telemetry;

fn record(id: &str, symbol: &str, price: &str) -> CurrencyRecord {
    CurrencyRecord {
        id: id.to_string(),
        symbol: symbol.to_string(),
        price_usd: price.to_string(),
        ..Default::default()
    }
}

fn app_with(store: MockRecordStore) -> axum::Router {
    let state = AppState {
        store: Arc::new(store),
        telemetry: Telemetry::new("crypto-server-test", None),
    };

    create_router(state)
}

fn seeded_store() -> MockRecordStore {
    let store = MockRecordStore::new("Maldonado-CryptoBro");
    store.insert(record("btc", "BTC", "42000.5"));
    store.insert(record("eth", "ETH", "2500.1"));
    store
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

#[tokio::test]
async fn search_returns_the_matching_record() {
    let (status, body) = get(app_with(seeded_store()), "/maldonado/search/btc").await;

    assert_eq!(status, StatusCode::OK);
    let record: CurrencyRecord = serde_json::from_slice(&body).unwrap();
    assert_eq!(record.id, "btc");
    assert_eq!(record.price_usd, "42000.5");
}

#[tokio::test]
async fn search_for_absent_id_returns_zero_valued_record() {
    let (status, body) = get(app_with(seeded_store()), "/maldonado/search/xrp").await;

    assert_eq!(status, StatusCode::OK);
    let record: CurrencyRecord = serde_json::from_slice(&body).unwrap();
    assert_eq!(record, CurrencyRecord::default());
}

#[tokio::test]
async fn search_with_multiple_matches_collapses_to_the_last_one() {
    let store = seeded_store();
    store.insert(record("btc", "XBT", "42001.0"));

    let (status, body) = get(app_with(store), "/maldonado/search/btc").await;

    assert_eq!(status, StatusCode::OK);
    let record: CurrencyRecord = serde_json::from_slice(&body).unwrap();
    assert_eq!(record.symbol, "XBT");
}

#[tokio::test]
async fn search_rejects_names_outside_the_route_constraint() {
    let (status, _) = get(app_with(seeded_store()), "/maldonado/search/btc1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn all_returns_every_record_and_matches_status_count() {
    let app = app_with(seeded_store());

    let (status, body) = get(app.clone(), "/maldonado/all").await;
    assert_eq!(status, StatusCode::OK);
    let records: Vec<CurrencyRecord> = serde_json::from_slice(&body).unwrap();
    assert_eq!(records.len(), 2);
    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert!(ids.contains(&"btc"));
    assert!(ids.contains(&"eth"));

    let (status, body) = get(app, "/maldonado/status").await;
    assert_eq!(status, StatusCode::OK);
    let status_body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(status_body["table"], "Maldonado-CryptoBro");
    assert_eq!(status_body["recordCount"], records.len() as i64);
}

#[tokio::test]
async fn all_on_empty_table_is_an_empty_array() {
    let (status, body) = get(
        app_with(MockRecordStore::new("Maldonado-CryptoBro")),
        "/maldonado/all",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(body).unwrap(), "[]");
}

#[tokio::test]
async fn store_failure_surfaces_as_500_with_raw_error_text() {
    let store = MockRecordStore::with_config(
        "Maldonado-CryptoBro",
        MockConfig {
            fail_scan: true,
            fail_find: true,
            fail_status: true,
            ..Default::default()
        },
    );
    let app = app_with(store);

    let (status, body) = get(app.clone(), "/maldonado/all").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        String::from_utf8(body).unwrap(),
        "store error: mock scan failure"
    );

    let (status, body) = get(app.clone(), "/maldonado/search/btc").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        String::from_utf8(body).unwrap(),
        "store error: mock filtered scan failure"
    );

    let (status, body) = get(app, "/maldonado/status").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(String::from_utf8(body).unwrap().contains("mock metadata failure"));
}

#[tokio::test]
async fn disallowed_methods_return_405_and_do_not_mutate() {
    let store = seeded_store();
    let app = app_with(store.clone());

    for method in ["POST", "PUT", "DELETE", "PATCH"] {
        for uri in ["/maldonado/status", "/maldonado/all", "/maldonado/search/btc"] {
            let response = app
                .clone()
                .oneshot(
                    Request::builder()
                        .method(method)
                        .uri(uri)
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(
                response.status(),
                StatusCode::METHOD_NOT_ALLOWED,
                "{method} {uri}"
            );
        }
    }

    // The store is untouched.
    let (_, body) = get(app, "/maldonado/all").await;
    let records: Vec<CurrencyRecord> = serde_json::from_slice(&body).unwrap();
    assert_eq!(records.len(), 2);
}

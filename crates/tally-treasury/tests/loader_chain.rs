//! End-to-end tests for the fallback chain against an in-process mock API.
//!
//! The mock is a `tiny_http` server on a random port that counts every
//! request it receives, so cache hits can be verified as "no new request".

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use chrono::{DateTime, TimeZone, Utc};
use pretty_assertions::assert_eq;
use tally_treasury::bundled::BUNDLED_DATA_SOURCE;
use tally_treasury::source::api::REMOTE_DATA_SOURCE;
use tally_config::TreasuryConfig;
use tally_treasury::{
    BudgetKey, BudgetLoader, BudgetSource, Clock, SnapshotStore, SourceKind, TreasuryClient,
    TreasuryError,
};
use tokio_util::sync::CancellationToken;

// Nothing listens on port 1, so connections are refused immediately.
const DEAD_API: &str = "http://127.0.0.1:1";

type Routes = dyn Fn(&str) -> (u16, String) + Send + 'static;

struct MockTreasury {
    base: String,
    hits: Arc<AtomicUsize>,
}

impl MockTreasury {
    fn spawn(routes: Box<Routes>) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("bind mock server");
        let port = server.server_addr().to_ip().expect("ip listener").port();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);

        std::thread::spawn(move || {
            for request in server.incoming_requests() {
                counter.fetch_add(1, Ordering::SeqCst);
                let (status, body) = routes(request.url());
                let response = tiny_http::Response::from_string(body)
                    .with_status_code(status)
                    .with_header(
                        tiny_http::Header::from_bytes("Content-Type", "application/json").unwrap(),
                    );
                let _ = request.respond(response);
            }
        });

        Self {
            base: format!("http://127.0.0.1:{port}"),
            hits,
        }
    }

    fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Accepts connections and reads requests but never answers them.
fn spawn_silent_server() -> String {
    let server = tiny_http::Server::http("127.0.0.1:0").expect("bind silent server");
    let port = server.server_addr().to_ip().expect("ip listener").port();
    std::thread::spawn(move || {
        let mut held = Vec::new();
        for request in server.incoming_requests() {
            held.push(request);
        }
    });
    format!("http://127.0.0.1:{port}")
}

fn healthy_routes(url: &str) -> (u16, String) {
    if url.starts_with("/treasury/budgets?") {
        (
            200,
            r#"[{"id": 42, "cityName": "Springfield", "fiscalYear": 2024, "population": 167000, "totalBudget": 50}]"#
                .to_string(),
        )
    } else if url == "/treasury/budgets/42/categories" {
        (
            200,
            r##"[{"name": "Police", "amount": 40, "color": "#123456"}, {"name": "Parks", "amount": 10}]"##
                .to_string(),
        )
    } else if url == "/treasury/cities" {
        (
            200,
            r#"[{"id": 1, "name": "Springfield", "state": "IL"}, {"id": 2, "name": "Shelbyville", "state": "IL"}]"#
                .to_string(),
        )
    } else {
        (404, "{}".to_string())
    }
}

struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(Utc.with_ymd_and_hms(2024, 9, 1, 8, 30, 0).unwrap()))
}

fn chain(api_base: &str, snapshot_dir: &Path) -> BudgetLoader {
    BudgetLoader::new(
        vec![
            BudgetSource::Api(TreasuryClient::with_http(reqwest::Client::new(), api_base)),
            BudgetSource::Snapshot(SnapshotStore::Directory(snapshot_dir.to_path_buf())),
            BudgetSource::Bundled,
        ],
        fixed_clock(),
    )
}

fn write_snapshot(dir: &Path, year: u16) {
    std::fs::write(dir.join(format!("budget-{year}.json")), snapshot_body(year)).unwrap();
}

fn snapshot_body(year: u16) -> String {
    format!(
        r##"{{
            "metadata": {{
                "cityName": "Springfield",
                "fiscalYear": {year},
                "population": 160000,
                "totalBudget": 300,
                "generatedAt": "2023-12-31T00:00:00Z",
                "hierarchy": ["department"],
                "dataSource": "budget-{year}.json"
            }},
            "categories": [
                {{"name": "Schools", "amount": 200, "color": "#aa0000"}},
                {{"name": "Roads", "amount": 100, "color": "#00aa00"}}
            ]
        }}"##
    )
}

fn key() -> BudgetKey {
    BudgetKey::new("Springfield", 2024, "operating")
}

#[tokio::test]
async fn remote_tier_assembles_budget_and_categories() {
    let api = MockTreasury::spawn(Box::new(healthy_routes));
    let dir = tempfile::tempdir().unwrap();
    let loader = chain(&api.base, dir.path());

    let data = loader.load(&key()).await;
    assert_eq!(data.metadata.data_source, REMOTE_DATA_SOURCE);
    assert_eq!(data.metadata.population, 167_000);
    assert_eq!(data.categories.len(), 2);
    assert_eq!(data.categories[0].color, "#123456");
    assert_eq!(data.metadata.generated_at, "2024-09-01T08:30:00+00:00");
    assert_eq!(api.hits(), 2);

    let labels: Vec<String> = data.per_dollar(10.0).into_iter().map(|r| r.formatted_amount).collect();
    assert_eq!(labels, vec!["$8.00", "$2.00"]);
}

#[tokio::test]
async fn second_load_is_served_from_cache() {
    let api = MockTreasury::spawn(Box::new(healthy_routes));
    let dir = tempfile::tempdir().unwrap();
    let loader = chain(&api.base, dir.path());

    let first = loader.load(&key()).await;
    let hits_after_first = api.hits();
    let second = loader.load(&key()).await;

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(api.hits(), hits_after_first);
    assert_eq!(loader.cache().entry(&key()).unwrap().source, SourceKind::Api);
}

#[tokio::test]
async fn dead_api_falls_back_to_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    write_snapshot(dir.path(), 2024);
    let loader = chain(DEAD_API, dir.path());

    let data = loader.load(&key()).await;
    assert_eq!(data.metadata.data_source, "budget-2024.json");
    assert_eq!(data.categories[0].name, "Schools");
    assert_eq!(loader.cache().entry(&key()).unwrap().source, SourceKind::Snapshot);
}

#[tokio::test]
async fn server_error_and_missing_snapshot_serve_bundled() {
    let api = MockTreasury::spawn(Box::new(|_| (500, "boom".to_string())));
    let dir = tempfile::tempdir().unwrap();
    let loader = chain(&api.base, dir.path());

    let data = loader.load(&key()).await;
    assert_eq!(data.metadata.data_source, BUNDLED_DATA_SOURCE);
    assert_eq!(loader.cache().entry(&key()).unwrap().source, SourceKind::Bundled);
}

#[tokio::test]
async fn no_matching_budget_skips_remote_tier() {
    let api = MockTreasury::spawn(Box::new(|_| (200, "[]".to_string())));
    let dir = tempfile::tempdir().unwrap();
    write_snapshot(dir.path(), 2024);
    let loader = chain(&api.base, dir.path());

    let data = loader.load(&key()).await;
    assert_eq!(data.metadata.data_source, "budget-2024.json");
    assert_eq!(api.hits(), 1);
}

#[tokio::test]
async fn budget_without_identifier_skips_remote_tier() {
    let api = MockTreasury::spawn(Box::new(|_| (200, r#"{"cityName": "Springfield"}"#.to_string())));
    let dir = tempfile::tempdir().unwrap();
    let loader = chain(&api.base, dir.path());

    let data = loader.load(&key()).await;
    assert_eq!(data.metadata.data_source, BUNDLED_DATA_SOURCE);
    assert_eq!(api.hits(), 1);
}

#[tokio::test]
async fn failing_categories_request_skips_remote_tier() {
    let api = MockTreasury::spawn(Box::new(|url| {
        if url.starts_with("/treasury/budgets?") {
            (200, r#"[{"id": 9}]"#.to_string())
        } else {
            (404, "not found".to_string())
        }
    }));
    let dir = tempfile::tempdir().unwrap();
    write_snapshot(dir.path(), 2024);
    let loader = chain(&api.base, dir.path());

    let data = loader.load(&key()).await;
    assert_eq!(data.metadata.data_source, "budget-2024.json");
    assert_eq!(api.hits(), 2);
}

#[tokio::test]
async fn malformed_response_skips_remote_tier() {
    let api = MockTreasury::spawn(Box::new(|_| (200, "<html>oops</html>".to_string())));
    let dir = tempfile::tempdir().unwrap();
    let loader = chain(&api.base, dir.path());

    let data = loader.load(&key()).await;
    assert_eq!(data.metadata.data_source, BUNDLED_DATA_SOURCE);
}

#[tokio::test]
async fn query_string_carries_city_year_and_dataset() {
    let api = MockTreasury::spawn(Box::new(|url| {
        if url == "/treasury/budgets?city=San%20Jose&year=2023&dataset=capital" {
            (200, r#"[{"id": "sj-23"}]"#.to_string())
        } else if url == "/treasury/budgets/sj-23/categories" {
            (200, r#"[{"name": "Transit", "amount": 5}]"#.to_string())
        } else {
            (404, String::new())
        }
    }));
    let dir = tempfile::tempdir().unwrap();
    let loader = chain(&api.base, dir.path());

    let data = loader.load_budget(2023, "San Jose", "capital").await;
    assert_eq!(data.metadata.data_source, REMOTE_DATA_SOURCE);
    assert_eq!(data.metadata.city_name, "San Jose");
    assert!((data.metadata.total_budget - 5.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn cities_come_from_api() {
    let api = MockTreasury::spawn(Box::new(healthy_routes));
    let dir = tempfile::tempdir().unwrap();
    let loader = chain(&api.base, dir.path());

    let cities = loader.cities().await;
    let names: Vec<&str> = cities.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Springfield", "Shelbyville"]);
}

#[tokio::test]
async fn cities_with_dead_api_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let loader = chain(DEAD_API, dir.path());
    assert!(loader.cities().await.is_empty());
}

#[tokio::test]
async fn hung_api_times_out_and_falls_through() {
    let dir = tempfile::tempdir().unwrap();
    write_snapshot(dir.path(), 2024);
    let config = TreasuryConfig {
        api_base: spawn_silent_server(),
        snapshot_dir: dir.path().display().to_string(),
        timeout_secs: 1,
        ..TreasuryConfig::default()
    };
    let loader = BudgetLoader::from_config(&config);

    let started = Instant::now();
    let data = loader.load(&key()).await;

    assert_eq!(data.metadata.data_source, "budget-2024.json");
    assert_eq!(loader.cache().entry(&key()).unwrap().source, SourceKind::Snapshot);
    assert!(started.elapsed() < Duration::from_secs(5), "took {:?}", started.elapsed());
}

#[tokio::test]
async fn cancelling_an_in_flight_load_caches_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let loader = chain(&spawn_silent_server(), dir.path());
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        trigger.cancel();
    });

    let started = Instant::now();
    let result = loader.load_cancellable(&key(), token).await;

    assert!(matches!(result, Err(TreasuryError::Cancelled)));
    assert!(started.elapsed() >= Duration::from_millis(200));
    assert!(loader.cache().is_empty());
}

#[tokio::test]
async fn remote_snapshot_host_serves_the_year_file() {
    let host = MockTreasury::spawn(Box::new(|url| {
        if url == "/static/budget-2024.json" {
            (200, snapshot_body(2024))
        } else {
            (404, String::new())
        }
    }));
    let config = TreasuryConfig {
        api_base: DEAD_API.to_string(),
        snapshot_dir: format!("{}/static/", host.base),
        ..TreasuryConfig::default()
    };
    let loader = BudgetLoader::from_config(&config);

    let data = loader.load(&key()).await;
    assert_eq!(data.metadata.data_source, "budget-2024.json");
    assert_eq!(loader.cache().entry(&key()).unwrap().source, SourceKind::Snapshot);
    assert_eq!(host.hits(), 1);

    let missing = loader.load_budget(1999, "Springfield", "operating").await;
    assert_eq!(missing.metadata.data_source, BUNDLED_DATA_SOURCE);
}

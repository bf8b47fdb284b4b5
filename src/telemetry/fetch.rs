use std::future::Future;
use std::sync::Arc;

use futures::future::join_all;
use log::{debug, warn};
use serde_json::Value;

use crate::cache::TtlCache;
use crate::telemetry::TelemetryError;
use crate::web::config::TelemetryConfig;

pub const HOURS_OF_HISTORY: u8 = 24;

/// Raw feed entries for hours 0..24; `hours[h][i]` is balloon `i`, `h` hours ago.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HourlySnapshot {
    pub hours: Vec<Vec<Value>>,
}

impl HourlySnapshot {
    pub fn current(&self) -> &[Value] {
        self.hours.first().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.hours.iter().all(Vec::is_empty)
    }
}

pub trait TelemetrySource {
    fn fetch_hour(&self, hour: u8) -> impl Future<Output = Result<Vec<Value>, TelemetryError>> + Send;
}

/// Fetch all hours concurrently. A failed hour becomes an empty entry list;
/// the result is always ordered by hour.
pub async fn fetch_snapshot<S: TelemetrySource + Sync>(source: &S) -> HourlySnapshot {
    let requests = (0..HOURS_OF_HISTORY).map(|hour| source.fetch_hour(hour));
    let results = join_all(requests).await;

    let hours = results
        .into_iter()
        .enumerate()
        .map(|(hour, result)| match result {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Telemetry for hour {:02} unavailable: {}", hour, e);
                Vec::new()
            }
        })
        .collect();

    HourlySnapshot { hours }
}

/// Client for the hourly constellation feed (`{base_url}/{hour:02}.json`).
pub struct WindborneClient {
    base_url: String,
    client: reqwest::Client,
    cache: TtlCache<(), Arc<HourlySnapshot>>,
}

impl WindborneClient {
    pub fn new(config: &TelemetryConfig) -> Result<Self, TelemetryError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            cache: TtlCache::new(config.cache_ttl),
        })
    }

    fn hour_url(&self, hour: u8) -> String {
        format!("{}/{:02}.json", self.base_url, hour)
    }

    /// Current 24-hour snapshot, served from cache while fresh.
    pub async fn snapshot(&self) -> Arc<HourlySnapshot> {
        if let Some(snapshot) = self.cache.get(&()).await {
            return snapshot;
        }

        let snapshot = Arc::new(fetch_snapshot(self).await);
        if snapshot.is_empty() {
            warn!("Telemetry feed returned no data for any hour");
        } else {
            self.cache.insert((), snapshot.clone()).await;
        }
        snapshot
    }
}

impl TelemetrySource for WindborneClient {
    async fn fetch_hour(&self, hour: u8) -> Result<Vec<Value>, TelemetryError> {
        let url = self.hour_url(hour);
        debug!("Fetching {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TelemetryError::Status {
                hour,
                status: status.as_u16(),
            });
        }

        match response.json::<Value>().await? {
            Value::Array(entries) => Ok(entries),
            _ => Err(TelemetryError::NotAnArray { hour }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use serde_json::{json, Value};

    use super::*;

    struct FakeFeed {
        calls: AtomicUsize,
    }

    impl TelemetrySource for FakeFeed {
        async fn fetch_hour(&self, hour: u8) -> Result<Vec<Value>, TelemetryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            // later hours finish first to exercise ordering
            tokio::time::sleep(Duration::from_millis(u64::from(24 - hour))).await;
            match hour {
                3 => Err(TelemetryError::Status { hour, status: 500 }),
                7 => Err(TelemetryError::NotAnArray { hour }),
                _ => Ok(vec![json!([f64::from(hour), 0.0])]),
            }
        }
    }

    #[tokio::test]
    async fn snapshot_is_ordered_and_degrades_failed_hours() {
        let feed = FakeFeed {
            calls: AtomicUsize::new(0),
        };
        let snapshot = fetch_snapshot(&feed).await;

        assert_eq!(feed.calls.load(Ordering::SeqCst), 24);
        assert_eq!(snapshot.hours.len(), 24);
        assert!(snapshot.hours[3].is_empty());
        assert!(snapshot.hours[7].is_empty());
        for hour in [0usize, 1, 12, 23] {
            assert_eq!(snapshot.hours[hour], vec![json!([hour as f64, 0.0])]);
        }
        assert_eq!(snapshot.current(), &[json!([0.0, 0.0])]);
    }

    #[test]
    fn empty_snapshot_has_no_current_hour() {
        let snapshot = HourlySnapshot::default();
        assert!(snapshot.current().is_empty());
        assert!(snapshot.is_empty());
    }

    #[test]
    fn hour_urls_are_zero_padded() {
        let config = TelemetryConfig {
            base_url: "https://feed.example/treasure/".to_string(),
            ..TelemetryConfig::default()
        };
        let client = WindborneClient::new(&config).unwrap();
        assert_eq!(client.hour_url(0), "https://feed.example/treasure/00.json");
        assert_eq!(client.hour_url(23), "https://feed.example/treasure/23.json");
    }
}

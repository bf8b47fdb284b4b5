use std::collections::BTreeMap;
use std::sync::Arc;

use log::warn;
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::cache::TtlCache;
use crate::hazards::StormError;
use crate::telemetry::geo::point_in_polygon;
use crate::web::config::StormConfig;

const DESCRIPTION_LIMIT: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Storm {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub severity: String,
    pub description: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    /// Outer ring as `[lng, lat]` pairs
    #[schema(value_type = Vec<Vec<f64>>)]
    pub polygon: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct StormData {
    pub storms: Vec<Storm>,
    pub count: usize,
    /// Storm count per alert event type
    pub regions: BTreeMap<String, usize>,
}

fn parse_ring(value: &Value) -> Option<Vec<[f64; 2]>> {
    value
        .as_array()?
        .iter()
        .map(|point| {
            let point = point.as_array()?;
            Some([point.first()?.as_f64()?, point.get(1)?.as_f64()?])
        })
        .collect()
}

fn centroid(ring: &[[f64; 2]]) -> Option<(f64, f64)> {
    if ring.is_empty() {
        return None;
    }
    let n = ring.len() as f64;
    let lng = ring.iter().map(|p| p[0]).sum::<f64>() / n;
    let lat = ring.iter().map(|p| p[1]).sum::<f64>() / n;
    Some((lat, lng))
}

fn outer_ring(geometry: &Value) -> Option<Vec<[f64; 2]>> {
    let coordinates = geometry.get("coordinates")?;
    match geometry.get("type")?.as_str()? {
        "Polygon" => parse_ring(coordinates.get(0)?),
        "MultiPolygon" => parse_ring(coordinates.get(0)?.get(0)?),
        _ => None,
    }
}

/// Convert one NOAA alert GeoJSON feature. Alerts without a usable polygon
/// cannot be placed on the map and are skipped.
pub fn parse_storm_feature(feature: &Value) -> Option<Storm> {
    let properties = feature.get("properties");
    let text = |key: &str| properties.and_then(|p| p.get(key)).and_then(Value::as_str);

    let ring = feature.get("geometry").and_then(outer_ring)?;
    let (lat, lng) = centroid(&ring)?;
    if lat == 0.0 && lng == 0.0 {
        return None;
    }

    let description = text("headline")
        .or_else(|| text("description"))
        .unwrap_or_default()
        .chars()
        .take(DESCRIPTION_LIMIT)
        .collect();

    Some(Storm {
        id: text("id").unwrap_or("unknown").to_string(),
        name: text("event").unwrap_or("Unknown Storm").to_string(),
        lat,
        lng,
        severity: text("severity").unwrap_or("Unknown").to_string(),
        description,
        start_time: text("effective").map(String::from),
        end_time: text("expires").map(String::from),
        polygon: ring,
    })
}

pub fn parse_alerts(body: &Value) -> StormData {
    let mut storms = Vec::new();
    let mut regions = BTreeMap::new();

    let features = body
        .get("features")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    for feature in features {
        if let Some(storm) = parse_storm_feature(feature) {
            *regions.entry(storm.name.clone()).or_insert(0) += 1;
            storms.push(storm);
        }
    }

    StormData {
        count: storms.len(),
        storms,
        regions,
    }
}

/// First storm whose alert polygon contains the point.
pub fn storm_at(lat: f64, lng: f64, storms: &[Storm]) -> Option<&Storm> {
    storms
        .iter()
        .find(|storm| point_in_polygon(lat, lng, &storm.polygon))
}

/// Active severe/extreme alerts from the NOAA National Weather Service (US only).
pub struct StormClient {
    alerts_url: String,
    user_agent: String,
    client: reqwest::Client,
    cache: TtlCache<(), Arc<StormData>>,
}

impl StormClient {
    pub fn new(config: &StormConfig) -> Result<Self, StormError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            alerts_url: config.alerts_url.clone(),
            user_agent: config.user_agent.clone(),
            client,
            cache: TtlCache::new(config.cache_ttl),
        })
    }

    pub async fn active_storms(&self) -> Arc<StormData> {
        if let Some(data) = self.cache.get(&()).await {
            return data;
        }

        match self.fetch().await {
            Ok(data) => {
                let data = Arc::new(data);
                self.cache.insert((), data.clone()).await;
                data
            }
            Err(e) => {
                warn!("Storm alerts unavailable: {}", e);
                Arc::new(StormData::default())
            }
        }
    }

    async fn fetch(&self) -> Result<StormData, StormError> {
        let response = self
            .client
            .get(&self.alerts_url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .header(reqwest::header::ACCEPT, "application/geo+json")
            .query(&[
                ("status", "actual"),
                ("message_type", "alert"),
                ("severity", "Severe,Extreme"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StormError::Status(status.as_u16()));
        }

        let body: Value = response.json().await?;
        Ok(parse_alerts(&body))
    }
}

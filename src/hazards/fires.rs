use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use log::{debug, error, warn};
use serde::Serialize;
use utoipa::ToSchema;

use crate::cache::TtlCache;
use crate::hazards::FireError;
use crate::telemetry::geo::approx_distance_km;
use crate::web::config::FireConfig;

const MIN_FRP_MW: f64 = 5.0;
const MIN_NUMERIC_CONFIDENCE: f64 = 50.0;
const ERROR_BODY_PREVIEW: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Fire {
    pub lat: f64,
    pub lng: f64,
    pub brightness: f64,
    pub confidence: String,
    pub acq_date: String,
    pub acq_time: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct FireData {
    pub fires: Vec<Fire>,
    pub count: usize,
    /// Fire count per 10° cell, keyed `"lat,lng"` of the cell corner.
    pub regions: BTreeMap<String, usize>,
}

impl FireData {
    pub fn from_fires(fires: Vec<Fire>) -> Self {
        let mut regions = BTreeMap::new();
        for fire in &fires {
            *regions.entry(region_key(fire.lat, fire.lng)).or_insert(0) += 1;
        }
        Self {
            count: fires.len(),
            fires,
            regions,
        }
    }
}

fn region_key(lat: f64, lng: f64) -> String {
    let cell = |v: f64| (v / 10.0).trunc() as i64 * 10;
    format!("{},{}", cell(lat), cell(lng))
}

struct Columns {
    latitude: usize,
    longitude: usize,
    brightness: Option<usize>,
    acq_date: Option<usize>,
    acq_time: Option<usize>,
    confidence: Option<usize>,
    frp: Option<usize>,
}

impl Columns {
    fn from_header(header: &csv::StringRecord) -> Option<Self> {
        let index: HashMap<String, usize> = header
            .iter()
            .enumerate()
            .map(|(i, name)| (name.trim().to_lowercase(), i))
            .collect();
        let find = |name: &str| index.get(name).copied();

        Some(Self {
            latitude: find("latitude")?,
            longitude: find("longitude")?,
            brightness: find("bright_ti4").or_else(|| find("brightness")),
            acq_date: find("acq_date"),
            acq_time: find("acq_time"),
            confidence: find("confidence"),
            frp: find("frp"),
        })
    }
}

fn is_confident(confidence: &str) -> bool {
    let lowered = confidence.trim().to_lowercase();
    matches!(lowered.as_str(), "high" | "h" | "nominal" | "n")
        || lowered
            .parse::<f64>()
            .map(|c| c >= MIN_NUMERIC_CONFIDENCE)
            .unwrap_or(false)
}

fn parse_row(row: &csv::StringRecord, columns: &Columns) -> Option<Fire> {
    let text = |column: Option<usize>| column.and_then(|i| row.get(i)).map(str::trim);
    let number = |column: Option<usize>| text(column).and_then(|v| v.parse::<f64>().ok());

    let lat = number(Some(columns.latitude))?;
    let lng = number(Some(columns.longitude))?;
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return None;
    }

    let confidence = text(columns.confidence).unwrap_or("unknown");
    if !is_confident(confidence) {
        return None;
    }
    if number(columns.frp).unwrap_or(0.0) < MIN_FRP_MW {
        return None;
    }

    Some(Fire {
        lat,
        lng,
        brightness: number(columns.brightness).unwrap_or(0.0),
        confidence: confidence.to_string(),
        acq_date: text(columns.acq_date).unwrap_or_default().to_string(),
        acq_time: text(columns.acq_time).unwrap_or_default().to_string(),
    })
}

/// Parse a FIRMS area CSV, keeping only significant, confident detections.
pub fn parse_firms_csv(body: &str) -> Result<Vec<Fire>, FireError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(body.as_bytes());

    let columns = Columns::from_header(reader.headers()?).ok_or(FireError::Header)?;

    let mut fires = Vec::new();
    let mut skipped = 0;
    for row in reader.records() {
        match row.ok().and_then(|row| parse_row(&row, &columns)) {
            Some(fire) => fires.push(fire),
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        debug!("{} FIRMS rows unparseable or below significance", skipped);
    }

    Ok(fires)
}

/// True if any fire lies within `radius_km` of the point.
pub fn is_near_fire(lat: f64, lng: f64, fires: &[Fire], radius_km: f64) -> bool {
    fires
        .iter()
        .any(|fire| approx_distance_km(lat, lng, fire.lat, fire.lng) <= radius_km)
}

/// Active wildfire detections from NASA FIRMS (VIIRS S-NPP, last 24h).
pub struct FireClient {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
    cache: TtlCache<(), Arc<FireData>>,
}

impl FireClient {
    pub fn new(config: &FireConfig) -> Result<Self, FireError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone().filter(|key| !key.is_empty()),
            client,
            cache: TtlCache::new(config.cache_ttl),
        })
    }

    /// Cached fire data; any upstream failure yields an empty set.
    pub async fn active_fires(&self) -> Arc<FireData> {
        if let Some(data) = self.cache.get(&()).await {
            return data;
        }

        match self.fetch().await {
            Ok(fires) => {
                let data = Arc::new(FireData::from_fires(fires));
                self.cache.insert((), data.clone()).await;
                data
            }
            Err(FireError::MissingApiKey) => {
                warn!("Fire data unavailable: {}", FireError::MissingApiKey);
                Arc::new(FireData::default())
            }
            Err(e) => {
                error!("Fire service error: {}", e);
                Arc::new(FireData::default())
            }
        }
    }

    async fn fetch(&self) -> Result<Vec<Fire>, FireError> {
        let api_key = self.api_key.as_deref().ok_or(FireError::MissingApiKey)?;
        let url = format!("{}/{}/VIIRS_SNPP_NRT/world/1", self.base_url, api_key);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        match status.as_u16() {
            200 => {}
            401 => return Err(FireError::InvalidApiKey),
            429 => return Err(FireError::RateLimited),
            code => {
                return Err(FireError::Status {
                    status: code,
                    body: preview(&body),
                })
            }
        }

        let body = body.trim();
        if body.starts_with("Error") || body.starts_with("Invalid") {
            return Err(FireError::Upstream(preview(body)));
        }
        if body.lines().count() <= 1 {
            return Ok(Vec::new());
        }

        parse_firms_csv(body)
    }
}

fn preview(body: &str) -> String {
    body.chars().take(ERROR_BODY_PREVIEW).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
latitude,longitude,bright_ti4,scan,track,acq_date,acq_time,satellite,instrument,confidence,version,bright_ti5,frp,daynight
-12.5,131.2,340.1,0.4,0.4,2024-08-01,0412,N,VIIRS,h,2.0NRT,290.2,25.3,D
-12.6,131.3,330.0,0.4,0.4,2024-08-01,0412,N,VIIRS,l,2.0NRT,290.2,40.0,D
38.1,-120.4,360.5,0.5,0.4,2024-08-01,2130,N,VIIRS,nominal,2.0NRT,300.1,4.9,N
38.2,-120.5,367.0,0.5,0.4,2024-08-01,2130,N,VIIRS,N,2.0NRT,300.1,12.0,N
95.0,10.0,300.0,0.5,0.4,2024-08-01,2130,N,VIIRS,h,2.0NRT,300.1,50.0,N
not-a-number,10.0,300.0,0.5,0.4,2024-08-01,2130,N,VIIRS,h,2.0NRT,300.1,50.0,N
";

    #[test]
    fn keeps_significant_confident_fires() {
        let fires = parse_firms_csv(SAMPLE).unwrap();
        assert_eq!(fires.len(), 2);

        assert_eq!(fires[0].lat, -12.5);
        assert_eq!(fires[0].brightness, 340.1);
        assert_eq!(fires[0].confidence, "h");
        assert_eq!(fires[0].acq_date, "2024-08-01");
        assert_eq!(fires[0].acq_time, "0412");

        assert_eq!(fires[1].lng, -120.5);
        assert_eq!(fires[1].confidence, "N");
    }

    #[test]
    fn numeric_confidence_and_legacy_brightness() {
        let csv = "LATITUDE,LONGITUDE,BRIGHTNESS,CONFIDENCE,FRP\n10,20,310.5,75,8.0\n10,20,310.5,49,8.0\n";
        let fires = parse_firms_csv(csv).unwrap();
        assert_eq!(fires.len(), 1);
        assert_eq!(fires[0].brightness, 310.5);
        assert_eq!(fires[0].acq_date, "");
    }

    #[test]
    fn missing_frp_is_filtered() {
        let fires = parse_firms_csv("latitude,longitude,confidence\n1,2,high\n").unwrap();
        assert!(fires.is_empty());
    }

    #[test]
    fn header_without_coordinates_is_rejected() {
        assert!(matches!(
            parse_firms_csv("lat,lon,frp\n1,2,10\n"),
            Err(FireError::Header)
        ));
    }

    #[test]
    fn regions_use_truncated_ten_degree_cells() {
        let fires = parse_firms_csv(SAMPLE).unwrap();
        let data = FireData::from_fires(fires);
        assert_eq!(data.count, 2);
        assert_eq!(data.regions.get("-10,130"), Some(&1));
        assert_eq!(data.regions.get("30,-120"), Some(&1));
        assert_eq!(region_key(-5.0, 5.0), "0,0");
    }

    #[test]
    fn proximity_uses_radius() {
        let fires = vec![Fire {
            lat: 0.0,
            lng: 1.0,
            brightness: 0.0,
            confidence: "h".to_string(),
            acq_date: String::new(),
            acq_time: String::new(),
        }];
        assert!(is_near_fire(0.0, 0.5, &fires, 60.0));
        assert!(!is_near_fire(0.0, 0.0, &fires, 50.0));
        assert!(is_near_fire(0.0, 0.0, &fires, 111.0));
        assert!(!is_near_fire(0.0, 0.0, &[], 1000.0));
    }

    #[tokio::test]
    async fn missing_key_yields_empty_data() {
        let client = FireClient::new(&FireConfig {
            api_key: None,
            ..FireConfig::default()
        })
        .unwrap();
        let data = client.active_fires().await;
        assert_eq!(*data, FireData::default());
    }
}

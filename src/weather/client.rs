use log::{debug, warn};
use serde::Deserialize;

use crate::cache::TtlCache;
use crate::predict::WindSource;
use crate::weather::{WeatherData, WeatherError, WindSample};
use crate::web::config::WeatherConfig;

#[derive(Debug, Default, Deserialize)]
struct OwmResponse {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    main: OwmMain,
    #[serde(default)]
    weather: Vec<OwmDescription>,
    #[serde(default)]
    wind: OwmWind,
    #[serde(default)]
    clouds: OwmClouds,
}

#[derive(Debug, Default, Deserialize)]
struct OwmMain {
    #[serde(default)]
    temp: f64,
    #[serde(default)]
    humidity: f64,
    #[serde(default)]
    pressure: f64,
}

#[derive(Debug, Default, Deserialize)]
struct OwmDescription {
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct OwmWind {
    #[serde(default)]
    speed: f64,
    #[serde(default)]
    deg: f64,
}

#[derive(Debug, Default, Deserialize)]
struct OwmClouds {
    #[serde(default)]
    all: f64,
}

impl OwmResponse {
    fn into_weather(self, lat: f64, lng: f64) -> WeatherData {
        let region = self
            .name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| format!("{:.2}, {:.2}", lat, lng));
        let description = self
            .weather
            .into_iter()
            .next()
            .and_then(|w| w.description)
            .unwrap_or_else(|| "Unknown".to_string());

        WeatherData {
            temperature: self.main.temp,
            humidity: self.main.humidity,
            pressure: self.main.pressure,
            description,
            wind_speed: self.wind.speed,
            wind_direction: self.wind.deg,
            clouds: self.clouds.all,
            region,
        }
    }
}

/// Current conditions from OpenWeatherMap.
pub struct WeatherClient {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
    cache: TtlCache<String, WeatherData>,
}

impl WeatherClient {
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone().filter(|key| !key.is_empty()),
            client,
            cache: TtlCache::new(config.cache_ttl),
        })
    }

    fn cache_key(lat: f64, lng: f64) -> String {
        format!("{:.2},{:.2}", lat, lng)
    }

    /// Weather at a point, or `None` if the service is unavailable.
    pub async fn weather_at(&self, lat: f64, lng: f64) -> Option<WeatherData> {
        let key = Self::cache_key(lat, lng);
        if let Some(weather) = self.cache.get(&key).await {
            return Some(weather);
        }

        match self.fetch(lat, lng).await {
            Ok(weather) => {
                self.cache.insert(key, weather.clone()).await;
                Some(weather)
            }
            Err(WeatherError::MissingApiKey) => {
                debug!("Skipping weather lookup, no API key configured");
                None
            }
            Err(e) => {
                warn!("Weather lookup at {:.2},{:.2} failed: {}", lat, lng, e);
                None
            }
        }
    }

    async fn fetch(&self, lat: f64, lng: f64) -> Result<WeatherData, WeatherError> {
        let api_key = self.api_key.as_deref().ok_or(WeatherError::MissingApiKey)?;

        let response = self
            .client
            .get(format!("{}/weather", self.base_url))
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lng.to_string()),
                ("appid", api_key.to_string()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Status(status.as_u16()));
        }

        let body: OwmResponse = response.json().await?;
        Ok(body.into_weather(lat, lng))
    }
}

impl WindSource for WeatherClient {
    async fn wind_at(&self, lat: f64, lng: f64) -> Option<WindSample> {
        self.weather_at(lat, lng).await.map(|weather| WindSample {
            lat,
            lng,
            speed: weather.wind_speed,
            direction: weather.wind_direction,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_openweathermap_payload() {
        let body = r#"{
            "name": "Reykjavik",
            "main": {"temp": 4.2, "humidity": 81, "pressure": 1002},
            "weather": [{"description": "light rain"}],
            "wind": {"speed": 9.3, "deg": 250},
            "clouds": {"all": 90}
        }"#;
        let response: OwmResponse = serde_json::from_str(body).unwrap();
        let weather = response.into_weather(64.1, -21.9);

        assert_eq!(weather.region, "Reykjavik");
        assert_eq!(weather.temperature, 4.2);
        assert_eq!(weather.humidity, 81.0);
        assert_eq!(weather.description, "light rain");
        assert_eq!(weather.wind_speed, 9.3);
        assert_eq!(weather.wind_direction, 250.0);
        assert_eq!(weather.clouds, 90.0);
    }

    #[test]
    fn sparse_payload_gets_defaults() {
        let response: OwmResponse = serde_json::from_str(r#"{"name": ""}"#).unwrap();
        let weather = response.into_weather(-12.346, 130.5);

        assert_eq!(weather.region, "-12.35, 130.50");
        assert_eq!(weather.description, "Unknown");
        assert_eq!(weather.wind_speed, 0.0);
    }

    #[tokio::test]
    async fn without_api_key_there_is_no_wind() {
        let client = WeatherClient::new(&WeatherConfig {
            api_key: None,
            ..WeatherConfig::default()
        })
        .unwrap();

        assert!(client.weather_at(10.0, 10.0).await.is_none());
        assert!(client.wind_at(10.0, 10.0).await.is_none());
    }
}

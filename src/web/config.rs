use serde::{Deserialize, Deserializer};
use std::time::Duration;
use thiserror::Error;

use crate::predict::{DEFAULT_HOURS_AHEAD, MAX_HOURS_AHEAD};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub web: WebConfig,
    pub telemetry: TelemetryConfig,
    pub weather: WeatherConfig,
    pub fires: FireConfig,
    pub storms: StormConfig,
    pub location: LocationConfig,
    pub prediction: PredictionConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    pub bind: String,
    /// Empty means any origin.
    pub cors_origins: Vec<String>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8000".to_string(),
            cors_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub base_url: String,
    #[serde(deserialize_with = "deserialize_duration")]
    pub timeout: Duration,
    #[serde(deserialize_with = "deserialize_duration")]
    pub cache_ttl: Duration,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            base_url: "https://a.windbornesystems.com/treasure".to_string(),
            timeout: Duration::from_secs(30),
            cache_ttl: Duration::from_secs(5 * 60),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    #[serde(deserialize_with = "deserialize_duration")]
    pub timeout: Duration,
    #[serde(deserialize_with = "deserialize_duration")]
    pub cache_ttl: Duration,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openweathermap.org/data/2.5".to_string(),
            api_key: None,
            timeout: Duration::from_secs(15),
            cache_ttl: Duration::from_secs(10 * 60),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FireConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    #[serde(deserialize_with = "deserialize_duration")]
    pub timeout: Duration,
    #[serde(deserialize_with = "deserialize_duration")]
    pub cache_ttl: Duration,
}

impl Default for FireConfig {
    fn default() -> Self {
        Self {
            base_url: "https://firms.modaps.eosdis.nasa.gov/api/area/csv".to_string(),
            api_key: None,
            timeout: Duration::from_secs(60),
            cache_ttl: Duration::from_secs(15 * 60),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StormConfig {
    pub alerts_url: String,
    /// api.weather.gov rejects requests without one.
    pub user_agent: String,
    #[serde(deserialize_with = "deserialize_duration")]
    pub timeout: Duration,
    #[serde(deserialize_with = "deserialize_duration")]
    pub cache_ttl: Duration,
}

impl Default for StormConfig {
    fn default() -> Self {
        Self {
            alerts_url: "https://api.weather.gov/alerts/active".to_string(),
            user_agent: "SkyDrift Balloon Tracker (contact@example.com)".to_string(),
            timeout: Duration::from_secs(30),
            cache_ttl: Duration::from_secs(10 * 60),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    #[serde(deserialize_with = "deserialize_duration")]
    pub timeout: Duration,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PredictionConfig {
    pub hours_ahead: Vec<u32>,
    pub default_count: usize,
    pub max_count: usize,
}

impl PredictionConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.hours_ahead.is_empty() {
            return Err(ConfigError::Invalid(
                "prediction.hours_ahead must not be empty".to_string(),
            ));
        }
        if let Some(hours) = self
            .hours_ahead
            .iter()
            .find(|h| !(1..=MAX_HOURS_AHEAD).contains(*h))
        {
            return Err(ConfigError::Invalid(format!(
                "prediction.hours_ahead entry {} is outside 1..={}",
                hours, MAX_HOURS_AHEAD
            )));
        }
        if self.max_count == 0 {
            return Err(ConfigError::Invalid(
                "prediction.max_count must be at least 1".to_string(),
            ));
        }
        if self.default_count == 0 || self.default_count > self.max_count {
            return Err(ConfigError::Invalid(format!(
                "prediction.default_count {} is outside 1..={}",
                self.default_count, self.max_count
            )));
        }
        Ok(())
    }
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            hours_ahead: DEFAULT_HOURS_AHEAD.to_vec(),
            default_count: 50,
            max_count: 100,
        }
    }
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    humantime::parse_duration(s.trim()).map_err(serde::de::Error::custom)
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn from_str(yaml: &str) -> Result<Self, ConfigError> {
        // serde_yaml reads an empty document as null
        if yaml.trim().is_empty() {
            return Ok(Config::default());
        }
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.prediction.validate()
    }

    /// Reads `path` when given, then applies API keys from the environment.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Config::default(),
        };
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let keys = [
            ("OPENWEATHERMAP_API_KEY", &mut self.weather.api_key),
            ("NASA_FIRMS_API_KEY", &mut self.fires.api_key),
            ("OPENAI_API_KEY", &mut self.location.api_key),
        ];
        for (name, slot) in keys {
            if let Some(value) = lookup(name).filter(|v| !v.trim().is_empty()) {
                *slot = Some(value);
            }
        }
    }
}

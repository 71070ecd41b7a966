use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::weather::WeatherForecast;

/// Body of `GET /` on every service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStatusDto {
    pub service: String,
    pub status: String,
    pub timestamp: NaiveDateTime,
}

impl ServiceStatusDto {
    pub fn running(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            status: "Running".to_string(),
            timestamp: chrono::Utc::now().naive_utc(),
        }
    }
}

/// Body of `GET /health` on every service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
}

impl HealthDto {
    pub fn healthy() -> Self {
        Self {
            status: "Healthy".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherForecastDto {
    pub date: NaiveDate,
    pub temperature_c: i32,
    pub temperature_f: i32,
    pub summary: Option<String>,
}

impl From<WeatherForecast> for WeatherForecastDto {
    fn from(value: WeatherForecast) -> Self {
        Self {
            temperature_f: value.temperature_f(),
            date: value.date,
            temperature_c: value.temperature_c,
            summary: value.summary,
        }
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Summaries picked at random for demo forecasts.
pub const SUMMARIES: [&str; 10] = [
    "Freezing",
    "Bracing",
    "Chilly",
    "Cool",
    "Mild",
    "Warm",
    "Balmy",
    "Hot",
    "Sweltering",
    "Scorching",
];

/// Daily demo forecast.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherForecast {
    pub date: NaiveDate,
    pub temperature_c: i32,
    pub summary: Option<String>,
}

impl WeatherForecast {
    pub fn new(date: NaiveDate, temperature_c: i32, summary: Option<String>) -> Self {
        Self {
            date,
            temperature_c,
            summary,
        }
    }

    /// Fahrenheit reading, truncated toward zero.
    pub fn temperature_f(&self) -> i32 {
        32 + (f64::from(self.temperature_c) * 9.0 / 5.0) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forecast(temperature_c: i32) -> WeatherForecast {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
        WeatherForecast::new(date, temperature_c, None)
    }

    #[test]
    fn fahrenheit_is_derived_from_celsius() {
        assert_eq!(forecast(0).temperature_f(), 32);
        assert_eq!(forecast(100).temperature_f(), 212);
        assert_eq!(forecast(-40).temperature_f(), -40);
        assert_eq!(forecast(25).temperature_f(), 77);
        assert_eq!(forecast(-1).temperature_f(), 31);
    }
}

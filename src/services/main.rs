use chrono::{Days, NaiveDate};
use rand::Rng;

use crate::domain::weather::{SUMMARIES, WeatherForecast};
use crate::dto::status::{HealthDto, ServiceStatusDto, WeatherForecastDto};

/// Number of days covered by the demo forecast.
pub const FORECAST_DAYS: u64 = 5;
/// Lowest temperature (inclusive) the demo forecast may report.
pub const MIN_TEMPERATURE_C: i32 = -20;
/// Highest temperature (exclusive) the demo forecast may report.
pub const MAX_TEMPERATURE_C: i32 = 55;

/// Status body reported by a service's root endpoint.
pub fn service_status(service: &str) -> ServiceStatusDto {
    ServiceStatusDto::running(service)
}

pub fn health() -> HealthDto {
    HealthDto::healthy()
}

/// Builds forecasts for the days following `today`.
pub fn forecast_from<R>(today: NaiveDate, rng: &mut R) -> Vec<WeatherForecast>
where
    R: Rng + ?Sized,
{
    (1..=FORECAST_DAYS)
        .filter_map(|offset| today.checked_add_days(Days::new(offset)))
        .map(|date| {
            let temperature_c = rng.gen_range(MIN_TEMPERATURE_C..MAX_TEMPERATURE_C);
            let summary = SUMMARIES[rng.gen_range(0..SUMMARIES.len())];
            WeatherForecast::new(date, temperature_c, Some(summary.to_string()))
        })
        .collect()
}

/// Five-day demo forecast starting tomorrow.
pub fn weather_forecast() -> Vec<WeatherForecastDto> {
    let today = chrono::Utc::now().date_naive();
    forecast_from(today, &mut rand::thread_rng())
        .into_iter()
        .map(WeatherForecastDto::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn status_reports_running_service() {
        let status = service_status("api");
        assert_eq!(status.service, "api");
        assert_eq!(status.status, "Running");
        assert_eq!(health().status, "Healthy");
    }

    #[test]
    fn forecast_covers_next_five_days() {
        let today = NaiveDate::from_ymd_opt(2024, 12, 30).expect("valid date");
        let mut rng = StdRng::seed_from_u64(11);

        let forecasts = forecast_from(today, &mut rng);

        assert_eq!(forecasts.len(), 5);
        assert_eq!(
            forecasts[0].date,
            NaiveDate::from_ymd_opt(2024, 12, 31).expect("valid date")
        );
        assert_eq!(
            forecasts[4].date,
            NaiveDate::from_ymd_opt(2025, 1, 4).expect("valid date")
        );
    }

    #[test]
    fn forecast_values_stay_in_range() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date");
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..100 {
            for forecast in forecast_from(today, &mut rng) {
                assert!((MIN_TEMPERATURE_C..MAX_TEMPERATURE_C).contains(&forecast.temperature_c));
                let summary = forecast.summary.as_deref().expect("summary set");
                assert!(SUMMARIES.contains(&summary));
            }
        }
    }

    #[test]
    fn dto_carries_fahrenheit() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date");
        let mut rng = StdRng::seed_from_u64(9);

        for forecast in forecast_from(today, &mut rng) {
            let expected = forecast.temperature_f();
            let dto = WeatherForecastDto::from(forecast);
            assert_eq!(dto.temperature_f, expected);
        }
    }
}

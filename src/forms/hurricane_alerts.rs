use chrono::NaiveDateTime;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::hurricane_alert::{MAX_CATEGORY, MIN_CATEGORY, SeverityLevel};
use crate::dto::hurricane_alerts::CreateHurricaneAlertDto;
use crate::forms::{empty_string_as_none, sanitize_inline_text};

/// Format produced by `<input type="datetime-local">`.
const LANDFALL_FORMAT: &str = "%Y-%m-%dT%H:%M";

pub type HurricaneAlertFormResult<T> = Result<T, HurricaneAlertFormError>;

#[derive(Debug, Error)]
pub enum HurricaneAlertFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("unknown severity `{0}`")]
    InvalidSeverity(String),
    #[error("invalid landfall time `{0}`")]
    InvalidLandfall(String),
}

/// Payload of the "New alert" form.
#[derive(Debug, Deserialize, Validate)]
pub struct AddHurricaneAlertForm {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = MIN_CATEGORY, max = MAX_CATEGORY))]
    pub category: i32,
    #[validate(range(exclusive_min = 0.0))]
    pub wind_speed_mph: f64,
    #[validate(length(min = 1, max = 200))]
    pub location: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    /// Severity name such as `High`.
    pub severity: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub expected_landfall: Option<String>,
}

impl AddHurricaneAlertForm {
    pub fn into_create_dto(self) -> HurricaneAlertFormResult<CreateHurricaneAlertDto> {
        self.validate()?;

        let severity: SeverityLevel = self
            .severity
            .parse()
            .map_err(|_| HurricaneAlertFormError::InvalidSeverity(self.severity.clone()))?;

        let expected_landfall = match self.expected_landfall.as_deref() {
            Some(value) => Some(
                NaiveDateTime::parse_from_str(value.trim(), LANDFALL_FORMAT)
                    .map_err(|_| HurricaneAlertFormError::InvalidLandfall(value.to_string()))?,
            ),
            None => None,
        };

        Ok(CreateHurricaneAlertDto {
            name: sanitize_inline_text(&self.name),
            category: self.category,
            wind_speed_mph: self.wind_speed_mph,
            location: sanitize_inline_text(&self.location),
            description: self.description.map(|value| value.trim().to_string()),
            severity,
            expected_landfall,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn form() -> AddHurricaneAlertForm {
        AddHurricaneAlertForm {
            name: " Hurricane  Oscar ".to_string(),
            category: 3,
            wind_speed_mph: 120.0,
            location: "Bahamas".to_string(),
            description: None,
            severity: "high".to_string(),
            expected_landfall: Some("2024-10-20T18:30".to_string()),
        }
    }

    #[test]
    fn converts_valid_form() {
        let dto = form().into_create_dto().expect("valid form");

        assert_eq!(dto.name, "Hurricane Oscar");
        assert_eq!(dto.severity, SeverityLevel::High);
        let expected = NaiveDate::from_ymd_opt(2024, 10, 20)
            .and_then(|date| date.and_hms_opt(18, 30, 0))
            .expect("valid timestamp");
        assert_eq!(dto.expected_landfall, Some(expected));
    }

    #[test]
    fn rejects_out_of_range_category() {
        let mut bad = form();
        bad.category = 6;
        assert!(matches!(
            bad.into_create_dto(),
            Err(HurricaneAlertFormError::Validation(_))
        ));
    }

    #[test]
    fn rejects_unknown_severity() {
        let mut bad = form();
        bad.severity = "Extreme".to_string();
        assert!(matches!(
            bad.into_create_dto(),
            Err(HurricaneAlertFormError::InvalidSeverity(_))
        ));
    }

    #[test]
    fn rejects_malformed_landfall() {
        let mut bad = form();
        bad.expected_landfall = Some("tomorrow".to_string());
        assert!(matches!(
            bad.into_create_dto(),
            Err(HurricaneAlertFormError::InvalidLandfall(_))
        ));
    }
}

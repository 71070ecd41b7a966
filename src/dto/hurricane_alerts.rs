use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::hurricane_alert::{
    HurricaneAlert, MAX_CATEGORY, MIN_CATEGORY, NewHurricaneAlert, SeverityLevel,
    UpdateHurricaneAlert, round_wind_speed,
};

/// Maximum allowed length for an alert name.
const NAME_MAX_LEN: u64 = 100;
/// Maximum allowed length for an alert location.
const LOCATION_MAX_LEN: u64 = 200;
/// Maximum allowed length for an alert description.
const DESCRIPTION_MAX_LEN: u64 = 1000;

/// Result type returned by the alert DTO helpers.
pub type HurricaneAlertDtoResult<T> = Result<T, HurricaneAlertDtoError>;

/// Field rules broken by a create or update body.
#[derive(Debug, Error)]
pub enum HurricaneAlertDtoError {
    #[error("Hurricane name is required")]
    MissingName,
    #[error("Hurricane category must be between 1 and 5")]
    CategoryOutOfRange,
    #[error("Wind speed must be greater than 0")]
    NonPositiveWindSpeed,
    #[error("Location is required")]
    MissingLocation,
    /// Column limits enforced through the `validator` crate.
    #[error("{0}")]
    Validation(#[from] ValidationErrors),
}

/// Rules shared by create and update bodies, checked in the order clients see them.
/// Returns the wind speed as it will be stored.
fn check_alert_fields(
    name: &str,
    category: i32,
    wind_speed_mph: f64,
    location: &str,
) -> HurricaneAlertDtoResult<f64> {
    if name.trim().is_empty() {
        return Err(HurricaneAlertDtoError::MissingName);
    }
    if !(MIN_CATEGORY..=MAX_CATEGORY).contains(&category) {
        return Err(HurricaneAlertDtoError::CategoryOutOfRange);
    }
    let wind_speed_mph = round_wind_speed(wind_speed_mph);
    if wind_speed_mph.is_nan() || wind_speed_mph <= 0.0 {
        return Err(HurricaneAlertDtoError::NonPositiveWindSpeed);
    }
    if location.trim().is_empty() {
        return Err(HurricaneAlertDtoError::MissingLocation);
    }
    Ok(wind_speed_mph)
}

/// Request body accepted by `POST /api/hurricane-alerts`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateHurricaneAlertDto {
    #[validate(length(
        max = NAME_MAX_LEN,
        message = "Hurricane name must be at most 100 characters"
    ))]
    pub name: String,
    pub category: i32,
    pub wind_speed_mph: f64,
    #[validate(length(
        max = LOCATION_MAX_LEN,
        message = "Location must be at most 200 characters"
    ))]
    pub location: String,
    #[validate(length(
        max = DESCRIPTION_MAX_LEN,
        message = "Description must be at most 1000 characters"
    ))]
    pub description: Option<String>,
    pub severity: SeverityLevel,
    pub expected_landfall: Option<NaiveDateTime>,
}

impl Default for CreateHurricaneAlertDto {
    fn default() -> Self {
        Self {
            name: String::new(),
            category: MIN_CATEGORY,
            wind_speed_mph: 0.0,
            location: String::new(),
            description: None,
            severity: SeverityLevel::default(),
            expected_landfall: None,
        }
    }
}

impl CreateHurricaneAlertDto {
    /// Validates the payload and converts it into a domain `NewHurricaneAlert`.
    pub fn into_new_alert(self) -> HurricaneAlertDtoResult<NewHurricaneAlert> {
        let wind_speed_mph = check_alert_fields(
            &self.name,
            self.category,
            self.wind_speed_mph,
            &self.location,
        )?;
        self.validate()?;

        Ok(
            NewHurricaneAlert::new(self.name, self.category, wind_speed_mph, self.location)
                .with_description(self.description.unwrap_or_default())
                .with_severity(self.severity)
                .with_expected_landfall(self.expected_landfall),
        )
    }
}

/// Request body accepted by `PUT /api/hurricane-alerts/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateHurricaneAlertDto {
    /// Must match the id in the request path.
    pub id: i32,
    #[validate(length(
        max = NAME_MAX_LEN,
        message = "Hurricane name must be at most 100 characters"
    ))]
    pub name: String,
    pub category: i32,
    pub wind_speed_mph: f64,
    #[validate(length(
        max = LOCATION_MAX_LEN,
        message = "Location must be at most 200 characters"
    ))]
    pub location: String,
    #[validate(length(
        max = DESCRIPTION_MAX_LEN,
        message = "Description must be at most 1000 characters"
    ))]
    pub description: String,
    pub severity: SeverityLevel,
    pub is_active: bool,
    pub expected_landfall: Option<NaiveDateTime>,
}

impl Default for UpdateHurricaneAlertDto {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            category: MIN_CATEGORY,
            wind_speed_mph: 0.0,
            location: String::new(),
            description: String::new(),
            severity: SeverityLevel::default(),
            is_active: true,
            expected_landfall: None,
        }
    }
}

impl UpdateHurricaneAlertDto {
    /// Validates the payload and converts it into a full domain update.
    pub fn into_update(
        self,
        updated_at: NaiveDateTime,
    ) -> HurricaneAlertDtoResult<UpdateHurricaneAlert> {
        let wind_speed_mph = check_alert_fields(
            &self.name,
            self.category,
            self.wind_speed_mph,
            &self.location,
        )?;
        self.validate()?;

        Ok(UpdateHurricaneAlert {
            name: self.name,
            category: self.category,
            wind_speed_mph,
            location: self.location,
            description: self.description,
            severity: self.severity,
            is_active: self.is_active,
            expected_landfall: self.expected_landfall,
            updated_at,
        })
    }
}

/// Alert projection returned by the API, including derived display fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HurricaneAlertResponseDto {
    pub id: i32,
    pub name: String,
    pub category: i32,
    pub wind_speed_mph: f64,
    pub wind_speed_kmh: f64,
    pub location: String,
    pub description: String,
    pub severity: SeverityLevel,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub expected_landfall: Option<NaiveDateTime>,
    pub category_color: String,
    pub severity_badge_class: String,
}

impl From<HurricaneAlert> for HurricaneAlertResponseDto {
    fn from(value: HurricaneAlert) -> Self {
        let wind_speed_kmh = value.wind_speed_kmh();
        let category_color = value.category_color().to_string();
        let severity_badge_class = value.severity_badge_class().to_string();
        Self {
            id: value.id,
            name: value.name,
            category: value.category,
            wind_speed_mph: value.wind_speed_mph,
            wind_speed_kmh,
            location: value.location,
            description: value.description,
            severity: value.severity,
            is_active: value.is_active,
            created_at: value.created_at,
            updated_at: value.updated_at,
            expected_landfall: value.expected_landfall,
            category_color,
            severity_badge_class,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_create() -> CreateHurricaneAlertDto {
        CreateHurricaneAlertDto {
            name: "Hurricane Alpha".to_string(),
            category: 3,
            wind_speed_mph: 120.0,
            location: "Gulf of Mexico".to_string(),
            description: Some("Prepare for storm surge".to_string()),
            severity: SeverityLevel::High,
            expected_landfall: None,
        }
    }

    fn fixed_datetime() -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2024, 10, 14)
            .and_then(|date| date.and_hms_opt(12, 0, 0))
            .expect("valid timestamp")
    }

    #[test]
    fn create_dto_builds_active_alert() {
        let alert = valid_create()
            .into_new_alert()
            .expect("expected conversion to succeed");

        assert_eq!(alert.name, "Hurricane Alpha");
        assert_eq!(alert.severity, SeverityLevel::High);
        assert_eq!(alert.description, "Prepare for storm surge");
        assert!(alert.is_active);
    }

    #[test]
    fn create_dto_defaults_missing_description_to_empty() {
        let dto = CreateHurricaneAlertDto {
            description: None,
            ..valid_create()
        };

        let alert = dto.into_new_alert().expect("expected conversion to succeed");
        assert_eq!(alert.description, "");
    }

    #[test]
    fn create_dto_rejects_blank_name() {
        let dto = CreateHurricaneAlertDto {
            name: "   ".to_string(),
            ..valid_create()
        };

        let err = dto.into_new_alert().expect_err("expected validation error");
        assert!(matches!(err, HurricaneAlertDtoError::MissingName));
        assert_eq!(err.to_string(), "Hurricane name is required");
    }

    #[test]
    fn create_dto_rejects_categories_outside_scale() {
        for category in [0, 6, -1] {
            let dto = CreateHurricaneAlertDto {
                category,
                ..valid_create()
            };
            let err = dto.into_new_alert().expect_err("expected validation error");
            assert!(matches!(err, HurricaneAlertDtoError::CategoryOutOfRange));
        }
    }

    #[test]
    fn create_dto_rejects_non_positive_wind_speed() {
        for wind_speed_mph in [0.0, -10.0] {
            let dto = CreateHurricaneAlertDto {
                wind_speed_mph,
                ..valid_create()
            };
            let err = dto.into_new_alert().expect_err("expected validation error");
            assert!(matches!(err, HurricaneAlertDtoError::NonPositiveWindSpeed));
        }
    }

    #[test]
    fn create_dto_rejects_wind_speed_that_rounds_to_zero() {
        let dto = CreateHurricaneAlertDto {
            wind_speed_mph: 0.004,
            ..valid_create()
        };
        let err = dto.into_new_alert().expect_err("expected validation error");
        assert!(matches!(err, HurricaneAlertDtoError::NonPositiveWindSpeed));
    }

    #[test]
    fn create_dto_stores_rounded_wind_speed() {
        let dto = CreateHurricaneAlertDto {
            wind_speed_mph: 0.006,
            ..valid_create()
        };
        let alert = dto.into_new_alert().expect("expected conversion to succeed");
        assert_eq!(alert.wind_speed_mph, 0.01);
    }

    #[test]
    fn update_dto_rejects_wind_speed_that_rounds_to_zero() {
        let dto = UpdateHurricaneAlertDto {
            id: 1,
            name: "Milton".to_string(),
            category: 4,
            wind_speed_mph: 0.004,
            location: "Florida".to_string(),
            ..UpdateHurricaneAlertDto::default()
        };

        let err = dto
            .into_update(fixed_datetime())
            .expect_err("expected validation error");
        assert!(matches!(err, HurricaneAlertDtoError::NonPositiveWindSpeed));
    }

    #[test]
    fn create_dto_rejects_blank_location() {
        let dto = CreateHurricaneAlertDto {
            location: String::new(),
            ..valid_create()
        };

        let err = dto.into_new_alert().expect_err("expected validation error");
        assert!(matches!(err, HurricaneAlertDtoError::MissingLocation));
    }

    #[test]
    fn create_dto_enforces_column_limits() {
        let dto = CreateHurricaneAlertDto {
            name: "x".repeat(101),
            ..valid_create()
        };

        let err = dto.into_new_alert().expect_err("expected validation error");
        match err {
            HurricaneAlertDtoError::Validation(errors) => {
                assert!(errors.field_errors().contains_key("name"));
            }
            other => panic!("expected length error, got {other:?}"),
        }
    }

    #[test]
    fn create_dto_uses_defaults_for_missing_json_fields() {
        let dto: CreateHurricaneAlertDto =
            serde_json::from_str(r#"{"name":"Beta","windSpeedMph":80,"location":"Atlantic"}"#)
                .expect("valid json");

        assert_eq!(dto.category, 1);
        assert_eq!(dto.severity, SeverityLevel::Medium);
        assert!(dto.expected_landfall.is_none());
    }

    #[test]
    fn update_dto_validates_location() {
        let dto = UpdateHurricaneAlertDto {
            id: 1,
            name: "Milton".to_string(),
            category: 4,
            wind_speed_mph: 150.0,
            location: " ".to_string(),
            ..UpdateHurricaneAlertDto::default()
        };

        let err = dto
            .into_update(fixed_datetime())
            .expect_err("expected validation error");
        assert!(matches!(err, HurricaneAlertDtoError::MissingLocation));
    }

    #[test]
    fn update_dto_builds_full_replacement() {
        let dto = UpdateHurricaneAlertDto {
            id: 1,
            name: "Milton".to_string(),
            category: 5,
            wind_speed_mph: 165.0,
            location: "Florida".to_string(),
            description: "Landfall imminent".to_string(),
            severity: SeverityLevel::Critical,
            is_active: false,
            expected_landfall: Some(fixed_datetime()),
        };

        let update = dto
            .into_update(fixed_datetime())
            .expect("expected conversion to succeed");

        assert_eq!(update.category, 5);
        assert_eq!(update.severity, SeverityLevel::Critical);
        assert!(!update.is_active);
        assert_eq!(update.updated_at, fixed_datetime());
        assert_eq!(update.expected_landfall, Some(fixed_datetime()));
    }

    #[test]
    fn response_dto_carries_derived_fields() {
        let alert = HurricaneAlert {
            id: 7,
            name: "Hurricane Milton".to_string(),
            category: 4,
            wind_speed_mph: 150.0,
            location: "Gulf of Mexico".to_string(),
            description: String::new(),
            severity: SeverityLevel::Critical,
            is_active: true,
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
            expected_landfall: None,
        };

        let dto = HurricaneAlertResponseDto::from(alert);

        assert!((dto.wind_speed_kmh - 241.401).abs() < 1e-9);
        assert_eq!(dto.category_color, "#FF6B6B");
        assert_eq!(dto.severity_badge_class, "badge-dark");

        let json = serde_json::to_value(&dto).expect("serializable");
        assert_eq!(json["severity"], "Critical");
        assert_eq!(json["isActive"], true);
        assert_eq!(json["categoryColor"], "#FF6B6B");
    }
}

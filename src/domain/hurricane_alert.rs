use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Kilometres per hour in one mile per hour.
pub const KMH_PER_MPH: f64 = 1.60934;

/// Lowest category on the Saffir-Simpson scale.
pub const MIN_CATEGORY: i32 = 1;
/// Highest category on the Saffir-Simpson scale.
pub const MAX_CATEGORY: i32 = 5;

/// Color shown for categories outside the Saffir-Simpson scale.
pub const DEFAULT_CATEGORY_COLOR: &str = "#ADB5BD";

/// Triage level used to order alerts; stored as its integer discriminant.
#[derive(
    Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
pub enum SeverityLevel {
    Low = 1,
    #[default]
    Medium = 2,
    High = 3,
    Critical = 4,
}

impl SeverityLevel {
    pub const ALL: [SeverityLevel; 4] = [
        SeverityLevel::Low,
        SeverityLevel::Medium,
        SeverityLevel::High,
        SeverityLevel::Critical,
    ];

    /// CSS badge class used by the front end.
    pub fn badge_class(self) -> &'static str {
        match self {
            SeverityLevel::Low => "badge-success",
            SeverityLevel::Medium => "badge-warning",
            SeverityLevel::High => "badge-danger",
            SeverityLevel::Critical => "badge-dark",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SeverityLevel::Low => "Low",
            SeverityLevel::Medium => "Medium",
            SeverityLevel::High => "High",
            SeverityLevel::Critical => "Critical",
        }
    }
}

impl From<SeverityLevel> for i32 {
    fn from(value: SeverityLevel) -> Self {
        value as i32
    }
}

impl From<i32> for SeverityLevel {
    /// Unknown stored values fall back to the default level.
    fn from(value: i32) -> Self {
        match value {
            1 => SeverityLevel::Low,
            3 => SeverityLevel::High,
            4 => SeverityLevel::Critical,
            _ => SeverityLevel::Medium,
        }
    }
}

impl std::str::FromStr for SeverityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SeverityLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown severity level `{s}`"))
    }
}

impl std::fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display color for a hurricane category.
pub fn category_color(category: i32) -> &'static str {
    match category {
        1 => "#74C0FC",
        2 => "#FFE066",
        3 => "#FFB347",
        4 => "#FF6B6B",
        5 => "#DA77F2",
        _ => DEFAULT_CATEGORY_COLOR,
    }
}

/// Wind speeds are kept with two decimal places.
pub fn round_wind_speed(mph: f64) -> f64 {
    (mph * 100.0).round() / 100.0
}

/// Convert a wind speed from miles to kilometres per hour.
pub fn mph_to_kmh(mph: f64) -> f64 {
    mph * KMH_PER_MPH
}

/// Domain representation of a hurricane alert.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HurricaneAlert {
    pub id: i32,
    /// Storm name, e.g. "Hurricane Milton".
    pub name: String,
    /// Saffir-Simpson category.
    pub category: i32,
    /// Maximum sustained wind speed in miles per hour.
    pub wind_speed_mph: f64,
    /// Current location or projected path.
    pub location: String,
    pub description: String,
    pub severity: SeverityLevel,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub expected_landfall: Option<NaiveDateTime>,
}

impl HurricaneAlert {
    pub fn wind_speed_kmh(&self) -> f64 {
        mph_to_kmh(self.wind_speed_mph)
    }

    pub fn category_color(&self) -> &'static str {
        category_color(self.category)
    }

    pub fn severity_badge_class(&self) -> &'static str {
        self.severity.badge_class()
    }
}

/// Payload required to insert a new alert. New alerts start active.
#[derive(Debug, Clone, PartialEq)]
pub struct NewHurricaneAlert {
    pub name: String,
    pub category: i32,
    pub wind_speed_mph: f64,
    pub location: String,
    pub description: String,
    pub severity: SeverityLevel,
    pub is_active: bool,
    pub expected_landfall: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl NewHurricaneAlert {
    /// Build an active alert with default severity stamped with the current time.
    pub fn new(
        name: impl Into<String>,
        category: i32,
        wind_speed_mph: f64,
        location: impl Into<String>,
    ) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            name: name.into(),
            category,
            wind_speed_mph,
            location: location.into(),
            description: String::new(),
            severity: SeverityLevel::default(),
            is_active: true,
            expected_landfall: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_severity(mut self, severity: SeverityLevel) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_expected_landfall(mut self, expected_landfall: Option<NaiveDateTime>) -> Self {
        self.expected_landfall = expected_landfall;
        self
    }

    pub fn with_created_at(mut self, created_at: NaiveDateTime) -> Self {
        self.created_at = created_at;
        self.updated_at = created_at;
        self
    }
}

/// Full replacement of an alert's mutable fields.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateHurricaneAlert {
    pub name: String,
    pub category: i32,
    pub wind_speed_mph: f64,
    pub location: String,
    pub description: String,
    pub severity: SeverityLevel,
    pub is_active: bool,
    pub expected_landfall: Option<NaiveDateTime>,
    /// Timestamp captured when the update was built.
    pub updated_at: NaiveDateTime,
}

/// Sort order applied when listing alerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HurricaneAlertOrder {
    /// Most recently created first.
    #[default]
    NewestFirst,
    /// Highest severity first, ties broken by highest category.
    MostSevereFirst,
}

/// Query definition used to list alerts.
#[derive(Debug, Clone, Default)]
pub struct HurricaneAlertListQuery {
    /// Restrict results to alerts with this active flag.
    pub is_active: Option<bool>,
    pub order: HurricaneAlertOrder,
}

impl HurricaneAlertListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only active alerts ordered by severity then category, both descending.
    pub fn active() -> Self {
        Self::new()
            .is_active(true)
            .order(HurricaneAlertOrder::MostSevereFirst)
    }

    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    pub fn order(mut self, order: HurricaneAlertOrder) -> Self {
        self.order = order;
        self
    }
}

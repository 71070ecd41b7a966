use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::hurricane_alert::{
    HurricaneAlert as DomainHurricaneAlert, NewHurricaneAlert as DomainNewHurricaneAlert,
    UpdateHurricaneAlert as DomainUpdateHurricaneAlert, round_wind_speed,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::hurricane_alerts)]
pub struct HurricaneAlert {
    pub id: i32,
    pub name: String,
    pub category: i32,
    pub wind_speed_mph: f64,
    pub location: String,
    pub description: String,
    pub severity: i32,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub expected_landfall: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::hurricane_alerts)]
pub struct NewHurricaneAlert<'a> {
    pub name: &'a str,
    pub category: i32,
    pub wind_speed_mph: f64,
    pub location: &'a str,
    pub description: &'a str,
    pub severity: i32,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub expected_landfall: Option<NaiveDateTime>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::hurricane_alerts)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateHurricaneAlert<'a> {
    pub name: &'a str,
    pub category: i32,
    pub wind_speed_mph: f64,
    pub location: &'a str,
    pub description: &'a str,
    pub severity: i32,
    pub is_active: bool,
    pub expected_landfall: Option<NaiveDateTime>,
    pub updated_at: NaiveDateTime,
}

impl From<HurricaneAlert> for DomainHurricaneAlert {
    fn from(value: HurricaneAlert) -> Self {
        Self {
            id: value.id,
            name: value.name,
            category: value.category,
            wind_speed_mph: value.wind_speed_mph,
            location: value.location,
            description: value.description,
            severity: value.severity.into(),
            is_active: value.is_active,
            created_at: value.created_at,
            updated_at: value.updated_at,
            expected_landfall: value.expected_landfall,
        }
    }
}

impl<'a> From<&'a DomainNewHurricaneAlert> for NewHurricaneAlert<'a> {
    fn from(value: &'a DomainNewHurricaneAlert) -> Self {
        Self {
            name: value.name.as_str(),
            category: value.category,
            wind_speed_mph: round_wind_speed(value.wind_speed_mph),
            location: value.location.as_str(),
            description: value.description.as_str(),
            severity: value.severity.into(),
            is_active: value.is_active,
            created_at: value.created_at,
            updated_at: value.updated_at,
            expected_landfall: value.expected_landfall,
        }
    }
}

impl<'a> From<&'a DomainUpdateHurricaneAlert> for UpdateHurricaneAlert<'a> {
    fn from(value: &'a DomainUpdateHurricaneAlert) -> Self {
        Self {
            name: value.name.as_str(),
            category: value.category,
            wind_speed_mph: round_wind_speed(value.wind_speed_mph),
            location: value.location.as_str(),
            description: value.description.as_str(),
            severity: value.severity.into(),
            is_active: value.is_active,
            expected_landfall: value.expected_landfall,
            updated_at: value.updated_at,
        }
    }
}

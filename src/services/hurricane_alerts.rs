use chrono::Utc;
use serde::Deserialize;

use crate::domain::hurricane_alert::HurricaneAlertListQuery;
use crate::dto::hurricane_alerts::{
    CreateHurricaneAlertDto, HurricaneAlertResponseDto, UpdateHurricaneAlertDto,
};
use crate::repository::errors::RepositoryError;
use crate::repository::{HurricaneAlertReader, HurricaneAlertWriter};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the alert list endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HurricaneAlertsQuery {
    /// Restrict the list to active or inactive alerts.
    pub is_active: Option<bool>,
}

fn not_found(id: i32) -> ServiceError {
    ServiceError::NotFound(format!("Hurricane alert with ID {id} not found"))
}

fn map_missing(id: i32) -> impl FnOnce(RepositoryError) -> ServiceError {
    move |err| match err {
        RepositoryError::NotFound => not_found(id),
        other => ServiceError::from(other),
    }
}

/// Lists alerts, newest first, optionally filtered by the active flag.
pub fn list_hurricane_alerts<R>(
    repo: &R,
    query: HurricaneAlertsQuery,
) -> ServiceResult<Vec<HurricaneAlertResponseDto>>
where
    R: HurricaneAlertReader + ?Sized,
{
    let mut list_query = HurricaneAlertListQuery::new();
    if let Some(is_active) = query.is_active {
        list_query = list_query.is_active(is_active);
    }

    let alerts = repo.list_hurricane_alerts(list_query)?;
    Ok(alerts.into_iter().map(Into::into).collect())
}

/// Lists active alerts, most severe first.
pub fn list_active_hurricane_alerts<R>(repo: &R) -> ServiceResult<Vec<HurricaneAlertResponseDto>>
where
    R: HurricaneAlertReader + ?Sized,
{
    let alerts = repo.list_hurricane_alerts(HurricaneAlertListQuery::active())?;
    Ok(alerts.into_iter().map(Into::into).collect())
}

pub fn get_hurricane_alert<R>(repo: &R, id: i32) -> ServiceResult<HurricaneAlertResponseDto>
where
    R: HurricaneAlertReader + ?Sized,
{
    repo.get_hurricane_alert_by_id(id)?
        .map(Into::into)
        .ok_or_else(|| not_found(id))
}

/// Validates and stores a new active alert.
pub fn create_hurricane_alert<R>(
    repo: &R,
    dto: CreateHurricaneAlertDto,
) -> ServiceResult<HurricaneAlertResponseDto>
where
    R: HurricaneAlertWriter + ?Sized,
{
    let new_alert = dto
        .into_new_alert()
        .map_err(|err| ServiceError::Validation(err.to_string()))?;

    let alert = repo.create_hurricane_alert(&new_alert)?;
    log::info!("Created hurricane alert {} ({})", alert.id, alert.name);

    Ok(alert.into())
}

/// Replaces every mutable field of an existing alert.
///
/// Checks run in a fixed order: id mismatch, then existence, then field rules.
pub fn update_hurricane_alert<R>(
    repo: &R,
    id: i32,
    dto: UpdateHurricaneAlertDto,
) -> ServiceResult<HurricaneAlertResponseDto>
where
    R: HurricaneAlertReader + HurricaneAlertWriter + ?Sized,
{
    if id != dto.id {
        return Err(ServiceError::IdMismatch);
    }

    if repo.get_hurricane_alert_by_id(id)?.is_none() {
        return Err(not_found(id));
    }

    let updates = dto
        .into_update(Utc::now().naive_utc())
        .map_err(|err| ServiceError::Validation(err.to_string()))?;

    let alert = repo
        .update_hurricane_alert(id, &updates)
        .map_err(map_missing(id))?;

    Ok(alert.into())
}

pub fn delete_hurricane_alert<R>(repo: &R, id: i32) -> ServiceResult<()>
where
    R: HurricaneAlertWriter + ?Sized,
{
    repo.delete_hurricane_alert(id).map_err(map_missing(id))?;
    log::info!("Deleted hurricane alert {id}");
    Ok(())
}

/// Marks an alert inactive and stamps a fresh update time, even when it was
/// already inactive.
pub fn deactivate_hurricane_alert<R>(repo: &R, id: i32) -> ServiceResult<HurricaneAlertResponseDto>
where
    R: HurricaneAlertWriter + ?Sized,
{
    let alert = repo
        .deactivate_hurricane_alert(id, Utc::now().naive_utc())
        .map_err(map_missing(id))?;

    Ok(alert.into())
}

use actix_web::http::header;
use actix_web::{HttpResponse, Responder, delete, get, patch, post, put, web};

use crate::dto::hurricane_alerts::{CreateHurricaneAlertDto, UpdateHurricaneAlertDto};
use crate::repository::DieselRepository;
use crate::routes::service_error_response;
use crate::services::hurricane_alerts;

#[get("/api/hurricane-alerts")]
pub async fn list_hurricane_alerts(
    params: web::Query<hurricane_alerts::HurricaneAlertsQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match hurricane_alerts::list_hurricane_alerts(repo.get_ref(), params.into_inner()) {
        Ok(alerts) => HttpResponse::Ok().json(alerts),
        Err(err) => service_error_response(err, "list hurricane alerts"),
    }
}

/// Active alerts ordered for triage. Registered ahead of `/{id}`.
#[get("/api/hurricane-alerts/active")]
pub async fn list_active_hurricane_alerts(repo: web::Data<DieselRepository>) -> impl Responder {
    match hurricane_alerts::list_active_hurricane_alerts(repo.get_ref()) {
        Ok(alerts) => HttpResponse::Ok().json(alerts),
        Err(err) => service_error_response(err, "list active hurricane alerts"),
    }
}

#[get("/api/hurricane-alerts/{id}")]
pub async fn get_hurricane_alert(
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match hurricane_alerts::get_hurricane_alert(repo.get_ref(), id.into_inner()) {
        Ok(alert) => HttpResponse::Ok().json(alert),
        Err(err) => service_error_response(err, "load hurricane alert"),
    }
}

#[post("/api/hurricane-alerts")]
pub async fn create_hurricane_alert(
    repo: web::Data<DieselRepository>,
    web::Json(dto): web::Json<CreateHurricaneAlertDto>,
) -> impl Responder {
    match hurricane_alerts::create_hurricane_alert(repo.get_ref(), dto) {
        Ok(alert) => HttpResponse::Created()
            .insert_header((
                header::LOCATION,
                format!("/api/hurricane-alerts/{}", alert.id),
            ))
            .json(alert),
        Err(err) => service_error_response(err, "create hurricane alert"),
    }
}

#[put("/api/hurricane-alerts/{id}")]
pub async fn update_hurricane_alert(
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Json(dto): web::Json<UpdateHurricaneAlertDto>,
) -> impl Responder {
    match hurricane_alerts::update_hurricane_alert(repo.get_ref(), id.into_inner(), dto) {
        Ok(alert) => HttpResponse::Ok().json(alert),
        Err(err) => service_error_response(err, "update hurricane alert"),
    }
}

#[delete("/api/hurricane-alerts/{id}")]
pub async fn delete_hurricane_alert(
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match hurricane_alerts::delete_hurricane_alert(repo.get_ref(), id.into_inner()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => service_error_response(err, "delete hurricane alert"),
    }
}

#[patch("/api/hurricane-alerts/{id}/deactivate")]
pub async fn deactivate_hurricane_alert(
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match hurricane_alerts::deactivate_hurricane_alert(repo.get_ref(), id.into_inner()) {
        Ok(alert) => HttpResponse::Ok().json(alert),
        Err(err) => service_error_response(err, "deactivate hurricane alert"),
    }
}

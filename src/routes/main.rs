use actix_web::{HttpResponse, Responder, get};

use crate::services::main as main_service;

/// Name reported by the API's status endpoint.
pub const SERVICE_NAME: &str = "stormdesk-api";

#[get("/")]
pub async fn show_status() -> impl Responder {
    HttpResponse::Ok().json(main_service::service_status(SERVICE_NAME))
}

#[get("/health")]
pub async fn show_health() -> impl Responder {
    HttpResponse::Ok().json(main_service::health())
}

#[get("/api/weather")]
pub async fn weather_forecast() -> impl Responder {
    HttpResponse::Ok().json(main_service::weather_forecast())
}

//! HTTP surface of the API service.

use actix_web::error::{InternalError, JsonPayloadError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};

use crate::dto::problem::{PROBLEM_CONTENT_TYPE, ProblemDetails};
use crate::services::ServiceError;

pub mod hurricane_alerts;
pub mod main;
pub mod products;
pub mod stocks;

/// Non-standard status used when the client went away mid-request.
pub const CLIENT_CLOSED_REQUEST: u16 = 499;

/// Builds an `application/problem+json` response.
pub fn problem_response(status: StatusCode, detail: impl Into<String>) -> HttpResponse {
    let title = status.canonical_reason().unwrap_or("Client Closed Request");
    let body = ProblemDetails::new(status.as_u16(), title, detail);
    HttpResponse::build(status)
        .content_type(PROBLEM_CONTENT_TYPE)
        .json(body)
}

/// Maps a service failure onto a problem response.
///
/// Repository failures are logged with `action` and answered with a generic
/// detail.
pub fn service_error_response(err: ServiceError, action: &str) -> HttpResponse {
    match err {
        ServiceError::Validation(message) => problem_response(StatusCode::BAD_REQUEST, message),
        ServiceError::IdMismatch => {
            problem_response(StatusCode::BAD_REQUEST, ServiceError::IdMismatch.to_string())
        }
        ServiceError::NotFound(message) => problem_response(StatusCode::NOT_FOUND, message),
        ServiceError::Cancelled => {
            log::warn!("Request cancelled while trying to {action}");
            match StatusCode::from_u16(CLIENT_CLOSED_REQUEST) {
                Ok(status) => problem_response(status, "The request was cancelled"),
                Err(_) => HttpResponse::BadRequest().finish(),
            }
        }
        ServiceError::Unavailable(message) => {
            log::error!("Failed to {action}: {message}");
            problem_response(StatusCode::SERVICE_UNAVAILABLE, message)
        }
        ServiceError::Repository(err) => {
            log::error!("Failed to {action}: {err}");
            problem_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected error occurred",
            )
        }
    }
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = problem_response(StatusCode::BAD_REQUEST, err.to_string());
    InternalError::from_response(err, response).into()
}

fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = problem_response(StatusCode::BAD_REQUEST, err.to_string());
    InternalError::from_response(err, response).into()
}

/// Registers every API route and the extractor error handlers.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .service(main::show_status)
        .service(main::show_health)
        .service(main::weather_forecast)
        .service(products::list_products)
        .service(products::get_product)
        .service(products::create_product)
        .service(hurricane_alerts::list_active_hurricane_alerts)
        .service(hurricane_alerts::list_hurricane_alerts)
        .service(hurricane_alerts::get_hurricane_alert)
        .service(hurricane_alerts::create_hurricane_alert)
        .service(hurricane_alerts::update_hurricane_alert)
        .service(hurricane_alerts::delete_hurricane_alert)
        .service(hurricane_alerts::deactivate_hurricane_alert)
        .service(stocks::get_stock_prices);
}

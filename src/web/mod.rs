//! Server-rendered dashboard that reads and writes through the gateway.

use actix_web::HttpResponse;
use actix_web::http::header;
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use serde::Serialize;
use tera::{Context, Tera};

pub mod client;
pub mod routes;

pub use client::{ApiClient, ApiClientError};

/// Name reported by the front end's status endpoint.
pub const SERVICE_NAME: &str = "stormdesk-web";

/// Symbols quoted on the dashboard when the user has not picked any.
pub const DEFAULT_SYMBOLS: [&str; 4] = ["AAPL", "MSFT", "GOOG", "AMZN"];

#[derive(Debug, Serialize)]
struct FlashAlert {
    level: &'static str,
    message: String,
}

fn level_class(level: Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        Level::Info | Level::Debug => "info",
    }
}

/// Context shared by every page: pending flash messages, the active nav
/// entry and an empty `errors` list that pages may replace.
pub fn base_context(flash_messages: &IncomingFlashMessages, current_page: &str) -> Context {
    let alerts: Vec<FlashAlert> = flash_messages
        .iter()
        .map(|message| FlashAlert {
            level: level_class(message.level()),
            message: message.content().to_string(),
        })
        .collect();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_page", current_page);
    context.insert("errors", &Vec::<String>::new());
    context
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Message shown to the user for a failed API call.
pub fn describe_error(err: &ApiClientError) -> String {
    match err {
        ApiClientError::Api { detail, .. } => detail.clone(),
        ApiClientError::Request(_) => "The gateway could not be reached.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_surface_problem_detail() {
        let err = ApiClientError::Api {
            status: 400,
            detail: "Location is required".to_string(),
        };
        assert_eq!(describe_error(&err), "Location is required");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn redirect_uses_see_other() {
        let response = redirect("/alerts");
        assert_eq!(response.status(), actix_web::http::StatusCode::SEE_OTHER);
        assert_eq!(
            response
                .headers()
                .get(header::LOCATION)
                .and_then(|value| value.to_str().ok()),
            Some("/alerts")
        );
    }
}

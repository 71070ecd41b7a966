use actix_web::http::StatusCode;
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::{HttpRequest, HttpResponse, get, web};

use crate::dto::status::{HealthDto, ServiceStatusDto};
use crate::gateway::SERVICE_NAME;
use crate::gateway::routing::RouteTable;
use crate::routes::problem_response;

/// Connection-scoped headers that must not be forwarded in either direction.
const HOP_BY_HOP_HEADERS: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// Headers rebuilt by the proxy itself.
const REWRITTEN_HEADERS: [&str; 5] = [
    "host",
    "content-length",
    "x-forwarded-for",
    "x-forwarded-host",
    "x-forwarded-proto",
];

pub fn is_hop_by_hop(name: &str) -> bool {
    HOP_BY_HOP_HEADERS
        .iter()
        .any(|header| header.eq_ignore_ascii_case(name))
}

fn is_rewritten(name: &str) -> bool {
    REWRITTEN_HEADERS
        .iter()
        .any(|header| header.eq_ignore_ascii_case(name))
}

/// `X-Forwarded-For` value with the client address appended to any existing
/// chain.
pub fn forwarded_for(existing: Option<&str>, client: Option<&str>) -> Option<String> {
    match (existing.map(str::trim).filter(|v| !v.is_empty()), client) {
        (Some(chain), Some(client)) => Some(format!("{chain}, {client}")),
        (Some(chain), None) => Some(chain.to_string()),
        (None, Some(client)) => Some(client.to_string()),
        (None, None) => None,
    }
}

#[get("/")]
pub async fn show_status() -> HttpResponse {
    HttpResponse::Ok().json(ServiceStatusDto::running(SERVICE_NAME))
}

#[get("/health")]
pub async fn show_health() -> HttpResponse {
    HttpResponse::Ok().json(HealthDto::healthy())
}

/// Default service: forwards anything the route table knows about.
pub async fn forward(
    req: HttpRequest,
    body: web::Bytes,
    table: web::Data<RouteTable>,
    client: web::Data<reqwest::Client>,
) -> HttpResponse {
    let path = req.path();
    let Some(route) = table.find(path) else {
        return problem_response(
            StatusCode::NOT_FOUND,
            format!("No route matches path {path}"),
        );
    };

    let url = route.upstream_url(path, req.query_string());
    let method = match reqwest::Method::from_bytes(req.method().as_str().as_bytes()) {
        Ok(method) => method,
        Err(_) => {
            return problem_response(StatusCode::METHOD_NOT_ALLOWED, "Unsupported method");
        }
    };

    let mut upstream = client.request(method, &url);
    for (name, value) in req.headers() {
        if is_hop_by_hop(name.as_str()) || is_rewritten(name.as_str()) {
            continue;
        }
        upstream = upstream.header(name.as_str(), value.as_bytes());
    }

    let connection = req.connection_info().clone();
    let existing_chain = req
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok());
    let client_addr = req.peer_addr().map(|addr| addr.ip().to_string());
    if let Some(chain) = forwarded_for(existing_chain, client_addr.as_deref()) {
        upstream = upstream.header("x-forwarded-for", chain);
    }
    upstream = upstream
        .header("x-forwarded-host", connection.host())
        .header("x-forwarded-proto", connection.scheme());

    log::debug!("Forwarding {} {} to {url} via route '{}'", req.method(), path, route.id);

    let response = match upstream.body(body.to_vec()).send().await {
        Ok(response) => response,
        Err(err) => {
            log::error!("Upstream request to {url} failed: {err}");
            return problem_response(
                StatusCode::BAD_GATEWAY,
                format!("Upstream cluster '{}' is unavailable", route.cluster),
            );
        }
    };

    let status = StatusCode::from_u16(response.status().as_u16())
        .unwrap_or(StatusCode::BAD_GATEWAY);
    let mut builder = HttpResponse::build(status);
    for (name, value) in response.headers() {
        if is_hop_by_hop(name.as_str()) || name.as_str().eq_ignore_ascii_case("content-length") {
            continue;
        }
        let header = (
            HeaderName::from_bytes(name.as_str().as_bytes()),
            HeaderValue::from_bytes(value.as_bytes()),
        );
        if let (Ok(name), Ok(value)) = header {
            builder.append_header((name, value));
        }
    }

    match response.bytes().await {
        Ok(bytes) => builder.body(bytes),
        Err(err) => {
            log::error!("Failed to read upstream response from {url}: {err}");
            problem_response(
                StatusCode::BAD_GATEWAY,
                format!("Upstream cluster '{}' sent an unreadable response", route.cluster),
            )
        }
    }
}

/// Registers the local endpoints and the proxy fallback.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(show_status)
        .service(show_health)
        .default_service(web::to(forward));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hop_by_hop_headers_are_detected_case_insensitively() {
        assert!(is_hop_by_hop("Connection"));
        assert!(is_hop_by_hop("transfer-encoding"));
        assert!(!is_hop_by_hop("content-type"));
        assert!(!is_hop_by_hop("authorization"));
    }

    #[test]
    fn forwarded_for_appends_client() {
        assert_eq!(
            forwarded_for(Some("10.0.0.1"), Some("10.0.0.2")),
            Some("10.0.0.1, 10.0.0.2".to_string())
        );
        assert_eq!(forwarded_for(None, Some("10.0.0.2")), Some("10.0.0.2".to_string()));
        assert_eq!(forwarded_for(Some(" "), None), None);
    }
}

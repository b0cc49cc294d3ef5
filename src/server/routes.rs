//! Request routing: maps (method, path) onto API payload builders and wraps
//! their results in minimal HTTP responses.

use crate::server::api::{self, AppState, UpgradesPayloadError};

pub struct HttpResponse {
    pub status_code: u16,
    pub status_text: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    pub fn to_http_string(&self) -> String {
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            self.status_code,
            self.status_text,
            self.content_type,
            self.body.len(),
            self.body
        )
    }
}

fn json_response(body: String) -> HttpResponse {
    HttpResponse {
        status_code: 200,
        status_text: "OK",
        content_type: "application/json",
        body,
    }
}

fn error_response(status_code: u16, status_text: &'static str, message: &str) -> HttpResponse {
    HttpResponse {
        status_code,
        status_text,
        content_type: "application/json",
        body: format!("{{\"error\": {}}}", serde_json::Value::from(message)),
    }
}

pub fn route_request(method: &str, path: &str, body: &str, state: &AppState) -> HttpResponse {
    let (path, query) = match path.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (path, None),
    };

    match (method, path) {
        ("GET", "/api/health") => match api::health_payload(state) {
            Ok(payload) => json_response(payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        ("GET", "/api/factions") => match api::factions_payload() {
            Ok(payload) => json_response(payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        ("GET", "/api/ships") => {
            let faction_filter = query.and_then(query_param_faction);
            match api::ships_payload(state, faction_filter.as_deref()) {
                Ok(payload) => json_response(payload),
                Err(err) => error_response(400, "Bad Request", &err),
            }
        }
        ("GET", path) if path.starts_with("/api/upgrades/") => {
            let tag = &path["/api/upgrades/".len()..];
            match api::upgrades_payload(state, tag) {
                Ok(payload) => json_response(payload),
                Err(UpgradesPayloadError::UnknownCategory(err)) => {
                    error_response(404, "Not Found", &err.to_string())
                }
                Err(UpgradesPayloadError::Unavailable(err)) => {
                    error_response(500, "Internal Server Error", &err.to_string())
                }
                Err(UpgradesPayloadError::Serialize(err)) => {
                    error_response(500, "Internal Server Error", &err.to_string())
                }
            }
        }
        ("POST", "/api/hydrate") => match api::hydrate_payload(state, body) {
            Ok(payload) => json_response(payload),
            Err(err) => error_response(400, "Bad Request", &err),
        },
        _ => error_response(404, "Not Found", "no such endpoint"),
    }
}

/// Extract `faction=...` from a query string.
fn query_param_faction(query: &str) -> Option<String> {
    query.split('&').find_map(|pair| {
        pair.strip_prefix("faction=")
            .map(|value| value.replace("%20", " "))
    })
}

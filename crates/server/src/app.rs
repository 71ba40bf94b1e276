//! The HTTP application: maps requests to responses.

use overload_view::layout::View;
use overload_view::render::page::render_page;
use overload_view::router::Router;
use overload_view::router::app_router;
use overload_view::welcome::APP_TITLE;
use overload_view::welcome::not_found_view;
use serde::Serialize;
use tracing::error;
use tracing::warn;

use crate::cors::Cors;
use crate::db::Database;
use crate::message::Method;
use crate::message::Request;
use crate::message::Response;
use crate::settings::Settings;

/// The version reported by the API.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const ROOT_PATH: &str = "/";
const HEALTH_PATH: &str = "/health";
const ALLOW: &str = "GET, HEAD";

#[derive(Serialize)]
struct ApiInfo {
    message: String,
    version: &'static str,
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

#[derive(Serialize)]
struct Detail {
    detail: &'static str,
}

/// Answers requests with pages, API responses and CORS headers.
pub struct App {
    router: Router,
    cors: Cors,
    database: Database,
    api_prefix: String,
}

impl App {
    /// Creates the application for `settings`, answering health checks
    /// against `database`.
    pub fn new(settings: &Settings, database: Database) -> App {
        Self {
            router: app_router(),
            cors: Cors::new(&settings.cors_origins),
            database,
            api_prefix: settings.api_v1_prefix.clone(),
        }
    }

    /// Answers `request`.
    pub fn handle(&self, request: &Request) -> Response {
        if Cors::is_preflight(request) {
            return self.cors.preflight(request);
        }

        // HEAD keeps the GET body so the server loop can report its length.
        // The body itself is never written for a HEAD request.
        let mut response = self.route(request);
        self.cors.apply(request, &mut response);
        response
    }

    fn route(&self, request: &Request) -> Response {
        let path = request.path();

        if self.is_api_path(path) {
            // No endpoints are registered under the first API version yet.
            return Response::json(404, &Detail { detail: "Not Found" });
        }

        let is_known = path == HEALTH_PATH || self.router.find(path).is_some();
        if !is_known {
            return self.page(404, not_found_view());
        }

        if !matches!(request.method, Method::Get | Method::Head) {
            let mut response = Response::json(
                405,
                &Detail {
                    detail: "Method Not Allowed",
                },
            );
            response.headers.set("Allow", ALLOW);
            return response;
        }

        match path {
            HEALTH_PATH => self.health(),
            ROOT_PATH if wants_json(request) => self.api_info(),
            _ => match self.router.resolve(path) {
                Some(view) => {
                    let mut response = self.page(200, view);
                    if path == ROOT_PATH {
                        response.headers.set("Vary", "Accept");
                    }
                    response
                }
                None => self.page(404, not_found_view()),
            },
        }
    }

    fn is_api_path(&self, path: &str) -> bool {
        match path.strip_prefix(self.api_prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    fn api_info(&self) -> Response {
        let mut response = Response::json(
            200,
            &ApiInfo {
                message: format!("{APP_TITLE} API"),
                version: VERSION,
            },
        );
        response.headers.set("Vary", "Accept");
        response
    }

    fn health(&self) -> Response {
        match self.database.session().and_then(|session| session.ping()) {
            Ok(()) => Response::json(
                200,
                &Health {
                    status: "healthy",
                    detail: None,
                },
            ),
            Err(e) => {
                warn!("health check failed: {e}");
                Response::json(
                    503,
                    &Health {
                        status: "unhealthy",
                        detail: Some(e.to_string()),
                    },
                )
            }
        }
    }

    fn page(&self, status: u16, view: View) -> Response {
        match render_page(&view) {
            Ok(html) => Response::html(status, html),
            Err(e) => {
                error!("rendering the `{}` page failed: {e}", view.title);
                Response::text(500, "Internal Server Error")
            }
        }
    }
}

/// Whether the client asks for JSON rather than a page.
fn wants_json(request: &Request) -> bool {
    let Some(accept) = request.header("Accept") else {
        return false;
    };

    let accept = accept.to_ascii_lowercase();
    accept.contains("application/json") && !accept.contains("text/html")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let settings = Settings::default();
        let database = Database::new("sqlite://", false).unwrap();
        App::new(&settings, database)
    }

    fn get(url: &str) -> Request {
        Request::new(Method::Get, url)
    }

    #[test]
    fn root_serves_welcome_page() {
        let response = app().handle(&get("/").with_header("Accept", "text/html,*/*"));

        assert_eq!(response.status, 200);
        assert_eq!(
            response.header("Content-Type"),
            Some("text/html; charset=utf-8")
        );
        assert!(response.body_str().contains("Progressive Overload Tracker"));
        assert_eq!(response.body_str().matches("<button").count(), 1);
        assert!(response.body_str().contains(">Get Started</button>"));
    }

    #[test]
    fn root_without_accept_serves_page() {
        let response = app().handle(&get("/"));

        assert!(response.body_str().starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn root_negotiates_api_info() {
        let response = app().handle(&get("/").with_header("Accept", "application/json"));

        assert_eq!(response.status, 200);
        let body: serde_json::Value = serde_json::from_slice(&response.body).unwrap();
        assert_eq!(body["message"], "Progressive Overload Tracker API");
        assert_eq!(body["version"], VERSION);
    }

    #[test]
    fn health_reports_healthy_database() {
        let response = app().handle(&get("/health"));

        assert_eq!(response.status, 200);
        assert_eq!(response.body_str(), r#"{"status":"healthy"}"#);
    }

    #[test]
    fn health_reports_unreachable_database() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite:///{}", dir.path().join("no/such/dir.db").display());
        let app = App::new(&Settings::default(), Database::new(&url, false).unwrap());

        let response = app.handle(&get("/health"));

        assert_eq!(response.status, 503);
        let body: serde_json::Value = serde_json::from_slice(&response.body).unwrap();
        assert_eq!(body["status"], "unhealthy");
        assert!(body["detail"].is_string());
    }

    #[test]
    fn api_paths_have_no_endpoints_yet() {
        for url in ["/api/v1", "/api/v1/", "/api/v1/exercises", "/api/v1/auth/login?x=1"] {
            let response = app().handle(&get(url));

            assert_eq!(response.status, 404, "{url}");
            assert_eq!(response.body_str(), r#"{"detail":"Not Found"}"#);
        }

        let response = app().handle(&Request::new(Method::Post, "/api/v1/sessions"));
        assert_eq!(response.status, 404);
    }

    #[test]
    fn prefix_must_match_a_whole_segment() {
        let response = app().handle(&get("/api/v10"));

        assert_eq!(response.status, 404);
        assert!(response.body_str().contains("Page not found"));
    }

    #[test]
    fn unknown_page_serves_not_found_view() {
        let response = app().handle(&get("/dashboard"));

        assert_eq!(response.status, 404);
        assert_eq!(
            response.header("Content-Type"),
            Some("text/html; charset=utf-8")
        );
        assert!(!response.body_str().contains("<button"));
    }

    #[test]
    fn unsupported_method_on_known_path() {
        let response = app().handle(&Request::new(Method::Post, "/"));

        assert_eq!(response.status, 405);
        assert_eq!(response.header("Allow"), Some("GET, HEAD"));
        assert_eq!(response.body_str(), r#"{"detail":"Method Not Allowed"}"#);
    }

    #[test]
    fn head_is_answered_like_get() {
        let head = app().handle(&Request::new(Method::Head, "/"));
        let page = app().handle(&get("/"));

        assert_eq!(head.status, 200);
        assert_eq!(head.body.len(), page.body.len());
        assert_eq!(head.headers, page.headers);
    }

    #[test]
    fn cors_is_applied_to_responses() {
        let response = app().handle(&get("/health").with_header("Origin", "http://localhost:3000"));

        assert_eq!(
            response.header("Access-Control-Allow-Origin"),
            Some("http://localhost:3000")
        );
    }

    #[test]
    fn preflight_is_answered_before_routing() {
        let request = Request::new(Method::Options, "/api/v1/sessions")
            .with_header("Origin", "http://localhost:3000")
            .with_header("Access-Control-Request-Method", "POST");

        let response = app().handle(&request);

        assert_eq!(response.status, 200);
        assert!(response.header("Access-Control-Allow-Methods").is_some());
    }

    #[test]
    fn custom_api_prefix_is_honored() {
        let settings = Settings {
            api_v1_prefix: String::from("/v1"),
            ..Settings::default()
        };
        let app = App::new(&settings, Database::new("sqlite://", false).unwrap());

        let response = app.handle(&get("/v1/anything"));
        assert_eq!(response.body_str(), r#"{"detail":"Not Found"}"#);

        let response = app.handle(&get("/api/v1/anything"));
        assert!(response.body_str().contains("Page not found"));
    }
}

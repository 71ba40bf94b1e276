//! Cross-origin resource sharing.
//!
//! Credentials are allowed, so an allowed origin is always echoed back
//! instead of `*`. Every method and every request header is allowed.

use crate::message::Method;
use crate::message::Request;
use crate::message::Response;

const ALLOW_METHODS: &str = "DELETE, GET, HEAD, OPTIONS, PATCH, POST, PUT";
const MAX_AGE: &str = "600";
const WILDCARD: &str = "*";

/// The CORS policy for a list of allowed origins.
pub struct Cors {
    origins: Vec<String>,
    allow_any: bool,
}

impl Cors {
    /// Allows `origins`. A `*` entry allows every origin.
    pub fn new(origins: &[String]) -> Cors {
        Self {
            allow_any: origins.iter().any(|o| o == WILDCARD),
            origins: origins.to_vec(),
        }
    }

    /// Whether requests from `origin` may read the response.
    pub fn is_allowed(&self, origin: &str) -> bool {
        self.allow_any || self.origins.iter().any(|o| o == origin)
    }

    /// A preflight is an `OPTIONS` request announcing the method of the
    /// actual cross-origin request.
    pub fn is_preflight(request: &Request) -> bool {
        request.method == Method::Options
            && request.header("Origin").is_some()
            && request.header("Access-Control-Request-Method").is_some()
    }

    /// Answers a preflight request.
    pub fn preflight(&self, request: &Request) -> Response {
        let origin = request.header("Origin").unwrap_or_default();

        if !self.is_allowed(origin) {
            let mut response = Response::text(400, "Disallowed CORS origin");
            response.headers.set("Vary", "Origin");
            return response;
        }

        let mut response = Response::text(200, "OK");
        let headers = &mut response.headers;
        headers.set("Access-Control-Allow-Origin", origin);
        headers.set("Access-Control-Allow-Credentials", "true");
        headers.set("Access-Control-Allow-Methods", ALLOW_METHODS);
        headers.set("Access-Control-Max-Age", MAX_AGE);
        headers.set("Vary", "Origin");

        if let Some(requested) = request.header("Access-Control-Request-Headers") {
            headers.set("Access-Control-Allow-Headers", requested);
        }

        response
    }

    /// Adds the CORS headers to the response of a simple request.
    pub fn apply(&self, request: &Request, response: &mut Response) {
        let Some(origin) = request.header("Origin") else {
            return;
        };

        if !self.is_allowed(origin) {
            return;
        }

        response.headers.set("Access-Control-Allow-Origin", origin);
        response
            .headers
            .set("Access-Control-Allow-Credentials", "true");
        response.headers.append("Vary", "Origin");
    }
}

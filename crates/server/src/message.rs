//! Owned HTTP request and response values.
//!
//! The application works on these types only, so it can be driven without a
//! socket. The server loop converts from and to the wire types.

use std::fmt::Display;

use serde::Serialize;
use tracing::error;

/// An HTTP request method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// `GET`.
    Get,
    /// `HEAD`.
    Head,
    /// `POST`.
    Post,
    /// `PUT`.
    Put,
    /// `PATCH`.
    Patch,
    /// `DELETE`.
    Delete,
    /// `OPTIONS`.
    Options,
    /// Any other method, upper-cased.
    Other(String),
}

impl From<&str> for Method {
    fn from(method: &str) -> Self {
        match method.to_ascii_uppercase().as_str() {
            "GET" => Method::Get,
            "HEAD" => Method::Head,
            "POST" => Method::Post,
            "PUT" => Method::Put,
            "PATCH" => Method::Patch,
            "DELETE" => Method::Delete,
            "OPTIONS" => Method::Options,
            other => Method::Other(other.to_owned()),
        }
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let method = match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Options => "OPTIONS",
            Method::Other(other) => other.as_str(),
        };

        f.write_str(method)
    }
}

/// Header names are compared case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(Vec<(String, String)>);

impl Headers {
    /// The first value of the header `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Sets `name` to `value`, replacing every previous value.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.0.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        self.0.push((name.to_owned(), value.into()));
    }

    /// Adds a value for `name`, keeping the previous ones.
    pub fn append(&mut self, name: &str, value: impl Into<String>) {
        self.0.push((name.to_owned(), value.into()));
    }

    /// All headers, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

/// An incoming request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// The request method.
    pub method: Method,
    /// The request target: the path with its query string.
    pub url: String,
    /// The request headers.
    pub headers: Headers,
}

impl Request {
    /// A request for `url` without headers.
    pub fn new(method: Method, url: impl Into<String>) -> Request {
        Self {
            method,
            url: url.into(),
            headers: Headers::default(),
        }
    }

    /// Adds a header to the request.
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Request {
        self.headers.append(name, value);
        self
    }

    /// The first value of the request header `name`.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// The path of the request target, without the query string or fragment.
    pub fn path(&self) -> &str {
        let end = self.url.find(['?', '#']).unwrap_or(self.url.len());
        &self.url[..end]
    }
}

/// An outgoing response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// The status code.
    pub status: u16,
    /// The response headers.
    pub headers: Headers,
    /// The response body.
    pub body: Vec<u8>,
}

impl Response {
    /// A response with the given `Content-Type`.
    pub fn new(status: u16, content_type: &str, body: impl Into<Vec<u8>>) -> Response {
        let mut headers = Headers::default();
        headers.set("Content-Type", content_type);

        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// An HTML page.
    pub fn html(status: u16, body: String) -> Response {
        Self::new(status, "text/html; charset=utf-8", body)
    }

    /// A plain text body.
    pub fn text(status: u16, body: &str) -> Response {
        Self::new(status, "text/plain; charset=utf-8", body)
    }

    /// Serializes `value` as the JSON body of the response.
    pub fn json<T: Serialize>(status: u16, value: &T) -> Response {
        match serde_json::to_vec(value) {
            Ok(body) => Self::new(status, "application/json", body),
            Err(e) => {
                error!("serializing the response body failed: {e}");
                Self::text(500, "Internal Server Error")
            }
        }
    }

    /// The first value of the response header `name`.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// The body as text, empty when it is not UTF-8.
    pub fn body_str(&self) -> &str {
        std::str::from_utf8(&self.body).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_are_case_insensitive() {
        let request = Request::new(Method::Get, "/").with_header("Accept", "text/html");

        assert_eq!(request.header("accept"), Some("text/html"));
        assert_eq!(request.header("ACCEPT"), Some("text/html"));
        assert_eq!(request.header("origin"), None);
    }

    #[test]
    fn set_replaces_and_append_keeps() {
        let mut headers = Headers::default();
        headers.append("Vary", "Accept");
        headers.append("vary", "Origin");
        assert_eq!(headers.iter().count(), 2);

        headers.set("VARY", "Origin");
        assert_eq!(headers.iter().collect::<Vec<_>>(), vec![("VARY", "Origin")]);
    }

    #[test]
    fn path_strips_query_and_fragment() {
        assert_eq!(Request::new(Method::Get, "/health?full=1").path(), "/health");
        assert_eq!(Request::new(Method::Get, "/#top").path(), "/");
        assert_eq!(Request::new(Method::Get, "/api/v1").path(), "/api/v1");
    }

    #[test]
    fn methods_parse_case_insensitively() {
        assert_eq!(Method::from("get"), Method::Get);
        assert_eq!(Method::from("OPTIONS"), Method::Options);
        assert_eq!(Method::from("brew"), Method::Other(String::from("BREW")));
        assert_eq!(Method::Other(String::from("BREW")).to_string(), "BREW");
    }

    #[test]
    fn json_response_sets_content_type() {
        let response = Response::json(200, &serde_json::json!({ "status": "healthy" }));

        assert_eq!(response.header("content-type"), Some("application/json"));
        assert_eq!(response.body_str(), r#"{"status":"healthy"}"#);
    }
}

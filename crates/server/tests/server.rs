use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use reqwest::header::CONTENT_LENGTH;
use reqwest::header::CONTENT_TYPE;
use reqwest::header::ORIGIN;
use tempfile::TempDir;

use overload_server::http::ServerConfig;
use overload_server::http::ServerHandle;
use overload_server::http::launch;
use overload_server::settings::Settings;

struct TestServer {
    handle: ServerHandle,
    base_url: String,
    _dir: TempDir,
}

impl TestServer {
    fn start() -> TestServer {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("tracker.db");
        let settings = Settings {
            database_url: format!("sqlite:///{}", db_path.display()),
            ..Settings::default()
        };
        let config = ServerConfig {
            host: String::from("127.0.0.1"),
            port: 0,
            workers: 2,
        };

        let handle = launch(&settings, &config).unwrap();
        let base_url = format!("http://{}", handle.addr());

        assert!(db_path.exists());

        TestServer {
            handle,
            base_url,
            _dir: dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[test]
fn serves_welcome_page_and_api() {
    let server = TestServer::start();
    let client = Client::new();

    let response = client.get(server.url("/")).send().unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[CONTENT_TYPE],
        "text/html; charset=utf-8"
    );
    let page = response.text().unwrap();
    assert!(page.contains("<h1 class=\"text-2xl font-bold\">Progressive Overload Tracker</h1>"));
    assert_eq!(page.matches("<button").count(), 1);
    assert!(page.contains(">Get Started</button>"));

    let info: serde_json::Value = client
        .get(server.url("/"))
        .header(ACCEPT, "application/json")
        .send()
        .unwrap()
        .json()
        .unwrap();
    assert_eq!(info["message"], "Progressive Overload Tracker API");
    assert_eq!(info["version"], "0.1.0");

    let health = client.get(server.url("/health")).send().unwrap();
    assert_eq!(health.status(), StatusCode::OK);
    assert_eq!(health.text().unwrap(), r#"{"status":"healthy"}"#);

    let api = client.get(server.url("/api/v1/exercises")).send().unwrap();
    assert_eq!(api.status(), StatusCode::NOT_FOUND);
    assert_eq!(api.text().unwrap(), r#"{"detail":"Not Found"}"#);

    let missing = client.get(server.url("/dashboard")).send().unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert!(missing.text().unwrap().contains("Page not found"));

    server.handle.shutdown();
}

#[test]
fn head_reports_the_get_length() {
    let server = TestServer::start();
    let client = Client::new();

    for path in ["/", "/health", "/dashboard"] {
        let get = client.get(server.url(path)).send().unwrap();
        let head = client.head(server.url(path)).send().unwrap();

        assert_eq!(head.status(), get.status(), "{path}");
        assert_eq!(
            head.headers().get(CONTENT_LENGTH),
            get.headers().get(CONTENT_LENGTH),
            "{path}"
        );
        assert!(get.headers().get(CONTENT_LENGTH).is_some(), "{path}");
        assert!(head.bytes().unwrap().is_empty(), "{path}");
    }

    server.handle.shutdown();
}

#[test]
fn applies_cors_policy() {
    let server = TestServer::start();
    let client = Client::new();

    let allowed = client
        .get(server.url("/health"))
        .header(ORIGIN, "http://localhost:3000")
        .send()
        .unwrap();
    assert_eq!(
        allowed.headers()["access-control-allow-origin"],
        "http://localhost:3000"
    );
    assert_eq!(allowed.headers()["access-control-allow-credentials"], "true");

    let preflight = client
        .request(reqwest::Method::OPTIONS, server.url("/api/v1/sessions"))
        .header(ORIGIN, "http://localhost:5173")
        .header("Access-Control-Request-Method", "POST")
        .send()
        .unwrap();
    assert_eq!(preflight.status(), StatusCode::OK);
    assert_eq!(
        preflight.headers()["access-control-allow-origin"],
        "http://localhost:5173"
    );

    let rejected = client
        .request(reqwest::Method::OPTIONS, server.url("/api/v1/sessions"))
        .header(ORIGIN, "https://evil.example")
        .header("Access-Control-Request-Method", "POST")
        .send()
        .unwrap();
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);
    assert!(
        rejected
            .headers()
            .get("access-control-allow-origin")
            .is_none()
    );

    server.handle.shutdown();
}

#[test]
fn rejects_unsupported_database_url() {
    let settings = Settings {
        database_url: String::from("postgresql://localhost/tracker"),
        ..Settings::default()
    };
    let config = ServerConfig {
        port: 0,
        ..ServerConfig::default()
    };

    let error = launch(&settings, &config).err().unwrap();

    assert!(error.to_string().contains("unsupported database URL"));
}

#[test]
fn reports_bind_failure() {
    let server = TestServer::start();
    let settings = Settings {
        database_url: String::from("sqlite://"),
        ..Settings::default()
    };
    let config = ServerConfig {
        host: String::from("127.0.0.1"),
        port: server.handle.addr().port(),
        workers: 1,
    };

    let error = launch(&settings, &config).err().unwrap();

    assert!(error.to_string().contains("binding to"));
    server.handle.shutdown();
}

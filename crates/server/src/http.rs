//! The server loop.
//!
//! A fixed pool of worker threads shares one listening socket. Each worker
//! takes the next request, runs it through the [App] and writes the response
//! back.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::thread;
use std::thread::JoinHandle;
use std::time::Instant;

use tiny_http::Header;
use tiny_http::Server;
use tracing::Dispatch;
use tracing::dispatcher;
use tracing::info;
use tracing::warn;

use crate::app::App;
use crate::db::Database;
use crate::error::ServerError;
use crate::logging::ACCESS_TARGET;
use crate::message::Headers;
use crate::message::Method;
use crate::message::Request;
use crate::message::Response;
use crate::settings::Settings;

/// Where and how to listen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// The interface to bind.
    pub host: String,
    /// The port to bind; `0` picks a free one.
    pub port: u16,
    /// The number of worker threads.
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("127.0.0.1"),
            port: 8000,
            workers: 4,
        }
    }
}

/// A running server.
pub struct ServerHandle {
    server: Arc<Server>,
    addr: SocketAddr,
    stopping: Arc<AtomicBool>,
    workers: Vec<JoinHandle<()>>,
}

impl ServerHandle {
    /// The address the server listens on.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Blocks until every worker has exited.
    pub fn join(self) {
        for worker in self.workers {
            if worker.join().is_err() {
                warn!("a server worker panicked");
            }
        }
    }

    /// Stops accepting requests and waits for the workers to finish.
    pub fn shutdown(self) {
        self.stopping.store(true, Ordering::SeqCst);

        // Each call releases one worker blocked on `recv`.
        for _ in 0..self.workers.len() {
            self.server.unblock();
        }

        self.join();
    }
}

/// Checks the database, then starts the application with `settings`.
pub fn launch(settings: &Settings, config: &ServerConfig) -> Result<ServerHandle, ServerError> {
    let database = Database::new(&settings.database_url, settings.debug)?;
    database.session()?.ping()?;

    info!(
        environment = %settings.environment,
        database = ?database.url(),
        "starting the application"
    );

    start(config, App::new(settings, database))
}

/// Binds the listening socket and starts the workers.
pub fn start(config: &ServerConfig, app: App) -> Result<ServerHandle, ServerError> {
    let addr = format!("{}:{}", config.host, config.port);
    let server = Server::http(&addr).map_err(|e| ServerError::Bind {
        addr: addr.clone(),
        message: e.to_string(),
    })?;

    let Some(local_addr) = server.server_addr().to_ip() else {
        return Err(ServerError::Bind {
            addr,
            message: String::from("the server is not listening on an IP address"),
        });
    };

    let server = Arc::new(server);
    let app = Arc::new(app);
    let stopping = Arc::new(AtomicBool::new(false));

    // Workers log through the subscriber of the thread that started them.
    let dispatch = dispatcher::get_default(Dispatch::clone);

    let workers = (0..config.workers.max(1))
        .map(|_| {
            let server = Arc::clone(&server);
            let app = Arc::clone(&app);
            let stopping = Arc::clone(&stopping);
            let dispatch = dispatch.clone();

            thread::spawn(move || {
                dispatcher::with_default(&dispatch, || serve(&server, &app, &stopping))
            })
        })
        .collect();

    info!("listening on http://{local_addr}");

    Ok(ServerHandle {
        server,
        addr: local_addr,
        stopping,
        workers,
    })
}

fn serve(server: &Server, app: &App, stopping: &AtomicBool) {
    loop {
        let request = match server.recv() {
            Ok(request) => request,
            Err(_) if stopping.load(Ordering::SeqCst) => return,
            Err(e) => {
                warn!("receiving a request failed: {e}");
                continue;
            }
        };

        if stopping.load(Ordering::SeqCst) {
            return;
        }

        handle(app, request);
    }
}

fn handle(app: &App, wire_request: tiny_http::Request) {
    let started = Instant::now();
    let request = from_wire(&wire_request);
    let response = app.handle(&request);
    let status = response.status;

    if let Err(e) = wire_request.respond(to_wire(response)) {
        warn!("writing the response failed: {e}");
    }

    info!(
        target: ACCESS_TARGET,
        "{} {} {} {:?}",
        request.method,
        request.url,
        status,
        started.elapsed()
    );
}

fn from_wire(request: &tiny_http::Request) -> Request {
    let mut headers = Headers::default();
    for header in request.headers() {
        headers.append(header.field.as_str().as_str(), header.value.as_str());
    }

    Request {
        method: Method::from(request.method().as_str()),
        url: request.url().to_owned(),
        headers,
    }
}

fn to_wire(response: Response) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let mut wire =
        tiny_http::Response::from_data(response.body).with_status_code(response.status);

    for (name, value) in response.headers.iter() {
        match Header::from_bytes(name.as_bytes(), value.as_bytes()) {
            Ok(header) => wire.add_header(header),
            Err(()) => warn!("dropping invalid response header `{name}`"),
        }
    }

    wire
}

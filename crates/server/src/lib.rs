//! The Progressive Overload Tracker HTTP server.
//!
//! The server answers with the pages of [overload_view] and with the JSON
//! endpoints of the API. Requests are handled by [app::App], which is
//! independent of the socket layer in [http].

#![warn(missing_docs)]

pub mod app;
pub mod cors;
pub mod db;
pub mod error;
pub mod http;
pub mod logging;
pub mod message;
pub mod settings;

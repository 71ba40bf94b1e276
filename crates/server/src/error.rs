//! Defines the error type of the server.

use std::error::Error;
use std::fmt::Display;

use crate::db::DbError;

/// The error type for starting the server.
#[derive(Debug)]
pub enum ServerError {
    /// The listening socket could not be bound.
    Bind {
        /// The address that was requested.
        addr: String,
        /// Why binding failed.
        message: String,
    },

    /// The database is not usable.
    Database(DbError),
}

impl Error for ServerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ServerError::Database(error) => Some(error),
            ServerError::Bind { .. } => None,
        }
    }
}

impl Display for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let server_error = "server error:";

        match self {
            ServerError::Bind { addr, message } => {
                write!(f, "{server_error} binding to `{addr}` failed: {message}")
            }
            ServerError::Database(error) => write!(f, "{server_error} {error}"),
        }
    }
}

impl From<DbError> for ServerError {
    fn from(error: DbError) -> Self {
        ServerError::Database(error)
    }
}

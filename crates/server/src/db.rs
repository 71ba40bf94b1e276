//! Database session management.
//!
//! A [Database] is a session factory: every call to [Database::session] opens
//! a fresh connection, which is closed when the [Session] is dropped.

use std::fmt::Display;
use std::path::PathBuf;

use rusqlite::Connection;
use tracing::debug;

const SCHEME: &str = "sqlite://";
const MEMORY: &str = ":memory:";
const DB_TARGET: &str = "overload::db";

/// Where the SQLite database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseUrl {
    /// A private, in-memory database per session.
    Memory,
    /// A database file.
    File(PathBuf),
}

impl DatabaseUrl {
    /// Parses a `sqlite://` URL.
    ///
    /// `sqlite:///relative.db` and `sqlite:////absolute.db` name files;
    /// `sqlite://` and `sqlite:///:memory:` name an in-memory database.
    pub fn parse(url: &str) -> Result<DatabaseUrl, DbError> {
        let Some(rest) = url.strip_prefix(SCHEME) else {
            return Err(DbError::UnsupportedUrl(url.to_owned()));
        };

        let rest = rest.split('?').next().unwrap_or_default();
        if rest.is_empty() {
            return Ok(DatabaseUrl::Memory);
        }

        // The host part must be empty: `sqlite://host/...` is not a thing.
        let Some(path) = rest.strip_prefix('/') else {
            return Err(DbError::UnsupportedUrl(url.to_owned()));
        };

        match path {
            "" | MEMORY => Ok(DatabaseUrl::Memory),
            path => Ok(DatabaseUrl::File(PathBuf::from(path))),
        }
    }
}

/// Opens database sessions.
#[derive(Debug, Clone)]
pub struct Database {
    url: DatabaseUrl,
    echo: bool,
}

impl Database {
    /// Creates a session factory for `url`. With `echo`, every executed
    /// statement is logged at debug level.
    pub fn new(url: &str, echo: bool) -> Result<Database, DbError> {
        let url = DatabaseUrl::parse(url)?;
        Ok(Self { url, echo })
    }

    /// The database location.
    pub fn url(&self) -> &DatabaseUrl {
        &self.url
    }

    /// Opens a new session.
    pub fn session(&self) -> Result<Session, DbError> {
        let connection = match &self.url {
            DatabaseUrl::Memory => Connection::open_in_memory()?,
            DatabaseUrl::File(path) => Connection::open(path)?,
        };

        Ok(Session {
            connection,
            echo: self.echo,
        })
    }
}

/// An open connection to the database.
pub struct Session {
    connection: Connection,
    echo: bool,
}

impl Session {
    /// Checks that the database answers queries.
    pub fn ping(&self) -> Result<(), DbError> {
        let statement = "SELECT 1";
        self.echo(statement);

        let one: i64 = self.connection.query_row(statement, [], |row| row.get(0))?;
        if one != 1 {
            return Err(DbError::UnexpectedResult(one.to_string()));
        }

        Ok(())
    }

    fn echo(&self, statement: &str) {
        if self.echo {
            debug!(target: DB_TARGET, statement, "executing statement");
        }
    }
}

/// The error type for database access.
#[derive(Debug)]
pub enum DbError {
    /// The database URL does not name a SQLite database.
    UnsupportedUrl(String),

    /// A [rusqlite::Error] returned by SQLite.
    Sqlite(rusqlite::Error),

    /// A query returned something other than what it must return.
    UnexpectedResult(String),
}

impl std::error::Error for DbError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DbError::Sqlite(error) => Some(error),
            _ => None,
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let db_error = "database error:";

        match self {
            DbError::UnsupportedUrl(url) => write!(
                f,
                "{db_error} unsupported database URL `{url}`; expected `sqlite:///<path>`"
            ),
            DbError::Sqlite(error) => write!(f, "{db_error} {error}"),
            DbError::UnexpectedResult(value) => {
                write!(f, "{db_error} unexpected query result `{value}`")
            }
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(error: rusqlite::Error) -> Self {
        DbError::Sqlite(error)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::logging::capture::capture;

    #[test]
    fn parses_sqlite_urls() {
        assert_eq!(
            DatabaseUrl::parse("sqlite:///./workout_tracker.db").unwrap(),
            DatabaseUrl::File(PathBuf::from("./workout_tracker.db"))
        );
        assert_eq!(
            DatabaseUrl::parse("sqlite:////var/lib/tracker.db").unwrap(),
            DatabaseUrl::File(PathBuf::from("/var/lib/tracker.db"))
        );
        assert_eq!(
            DatabaseUrl::parse("sqlite:///:memory:").unwrap(),
            DatabaseUrl::Memory
        );
        assert_eq!(DatabaseUrl::parse("sqlite://").unwrap(), DatabaseUrl::Memory);
        assert_eq!(
            DatabaseUrl::parse("sqlite:///data.db?mode=rwc").unwrap(),
            DatabaseUrl::File(PathBuf::from("data.db"))
        );
    }

    #[test]
    fn rejects_other_databases() {
        for url in [
            "postgresql://user@localhost/tracker",
            "sqlite:/relative.db",
            "sqlite://host/tracker.db",
            "",
        ] {
            assert!(
                matches!(DatabaseUrl::parse(url), Err(DbError::UnsupportedUrl(_))),
                "{url}"
            );
        }
    }

    #[test]
    fn in_memory_session_answers_ping() {
        let database = Database::new("sqlite://", false).unwrap();

        database.session().unwrap().ping().unwrap();
    }

    #[test]
    fn file_session_creates_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tracker.db");
        let url = format!("sqlite:///{}", path.display());

        let database = Database::new(&url, true).unwrap();
        database.session().unwrap().ping().unwrap();

        assert!(Path::new(&path).exists());
    }

    #[test]
    fn unreachable_file_fails_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("tracker.db");
        let url = format!("sqlite:///{}", path.display());

        let database = Database::new(&url, false).unwrap();

        assert!(matches!(database.session(), Err(DbError::Sqlite(_))));
    }
    #[test]
    fn echo_logs_statements_at_debug() {
        let database = Database::new("sqlite://", true).unwrap();

        let output = capture("overload::db=debug", || {
            database.session().unwrap().ping().unwrap();
        });

        assert!(output.contains(" - overload::db - DEBUG - executing statement"));
        assert!(output.contains("SELECT 1"));
    }

    #[test]
    fn statements_are_quiet_without_echo() {
        let database = Database::new("sqlite://", false).unwrap();

        let output = capture("overload::db=debug", || {
            database.session().unwrap().ping().unwrap();
        });

        assert!(output.is_empty());
    }
}

use std::fmt::Display;

use overload_server::error::ServerError;
use overload_server::settings::SettingsError;
use overload_view::render::error::RenderError;
use tracing_subscriber::util::TryInitError;

#[derive(Debug)]
pub(crate) enum CliError {
    Settings(SettingsError),
    Logging(TryInitError),
    Server(ServerError),
    Render(RenderError),
    UnknownRoute(String),
    Path(String),
}

impl From<SettingsError> for CliError {
    fn from(error: SettingsError) -> Self {
        CliError::Settings(error)
    }
}

impl From<TryInitError> for CliError {
    fn from(error: TryInitError) -> Self {
        CliError::Logging(error)
    }
}

impl From<ServerError> for CliError {
    fn from(error: ServerError) -> Self {
        CliError::Server(error)
    }
}

impl From<RenderError> for CliError {
    fn from(error: RenderError) -> Self {
        CliError::Render(error)
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cli_error = "CLI error:";

        match self {
            CliError::Settings(error) => write!(f, "{cli_error} {error}"),
            CliError::Logging(error) => {
                write!(f, "{cli_error} initializing logging failed: {error}")
            }
            CliError::Server(error) => write!(f, "{cli_error} {error}"),
            CliError::Render(error) => write!(f, "{cli_error} {error}"),
            CliError::UnknownRoute(route) => write!(
                f,
                "{cli_error} no page is registered for the `{route}` route"
            ),
            CliError::Path(error) => write!(f, "{cli_error} {error}"),
        }
    }
}

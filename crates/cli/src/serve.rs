use overload_server::http::ServerConfig;
use overload_server::http::launch;
use overload_server::logging;
use overload_server::settings::Settings;
use tracing::info;

use crate::cli::ServeArgs;
use crate::error::CliError;

pub(crate) fn serve(args: ServeArgs) -> Result<(), CliError> {
    let settings = Settings::load(Some(args.env_file.as_path()))?;
    logging::init(settings.log_level)?;

    let config = ServerConfig {
        host: args.host,
        port: args.port,
        workers: usize::from(args.workers),
    };

    let handle = launch(&settings, &config)?;
    info!("the tracker is available at http://{}", handle.addr());

    handle.join();
    Ok(())
}

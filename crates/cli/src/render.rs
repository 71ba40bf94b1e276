use std::path::PathBuf;

use overload_view::render::output::OutputFile;
use overload_view::render::page::write_page;
use overload_view::router::app_router;

use crate::cli::PathExt;
use crate::cli::RenderArgs;
use crate::error::CliError;

pub(crate) fn render(args: RenderArgs) -> Result<PathBuf, CliError> {
    let output_path = args.output_path.or_current_dir()?;

    let Some(view) = app_router().resolve(&args.route) else {
        return Err(CliError::UnknownRoute(args.route));
    };

    let mut output = OutputFile::new(&output_path)?;
    write_page(&view, &mut output)?;
    output.flush()?;

    Ok(output.path().to_path_buf())
}

mod cli;
mod error;
mod render;
mod serve;

use std::process::ExitCode;

use clap::Parser;
use cli::Cli;
use cli::Commands;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve(args) => serve::serve(args),
        Commands::Render(args) => render::render(args).map(|path| {
            println!("overload rendered the page into: `{}`", path.display());
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

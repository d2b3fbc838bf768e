//! jslink CLI entry point: parse arguments, set up logging, dispatch.

use clap::Parser;
use jslink_cli::{cli, commands, error, logger, ui};
use miette::Result;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = match args.command {
        cli::Command::Build(build_args) => commands::build_execute(build_args),
        cli::Command::Check(check_args) => commands::check_execute(check_args),
        cli::Command::Graph(graph_args) => commands::graph_execute(graph_args),
    };

    result.map_err(error::cli_error_to_miette)
}

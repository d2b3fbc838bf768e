#[cfg(test)]
mod tests {
    use crate::cli::{Cli, Command, GraphFormat, LedgerArg};
    use clap::{CommandFactory, Parser};
    use std::path::PathBuf;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_build_defaults() {
        let cli = Cli::try_parse_from(["jslink", "build", "src"]).unwrap();
        let Command::Build(args) = cli.command else {
            panic!("expected build");
        };
        assert_eq!(args.input.sources, vec![PathBuf::from("src")]);
        assert!(!args.input.no_strict);
        assert!(args.destination.is_none());
        assert_eq!(args.ledger, LedgerArg::PerRoot);
    }

    #[test]
    fn test_build_flags() {
        let cli = Cli::try_parse_from([
            "jslink",
            "build",
            "a",
            "b",
            "-r",
            "-d",
            "dist",
            "--no-strict",
            "--export-map",
            "deps.dot",
            "--dry-run",
            "--ledger",
            "shared",
        ])
        .unwrap();
        let Command::Build(args) = cli.command else {
            panic!("expected build");
        };
        assert_eq!(args.input.sources.len(), 2);
        assert!(args.input.recursive);
        assert!(args.input.no_strict);
        assert!(args.dry_run);
        assert_eq!(args.destination, Some(PathBuf::from("dist")));
        assert_eq!(args.export_map, Some(PathBuf::from("deps.dot")));
        assert_eq!(args.ledger, LedgerArg::Shared);
    }

    #[test]
    fn test_build_has_no_default_target_flag() {
        let result = Cli::try_parse_from(["jslink", "build", "src", "--default-target", "module-name"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["jslink", "check", "--json", "-q", "--no-color"]).unwrap();
        assert!(cli.quiet);
        assert!(cli.no_color);
        assert!(matches!(cli.command, Command::Check(ref args) if args.json));
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["jslink", "-v", "-q", "check"]).is_err());
    }

    #[test]
    fn test_graph_format() {
        let cli = Cli::try_parse_from(["jslink", "graph", "--format", "json"]).unwrap();
        assert!(matches!(cli.command, Command::Graph(ref args) if args.format == GraphFormat::Json));
    }
}

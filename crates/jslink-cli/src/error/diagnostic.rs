//! Miette diagnostic conversion for CLI errors.

use miette::Report;

use super::CliError;

/// Convert a [`CliError`] into a miette report, attaching its hint as help.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err.hint() {
        Some(hint) => miette::miette!(help = hint, "{}", err),
        None => miette::miette!("{}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jslink_bundler::Error as LinkError;
    use std::path::PathBuf;

    #[test]
    fn test_report_keeps_message_and_help() {
        let report = cli_error_to_miette(
            LinkError::OverwriteDisallowed {
                destination: PathBuf::from("out/a.js"),
            }
            .into(),
        );
        assert!(report.to_string().contains("out/a.js"));
        let help = report.help().map(|h| h.to_string());
        assert!(help.unwrap().contains("--overwrite"));
    }
}

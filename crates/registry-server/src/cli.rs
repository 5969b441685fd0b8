//! Command-line interface for the `people-registry` binary.
//!
//! Every flag can also come from an environment variable. Repeating a flag,
//! passing an unknown one, or giving an out-of-range port is a usage error
//! and the process exits with status 2 before anything starts.

use std::path::PathBuf;

use clap::Parser;

/// People Registry: an in-memory HTTP CRUD service for person records.
#[derive(Debug, Parser)]
#[command(name = "people-registry", version, about)]
pub struct Cli {
    /// Port to listen on (1-65535).
    #[arg(
        short,
        long,
        env = "PORT",
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub port: Option<u16>,

    /// Address to bind to.
    #[arg(long, env = "HOST")]
    pub host: Option<String>,

    /// YAML configuration file. Defaults to `people-registry.yaml` when present.
    #[arg(short, long, env = "PEOPLE_REGISTRY_CONFIG")]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use clap::error::ErrorKind;

    use super::*;

    #[test]
    fn short_and_long_port() {
        let cli = Cli::try_parse_from(["people-registry", "-p", "8080"]).unwrap();
        assert_eq!(cli.port, Some(8080));

        let cli = Cli::try_parse_from(["people-registry", "--port", "65535"]).unwrap();
        assert_eq!(cli.port, Some(65535));
    }

    #[test]
    fn port_zero_is_out_of_range() {
        let err = Cli::try_parse_from(["people-registry", "--port", "0"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn port_above_u16_is_rejected() {
        let err = Cli::try_parse_from(["people-registry", "--port", "70000"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn non_numeric_port_is_rejected() {
        let err = Cli::try_parse_from(["people-registry", "-p", "http"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn duplicate_port_is_rejected() {
        let err =
            Cli::try_parse_from(["people-registry", "-p", "3001", "--port", "3002"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn unknown_option_is_rejected() {
        let err = Cli::try_parse_from(["people-registry", "--verbose"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn config_path_is_captured() {
        let cli = Cli::try_parse_from(["people-registry", "-c", "/etc/registry.yaml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/etc/registry.yaml")));
    }
}

//! Command line argument parsing and validation.

use crate::signer::config::CONFIG_ENV;
use clap::Parser;
use std::path::PathBuf;

/// Build and sign an unpacked APK directory
#[derive(Parser, Debug)]
#[command(
    name = "signapk",
    version,
    about = "Build and sign an unpacked APK directory",
    long_about = "Builds an unpacked APK directory with apktool and signs the result with jarsigner.

Given SOURCE_DIR, writes SOURCE_DIR-unsigned.apk and then SOURCE_DIR-signed.apk next to it.

The toolchain is read from a JSON configuration file (--config, $SIGNAPK_CONFIG,
./signapk/env.conf, or <config dir>/signapk/env.conf). If its runtime home does not
exist, $JAVA_HOME is used instead.

Usage:
  signapk ./decoded-app
  signapk --config ~/release.json --json ./decoded-app

Exit code 0 = signed artifact guaranteed to exist."
)]
pub struct Args {
    /// Unpacked APK directory to build and sign
    #[arg(value_name = "SOURCE_DIR")]
    pub source_dir: PathBuf,

    /// Toolchain configuration file
    #[arg(short, long, value_name = "PATH", env = CONFIG_ENV)]
    pub config: Option<PathBuf>,

    /// Print the run report as JSON instead of status lines
    #[arg(long)]
    pub json: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_source_and_flags() {
        let args =
            Args::try_parse_from(["signapk", "--config", "env.json", "--json", "my app"]).unwrap();

        assert_eq!(args.source_dir, PathBuf::from("my app"));
        assert_eq!(args.config, Some(PathBuf::from("env.json")));
        assert!(args.json);
    }

    #[test]
    fn source_dir_is_required() {
        let err = Args::try_parse_from(["signapk", "--json"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn empty_source_dir_is_rejected_by_parser() {
        let err = Args::try_parse_from(["signapk", ""]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
        assert!(err.to_string().contains("SOURCE_DIR"));
    }
}

// File: cli.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

use crate::config::ConfigParameter;

#[derive(Parser, Debug)]
#[command(
    name = env!("CARGO_PKG_NAME"),
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
)]
pub struct Cli {
    #[arg(long = "host", help = "Address to bind (default 0.0.0.0)")]
    pub host: Option<String>,

    #[arg(
        short = 'p',
        long = "port",
        help = "Port to listen on (overrides PORT, default 5000)"
    )]
    pub port: Option<u16>,

    #[arg(long = "static-dir", help = "Directory holding the frontend assets")]
    pub static_dir: Option<PathBuf>,

    #[arg(
        long = "tesseract-cmd",
        help = "Path to the tesseract binary (overrides TESSERACT_CMD)"
    )]
    pub tesseract_cmd: Option<PathBuf>,

    #[arg(
        short = 't',
        long = "fetch-timeout",
        value_parser = clap::value_parser!(u64).range(1..),
        help = "Website fetch timeout in seconds"
    )]
    pub fetch_timeout: Option<u64>,

    #[arg(
        long = "ocr-timeout",
        value_parser = clap::value_parser!(u64).range(1..),
        help = "OCR timeout in seconds"
    )]
    pub ocr_timeout: Option<u64>,

    #[arg(long = "max-upload-bytes", help = "Largest accepted screenshot upload in bytes")]
    pub max_upload_bytes: Option<usize>,

    #[arg(long = "log-level", default_value = "info")]
    pub log_level: String,

    #[arg(short = 'v', long = "verbose", help = "Enable debug output")]
    pub verbose: bool,

    #[arg(short = 'q', long = "quiet", help = "Only log warnings and errors")]
    pub quiet: bool,
}

impl Cli {
    pub fn level_filter(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else if self.quiet {
            LevelFilter::Warn
        } else {
            self.log_level.parse().unwrap_or(LevelFilter::Info)
        }
    }

    /// Applies command line overrides on top of `config`.
    pub fn apply(&self, config: &mut ConfigParameter) {
        if let Some(ref host) = self.host {
            config.set_host(host.clone());
        }
        if let Some(port) = self.port {
            config.set_port(port);
        }
        if let Some(ref dir) = self.static_dir {
            config.set_static_dir(dir.clone());
        }
        if let Some(ref cmd) = self.tesseract_cmd {
            config.set_tesseract_cmd(cmd.clone());
        }
        if let Some(timeout) = self.fetch_timeout {
            config.set_fetch_timeout(timeout);
        }
        if let Some(timeout) = self.ocr_timeout {
            config.set_ocr_timeout(timeout);
        }
        if let Some(bytes) = self.max_upload_bytes {
            config.set_max_upload_bytes(bytes);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_defaults_leave_config_untouched() {
        let cli = Cli::parse_from(["riskscan"]);
        let mut config = ConfigParameter::new();
        cli.apply(&mut config);

        assert_eq!(config.port(), 5000);
        assert_eq!(config.fetch_timeout(), 5);
        assert_eq!(cli.level_filter(), LevelFilter::Info);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from([
            "riskscan",
            "--port",
            "8081",
            "--host",
            "127.0.0.1",
            "--static-dir",
            "/srv/app",
            "--tesseract-cmd",
            "/opt/tesseract",
            "-t",
            "2",
        ]);
        let mut config = ConfigParameter::new();
        cli.apply(&mut config);

        assert_eq!(config.port(), 8081);
        assert_eq!(config.host(), "127.0.0.1");
        assert_eq!(config.static_dir(), Path::new("/srv/app"));
        assert_eq!(config.tesseract_cmd(), Path::new("/opt/tesseract"));
        assert_eq!(config.fetch_timeout(), 2);
    }

    #[test]
    fn test_zero_timeouts_are_rejected() {
        assert!(Cli::try_parse_from(["riskscan", "--fetch-timeout", "0"]).is_err());
        assert!(Cli::try_parse_from(["riskscan", "-t", "0"]).is_err());
        assert!(Cli::try_parse_from(["riskscan", "--ocr-timeout", "0"]).is_err());

        let cli = Cli::try_parse_from(["riskscan", "--fetch-timeout", "1", "--ocr-timeout", "1"])
            .unwrap();
        assert_eq!(cli.fetch_timeout, Some(1));
        assert_eq!(cli.ocr_timeout, Some(1));
    }

    #[test]
    fn test_level_filter() {
        assert_eq!(
            Cli::parse_from(["riskscan", "-v"]).level_filter(),
            LevelFilter::Debug
        );
        assert_eq!(
            Cli::parse_from(["riskscan", "-q"]).level_filter(),
            LevelFilter::Warn
        );
        assert_eq!(
            Cli::parse_from(["riskscan", "--log-level", "trace"]).level_filter(),
            LevelFilter::Trace
        );
        assert_eq!(
            Cli::parse_from(["riskscan", "--log-level", "loud"]).level_filter(),
            LevelFilter::Info
        );
    }
}

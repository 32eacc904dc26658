/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! `prefetch-link`: show how link destinations resolve under a deployment's
//! path prefix and flag the ones that leave the site.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use bpaf::Bpaf;
use crossbeam_channel::{Receiver, unbounded};
use log::{error, info};
use prefetch_link::diagnostics::{self, DiagnosticEvent};
use prefetch_link::link::{LinkTarget, warn_if_external};
use prefetch_link::{LinkConfig, parse_path};
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Debug, Clone, Bpaf)]
#[bpaf(options, version)]
pub(crate) struct CliOptions {
    /// Read link settings from a TOML file
    #[bpaf(long, argument("FILE"))]
    config: Option<PathBuf>,
    /// Path prefix the site is served from; overrides the config file
    #[bpaf(long, argument("PREFIX"))]
    prefix: Option<String>,
    /// Absolute URL of the page the links appear on
    #[bpaf(long, argument("URL"))]
    location: Option<String>,
    /// Exit with failure if any destination is external
    #[bpaf(long)]
    deny_external: bool,
    /// Log every diagnostic event the inspection produces
    #[bpaf(short, long)]
    verbose: bool,
    /// Link destinations to inspect
    #[bpaf(positional("PATH"))]
    paths: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RunStatus {
    Clean,
    ExternalDenied,
    InvalidInput,
}

impl From<RunStatus> for ExitCode {
    fn from(status: RunStatus) -> Self {
        match status {
            RunStatus::Clean => ExitCode::SUCCESS,
            RunStatus::ExternalDenied => ExitCode::FAILURE,
            RunStatus::InvalidInput => ExitCode::from(2),
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "info" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub(crate) fn main() -> ExitCode {
    let options = cli_options().run();
    init_logging(options.verbose);

    let events = options.verbose.then(|| {
        let (tx, rx) = unbounded();
        diagnostics::install_global_sender(tx);
        rx
    });
    let mut stdout = std::io::stdout().lock();
    run(options, &mut stdout, events.as_ref()).into()
}

pub(crate) fn run(
    options: CliOptions,
    out: &mut impl Write,
    events: Option<&Receiver<DiagnosticEvent>>,
) -> RunStatus {
    let mut config = match &options.config {
        Some(path) => match LinkConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                error!("{e}");
                return RunStatus::InvalidInput;
            },
        },
        None => LinkConfig::default(),
    };
    if let Some(prefix) = options.prefix {
        config.path_prefix = prefix;
    }

    let location = match options.location.as_deref().map(Url::parse).transpose() {
        Ok(location) => location,
        Err(e) => {
            error!("Invalid --location: {e}");
            return RunStatus::InvalidInput;
        },
    };
    info!(
        "Resolving {} link(s) under prefix {:?}",
        options.paths.len(),
        config.path_prefix
    );

    let mut external_count = 0_usize;
    for to in &options.paths {
        let parsed = parse_path(to);
        let target = warn_if_external(to, location.as_ref());
        if target == LinkTarget::External {
            external_count += 1;
        }
        let written = writeln!(
            out,
            "{to}\thref={}\tpathname={}\tsearch={}\thash={}\t{}",
            config.with_prefix(to),
            parsed.pathname,
            parsed.search,
            parsed.hash,
            match target {
                LinkTarget::Internal => "internal",
                LinkTarget::External => "external",
            }
        );
        if let Err(e) = written {
            error!("Failed to write report: {e}");
            return RunStatus::InvalidInput;
        }
    }

    if let Some(events) = events {
        for event in events.try_iter() {
            info!("{event:?}");
        }
    }

    if options.deny_external && external_count > 0 {
        error!("{external_count} external destination(s) found");
        return RunStatus::ExternalDenied;
    }
    RunStatus::Clean
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliOptions {
        cli_options()
            .run_inner(args)
            .expect("arguments should parse")
    }

    fn report(args: &[&str]) -> (RunStatus, String) {
        let mut out = Vec::new();
        let status = run(parse(args), &mut out, None);
        (status, String::from_utf8(out).expect("report is utf-8"))
    }

    #[test]
    fn prefix_flag_overrides_config_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = dir.path().join("links.toml");
        std::fs::write(&config, "path_prefix = \"/docs\"\n").expect("write config");
        let config = config.to_str().expect("utf-8 path");

        let (_, from_file) = report(&["--config", config, "/guide"]);
        let (status, overridden) =
            report(&["--config", config, "--prefix", "/blog/", "/guide?x=1#top"]);

        assert!(from_file.contains("href=/docs/guide\t"));
        assert_eq!(status, RunStatus::Clean);
        assert_eq!(
            overridden,
            "/guide?x=1#top\thref=/blog/guide?x=1#top\tpathname=/guide\tsearch=?x=1\thash=#top\tinternal\n"
        );
    }

    #[test]
    fn deny_external_fails_only_when_an_external_path_is_present() {
        let location = "https://example.com/";

        let (allowed, _) = report(&["--location", location, "https://other.org/", "/a"]);
        let (clean, _) = report(&["--location", location, "--deny-external", "/a"]);
        let (denied, out) =
            report(&["--location", location, "--deny-external", "https://other.org/"]);

        assert_eq!(allowed, RunStatus::Clean);
        assert_eq!(clean, RunStatus::Clean);
        assert_eq!(denied, RunStatus::ExternalDenied);
        assert!(out.ends_with("\texternal\n"));
    }

    #[test]
    fn invalid_location_is_rejected_before_any_output() {
        let (status, out) = report(&["--location", "not a url", "/a"]);

        assert_eq!(status, RunStatus::InvalidInput);
        assert!(out.is_empty());
    }

    #[test]
    fn missing_config_file_is_invalid_input() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("absent.toml");

        let (status, _) = report(&["--config", missing.to_str().expect("utf-8 path"), "/a"]);

        assert_eq!(status, RunStatus::InvalidInput);
    }

    #[cfg(feature = "diagnostics")]
    #[test]
    fn verbose_run_drains_external_link_events() {
        let (tx, rx) = unbounded();
        diagnostics::install_thread_sender(tx);
        let options = parse(&[
            "-v",
            "--location",
            "https://example.com/",
            "https://other.org/",
        ]);
        assert!(options.verbose);

        let status = run(options, &mut Vec::new(), Some(&rx));
        diagnostics::clear_thread_sender();

        assert_eq!(status, RunStatus::Clean);
        assert!(rx.try_recv().is_err());
    }
}

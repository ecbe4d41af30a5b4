use anyhow::{Result, bail};
use log::debug;
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;

use crate::{
    aggregate::{DEFAULT_DEADLINE, FailurePolicy},
    registry::{FetchMetadata, Npms},
    render::Formatters,
    runtime::Runtime,
};

/// Packages summarised when none are given on the command line.
pub const DEFAULT_PACKAGES: &[&str] = &["http-responder", "pkgplay", "await-fn"];
pub const DEFAULT_TEMPLATE: &str = "./assets/readme-template.md.tmpl";
pub const DEFAULT_OUTPUT: &str = "README.md";

/// User-facing settings, usually straight from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub packages: Vec<String>,
    pub api_url: Option<String>,
    pub template: PathBuf,
    pub output: PathBuf,
    pub deadline: Duration,
    pub policy: FailurePolicy,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            packages: DEFAULT_PACKAGES.iter().map(|p| p.to_string()).collect(),
            api_url: None,
            template: PathBuf::from(DEFAULT_TEMPLATE),
            output: PathBuf::from(DEFAULT_OUTPUT),
            deadline: DEFAULT_DEADLINE,
            policy: FailurePolicy::default(),
        }
    }
}

pub struct Config<R: Runtime, F: FetchMetadata> {
    pub runtime: R,
    pub fetcher: F,
    pub packages: Vec<String>,
    pub template: PathBuf,
    pub output: PathBuf,
    pub deadline: Duration,
    pub policy: FailurePolicy,
    pub formatters: Formatters,
}

impl<R: Runtime> Config<R, Npms> {
    pub fn new(runtime: R, options: Options) -> Result<Self> {
        if options.deadline.is_zero() {
            bail!("Timeout must be greater than zero");
        }

        let packages = if options.packages.is_empty() {
            Options::default().packages
        } else {
            options.packages
        };

        let client = Client::builder()
            .user_agent("pkgstats-cli")
            .timeout(options.deadline)
            .build()?;

        let fetcher = Npms::new(client, options.api_url)?;

        debug!(
            "Summarising {} packages from {}",
            packages.len(),
            fetcher.api_url()
        );

        Ok(Self {
            runtime,
            fetcher,
            packages,
            template: options.template,
            output: options.output,
            deadline: options.deadline,
            policy: options.policy,
            formatters: Formatters::default(),
        })
    }
}

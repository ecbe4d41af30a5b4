use anyhow::Result;
use clap::Parser;
use pkgstats::aggregate::FailurePolicy;
use pkgstats::config::{DEFAULT_OUTPUT, DEFAULT_TEMPLATE, Options};
use pkgstats::generate::generate;
use std::path::PathBuf;
use std::time::Duration;

/// pkgstats - npm package statistics for your README
///
/// Fetches download counts, quality and coverage scores for a list of npm
/// packages from npms.io and renders them into a template.
///
/// Examples:
///   pkgstats                           # Default packages, default template
///   pkgstats left-pad is-odd -o STATS.md
#[derive(Parser, Debug)]
#[command(author, version = env!("PKGSTATS_VERSION"), about)]
struct Cli {
    /// Packages to summarise (defaults to the built-in list)
    #[arg(value_name = "PACKAGE")]
    packages: Vec<String>,

    /// Package metadata endpoint (defaults to https://api.npms.io/v2/package)
    #[arg(long = "api-url", env = "PKGSTATS_API_URL", value_name = "URL")]
    api_url: Option<String>,

    /// Template to render
    #[arg(
        long,
        short = 't',
        env = "PKGSTATS_TEMPLATE",
        value_name = "PATH",
        default_value = DEFAULT_TEMPLATE
    )]
    template: PathBuf,

    /// File to write, replacing any existing content
    #[arg(
        long,
        short = 'o',
        env = "PKGSTATS_OUTPUT",
        value_name = "PATH",
        default_value = DEFAULT_OUTPUT
    )]
    output: PathBuf,

    /// Overall time budget for fetching all packages, in seconds
    #[arg(long, env = "PKGSTATS_TIMEOUT", value_name = "SECS", default_value_t = 20)]
    timeout: u64,

    /// Abort on the first package that cannot be fetched instead of skipping it
    #[arg(long)]
    fail_fast: bool,
}

impl Cli {
    fn into_options(self) -> Options {
        Options {
            packages: self.packages,
            api_url: self.api_url,
            template: self.template,
            output: self.output,
            deadline: Duration::from_secs(self.timeout),
            policy: if self.fail_fast {
                FailurePolicy::FailFast
            } else {
                FailurePolicy::BestEffort
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = pkgstats::runtime::RealRuntime;

    generate(runtime, cli.into_options()).await
}

//! Concurrent metadata aggregation.
//!
//! Every package is fetched on its own tokio task. The whole batch shares a
//! single deadline; what happens to failed or unfinished fetches depends on
//! the [`FailurePolicy`].

mod summary;

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use thiserror::Error;
use tokio::task::JoinSet;
use tokio::time::{Instant, timeout_at};

pub use summary::AggregateSummary;

use crate::error::{AggregationError, FetchError};
use crate::registry::{FetchMetadata, PackageMetadata};

/// Overall time budget used when none is configured.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(20);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// The first failure (or the deadline) aborts the whole batch.
    FailFast,
    /// Failures are reported and left out of the summary.
    #[default]
    BestEffort,
}

/// A package left out of a best-effort summary.
#[derive(Debug, Error)]
pub enum PackageFailure {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("fetching `{package}` did not finish before the deadline")]
    TimedOut { package: String },
}

impl PackageFailure {
    pub fn package(&self) -> &str {
        match self {
            PackageFailure::Fetch(e) => e.package(),
            PackageFailure::TimedOut { package } => package,
        }
    }
}

/// Result of one aggregation run.
#[derive(Debug)]
pub struct Aggregation {
    pub summary: AggregateSummary,
    /// Packages included in the summary, in request order.
    pub packages: Vec<(String, PackageMetadata)>,
    /// Packages left out, in request order. Always empty under [`FailurePolicy::FailFast`].
    pub failures: Vec<PackageFailure>,
}

pub struct Aggregator<F: FetchMetadata + 'static> {
    fetcher: Arc<F>,
    deadline: Duration,
    policy: FailurePolicy,
}

impl<F: FetchMetadata + 'static> Aggregator<F> {
    pub fn new(fetcher: F, deadline: Duration, policy: FailurePolicy) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            deadline,
            policy,
        }
    }

    /// Fetches every package concurrently and reduces the results.
    #[tracing::instrument(skip(self))]
    pub async fn aggregate(&self, packages: &[String]) -> Result<Aggregation, AggregationError> {
        if packages.is_empty() {
            return Err(AggregationError::NoPackages);
        }

        let deadline = Instant::now() + self.deadline;
        let mut tasks = JoinSet::new();

        for (index, package) in packages.iter().enumerate() {
            let fetcher = Arc::clone(&self.fetcher);
            let package = package.clone();
            tasks.spawn(async move { (index, fetcher.fetch(&package).await) });
        }

        debug!(
            "Fetching {} packages with a deadline of {:?}...",
            packages.len(),
            self.deadline
        );

        // One slot per requested package; only this loop writes them.
        let mut slots: Vec<Option<Result<PackageMetadata, FetchError>>> =
            packages.iter().map(|_| None).collect();

        loop {
            match timeout_at(deadline, tasks.join_next()).await {
                Ok(None) => break,
                Ok(Some(Ok((index, result)))) => {
                    let result = match result {
                        Err(e) if self.policy == FailurePolicy::FailFast => {
                            tasks.abort_all();
                            return Err(e.into());
                        }
                        other => other,
                    };
                    if let Err(e) = &result {
                        warn!("Failed to fetch {}: {}", packages[index], e);
                    }
                    slots[index] = Some(result);
                }
                Ok(Some(Err(join_error))) => {
                    if join_error.is_panic() {
                        std::panic::resume_unwind(join_error.into_panic());
                    }
                }
                Err(_) => {
                    tasks.abort_all();
                    if self.policy == FailurePolicy::FailFast {
                        return Err(AggregationError::Timeout(self.deadline));
                    }
                    warn!(
                        "Deadline of {:?} elapsed, continuing with the packages fetched so far",
                        self.deadline
                    );
                    break;
                }
            }
        }

        let mut included = Vec::new();
        let mut failures = Vec::new();

        for (package, slot) in packages.iter().zip(slots) {
            match slot {
                Some(Ok(meta)) => included.push((package.clone(), meta)),
                Some(Err(e)) => failures.push(PackageFailure::Fetch(e)),
                None => {
                    warn!("Fetching {} did not finish before the deadline", package);
                    failures.push(PackageFailure::TimedOut {
                        package: package.clone(),
                    });
                }
            }
        }

        let summary = AggregateSummary::from_metadata(included.iter().map(|(_, meta)| meta))
            .ok_or(AggregationError::AllFailed {
                requested: packages.len(),
            })?;

        info!(
            "Aggregated {} of {} packages: {} downloads, {:.2}% quality, {:.2}% coverage",
            summary.package_count,
            packages.len(),
            summary.total_download_count,
            summary.average_quality_percent,
            summary.average_coverage_percent
        );

        Ok(Aggregation {
            summary,
            packages: included,
            failures,
        })
    }
}

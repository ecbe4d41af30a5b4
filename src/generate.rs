//! The end-to-end run: fetch, aggregate, render.

use anyhow::Result;

use crate::{
    aggregate::{Aggregation, Aggregator},
    config::{Config, Options},
    registry::FetchMetadata,
    render::Renderer,
    runtime::Runtime,
};

#[tracing::instrument(skip(runtime, options))]
pub async fn generate<R: Runtime + 'static>(runtime: R, options: Options) -> Result<()> {
    let config = Config::new(runtime, options)?;
    let output = config.output.clone();
    let requested = config.packages.len();

    let aggregation = run(config).await?;

    for failure in &aggregation.failures {
        eprintln!("skipped {}: {}", failure.package(), failure);
    }
    println!(
        "Generated {} from {} of {} packages.",
        output.display(),
        aggregation.summary.package_count,
        requested
    );
    Ok(())
}

#[tracing::instrument(skip(config))]
pub async fn run<R: Runtime, F: FetchMetadata + 'static>(
    config: Config<R, F>,
) -> Result<Aggregation> {
    let aggregator = Aggregator::new(config.fetcher, config.deadline, config.policy);
    let aggregation = aggregator.aggregate(&config.packages).await?;

    let renderer = Renderer::new(config.runtime, config.formatters);
    renderer.render(aggregation.summary, &config.template, &config.output)?;

    Ok(aggregation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::FailurePolicy;
    use crate::error::{AggregationError, FetchError, RenderError};
    use crate::registry::{MockFetchMetadata, PackageMetadata};
    use crate::render::Formatters;
    use crate::runtime::MockRuntime;
    use chrono::NaiveDate;
    use mockall::predicate::{always, eq};
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn config(
        runtime: MockRuntime,
        fetcher: MockFetchMetadata,
        policy: FailurePolicy,
    ) -> Config<MockRuntime, MockFetchMetadata> {
        Config {
            runtime,
            fetcher,
            packages: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            template: PathBuf::from("readme.tmpl"),
            output: PathBuf::from("README.md"),
            deadline: Duration::from_secs(5),
            policy,
            formatters: Formatters::default(),
        }
    }

    fn fetcher_with_one_failure() -> MockFetchMetadata {
        let mut fetcher = MockFetchMetadata::new();
        fetcher.expect_fetch().returning(|package| match package {
            "b" => Err(FetchError::Network {
                package: package.to_string(),
                cause: "connection refused".to_string(),
            }),
            "a" => Ok(PackageMetadata {
                download_count: 1_500,
                quality: 0.8,
                coverage: 0.5,
            }),
            _ => Ok(PackageMetadata {
                download_count: 500,
                quality: 1.0,
                coverage: 1.0,
            }),
        });
        fetcher
    }

    #[tokio::test]
    async fn test_run_best_effort_renders_successes() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_today()
            .returning(|| NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        runtime
            .expect_read_to_string()
            .with(eq(PathBuf::from("readme.tmpl")))
            .returning(|_| {
                Ok("{{ downloadCount }}|{{ quality }}|{{ coverage }}|{{ todayDate }}".to_string())
            });

        let written = Arc::new(Mutex::new(String::new()));
        let written_clone = Arc::clone(&written);
        runtime
            .expect_write()
            .with(eq(PathBuf::from("README.md")), always())
            .times(1)
            .returning(move |_, contents| {
                *written_clone.lock().unwrap() = String::from_utf8(contents.to_vec()).unwrap();
                Ok(())
            });

        let aggregation = run(config(
            runtime,
            fetcher_with_one_failure(),
            FailurePolicy::BestEffort,
        ))
        .await
        .unwrap();

        assert_eq!(aggregation.summary.package_count, 2);
        assert_eq!(aggregation.failures.len(), 1);
        assert_eq!(
            *written.lock().unwrap(),
            "2,000|90.00%|75.00%|March 9, 2024"
        );
    }

    #[tokio::test]
    async fn test_run_fail_fast_writes_nothing() {
        let mut runtime = MockRuntime::new();
        runtime.expect_read_to_string().never();
        runtime.expect_write().never();

        let err = run(config(
            runtime,
            fetcher_with_one_failure(),
            FailurePolicy::FailFast,
        ))
        .await
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<AggregationError>(),
            Some(AggregationError::Fetch(FetchError::Network { .. }))
        ));
    }

    #[tokio::test]
    async fn test_run_surfaces_render_error() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_read_to_string()
            .returning(|_| Err(anyhow::anyhow!("No such file or directory")));
        runtime.expect_write().never();

        let err = run(config(
            runtime,
            fetcher_with_one_failure(),
            FailurePolicy::BestEffort,
        ))
        .await
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<RenderError>(),
            Some(RenderError::Template(_))
        ));
    }
}

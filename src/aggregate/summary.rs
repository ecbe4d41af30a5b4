use serde::Serialize;

use crate::registry::PackageMetadata;

/// Totals over every package that made it into the reduction.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct AggregateSummary {
    pub total_download_count: u64,
    /// Mean quality scaled to `0..=100`.
    pub average_quality_percent: f64,
    /// Mean coverage scaled to `0..=100`.
    pub average_coverage_percent: f64,
    /// Number of packages the averages are taken over.
    pub package_count: usize,
}

impl AggregateSummary {
    /// Reduces per-package metadata into one summary.
    ///
    /// Averages divide by the number of items actually reduced, so packages
    /// that were never fetched do not drag the percentages down. Returns
    /// `None` for an empty input.
    pub fn from_metadata<'a, I>(items: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a PackageMetadata>,
    {
        let (count, downloads, quality, coverage) = items.into_iter().fold(
            (0usize, 0u64, 0f64, 0f64),
            |(count, downloads, quality, coverage), meta| {
                (
                    count + 1,
                    downloads.saturating_add(meta.download_count),
                    quality + meta.quality,
                    coverage + meta.coverage,
                )
            },
        );

        if count == 0 {
            return None;
        }

        Some(Self {
            total_download_count: downloads,
            average_quality_percent: quality / count as f64 * 100.0,
            average_coverage_percent: coverage / count as f64 * 100.0,
            package_count: count,
        })
    }
}

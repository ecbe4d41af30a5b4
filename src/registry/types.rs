use serde::{Deserialize, Serialize};

/// Quality metadata of a single package, as consumed by the aggregator.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct PackageMetadata {
    /// Sum of all periodic download counts reported for the package.
    pub download_count: u64,
    /// Quality score in `[0, 1]`.
    pub quality: f64,
    /// Test coverage in `[0, 1]`.
    pub coverage: f64,
}

/// Raw npms.io package document. Every level is optional; only the fields we
/// read are modelled, everything else is ignored.
#[derive(Deserialize, Debug, Default, PartialEq)]
pub struct RawMetadata {
    pub collected: Option<Collected>,
    pub score: Option<Score>,
}

#[derive(Deserialize, Debug, Default, PartialEq)]
pub struct Collected {
    pub npm: Option<Npm>,
    pub source: Option<Source>,
}

#[derive(Deserialize, Debug, Default, PartialEq)]
pub struct Npm {
    pub downloads: Option<Vec<Option<Downloads>>>,
}

/// One download period (`from`/`to` are not needed).
#[derive(Deserialize, Debug, Default, PartialEq)]
pub struct Downloads {
    pub count: Option<u64>,
}

#[derive(Deserialize, Debug, Default, PartialEq)]
pub struct Source {
    pub coverage: Option<f64>,
}

#[derive(Deserialize, Debug, Default, PartialEq)]
pub struct Score {
    pub detail: Option<ScoreDetail>,
}

#[derive(Deserialize, Debug, Default, PartialEq)]
pub struct ScoreDetail {
    pub quality: Option<f64>,
}

impl RawMetadata {
    /// Present `count` values of `collected.npm.downloads[]`.
    pub fn download_counts(&self) -> impl Iterator<Item = u64> + '_ {
        self.collected
            .as_ref()
            .and_then(|c| c.npm.as_ref())
            .and_then(|npm| npm.downloads.as_deref())
            .unwrap_or_default()
            .iter()
            .filter_map(|d| d.as_ref().and_then(|d| d.count))
    }

    /// `score.detail.quality`, if every step is present.
    pub fn quality(&self) -> Option<f64> {
        self.score
            .as_ref()
            .and_then(|s| s.detail.as_ref())
            .and_then(|d| d.quality)
    }

    /// `collected.source.coverage`, if every step is present.
    pub fn coverage(&self) -> Option<f64> {
        self.collected
            .as_ref()
            .and_then(|c| c.source.as_ref())
            .and_then(|s| s.coverage)
    }
}

impl From<&RawMetadata> for PackageMetadata {
    fn from(raw: &RawMetadata) -> Self {
        Self {
            download_count: raw.download_counts().fold(0u64, u64::saturating_add),
            quality: raw.quality().unwrap_or_default(),
            coverage: raw.coverage().unwrap_or_default(),
        }
    }
}

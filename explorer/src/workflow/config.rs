use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use ulacore::comparison::ComparisonStore;
use ulacore::prelude::{PatternParameters, SampleResolution};

/// A comparison trace to add before rendering.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ComparisonSpec {
    pub parameters: PatternParameters,
    #[serde(default)]
    pub name: Option<String>,
}

/// Everything needed to reproduce one rendered scene.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionConfig {
    pub live: PatternParameters,
    #[serde(default)]
    pub comparisons: Vec<ComparisonSpec>,
    #[serde(default)]
    pub resolution: SampleResolution,
    /// Seed for fallback comparison colors.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl SessionConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading session config {}", path_ref.display()))?;
        let config: SessionConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing session config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(live: PatternParameters, curve_samples: usize) -> Self {
        Self {
            live,
            comparisons: Vec::new(),
            resolution: SampleResolution {
                curve_samples,
                ..Default::default()
            },
            seed: None,
        }
    }

    /// Fresh store holding every configured comparison, in order.
    pub fn to_store(&self) -> anyhow::Result<ComparisonStore> {
        let mut store = match self.seed {
            Some(seed) => ComparisonStore::with_seed(seed),
            None => ComparisonStore::new(),
        };
        for (idx, comparison) in self.comparisons.iter().enumerate() {
            store
                .add(comparison.parameters, comparison.name.clone())
                .with_context(|| format!("adding comparison #{}", idx + 1))?;
        }
        Ok(store)
    }
}

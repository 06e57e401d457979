//! Per-session collection of saved comparison traces.
//!
//! Entries are append-only until a full [`ComparisonStore::clear`]; there is
//! no way to edit or drop a single entry.

use crate::comparison::palette::next_color;
use crate::prelude::{PatternError, PatternFamily, PatternParameters, PatternResult};
use crate::telemetry::log::LogManager;
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonEntry {
    pub family: PatternFamily,
    pub parameters: PatternParameters,
    pub color: String,
    pub display_name: String,
    /// 1-based position at insertion.
    pub sequence_index: usize,
}

#[derive(Debug, Clone)]
pub struct ComparisonStore {
    entries: Vec<ComparisonEntry>,
    rng: StdRng,
    logger: LogManager,
}

impl ComparisonStore {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Store whose fallback colors are reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            entries: Vec::new(),
            rng,
            logger: LogManager::new(),
        }
    }

    /// Validates and appends `parameters` with a fresh color.
    ///
    /// The display name defaults to `Plot k`, k being the entry's sequence index.
    pub fn add(
        &mut self,
        parameters: PatternParameters,
        display_name: Option<String>,
    ) -> PatternResult<&ComparisonEntry> {
        let family = parameters.family();
        if !family.supports_comparison() {
            return Err(PatternError::InvalidParameter(format!(
                "{} patterns cannot be compared",
                family
            )));
        }
        parameters.validate()?;

        let in_use = self.entries.iter().map(|entry| entry.color.as_str());
        let color = next_color(in_use, &mut self.rng);
        if color.starts_with("rgb(") {
            self.logger
                .record(&format!("palette exhausted, using random color {}", color));
        }

        let sequence_index = self.entries.len() + 1;
        let display_name = display_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| format!("Plot {}", sequence_index));

        self.logger.record(&format!(
            "comparison {} added: {} {}",
            sequence_index, family, color
        ));
        self.entries.push(ComparisonEntry {
            family,
            parameters,
            color,
            display_name,
            sequence_index,
        });
        Ok(&self.entries[sequence_index - 1])
    }

    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            self.logger
                .record(&format!("cleared {} comparisons", self.entries.len()));
        }
        self.entries.clear();
    }

    /// Entries of `family` in insertion order.
    pub fn entries_for(&self, family: PatternFamily) -> Vec<&ComparisonEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.family == family)
            .collect()
    }

    pub fn entries(&self) -> &[ComparisonEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ComparisonStore {
    fn default() -> Self {
        Self::new()
    }
}

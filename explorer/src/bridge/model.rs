use serde::{Deserialize, Serialize};
use ulacore::prelude::{ControlSpec, PatternFamily, PatternParameters};
use ulacore::telemetry::MetricsSnapshot;

/// Body of `POST /sessions/{id}/comparisons`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddComparisonRequest {
    pub parameters: PatternParameters,
    #[serde(default)]
    pub name: Option<String>,
}

/// Controls and help text of one family, for building input forms.
#[derive(Debug, Clone, Serialize)]
pub struct FamilySchema {
    pub family: PatternFamily,
    pub title: &'static str,
    pub description: &'static str,
    pub comparable: bool,
    pub controls: Vec<ControlSpec>,
}

impl FamilySchema {
    pub fn for_family(family: PatternFamily) -> Self {
        let strategy = family.strategy();
        Self {
            family,
            title: strategy.title(),
            description: strategy.description(),
            comparable: family.supports_comparison(),
            controls: strategy.controls(),
        }
    }

    pub fn all() -> Vec<Self> {
        PatternFamily::ALL.into_iter().map(Self::for_family).collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Body of `GET /metrics`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BridgeStatus {
    #[serde(flatten)]
    pub counters: MetricsSnapshot,
    /// Sessions currently holding at least one comparison.
    pub active_sessions: usize,
}

use crate::workflow::config::SessionConfig;
use anyhow::Context;
use ulacore::render::{PatternRenderer, RenderedScene};

#[derive(Clone)]
pub struct Runner {
    config: SessionConfig,
}

impl Runner {
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }

    /// Builds the session's comparison store and renders the live pattern over it.
    pub fn execute(&self) -> anyhow::Result<RenderedScene> {
        let store = self.config.to_store().context("building comparison store")?;
        let renderer = PatternRenderer::new(self.config.resolution);
        renderer
            .render_session(&self.config.live, &store)
            .with_context(|| format!("rendering {} pattern", self.config.live.family()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::config::ComparisonSpec;
    use ulacore::prelude::PatternParameters;
    use ulacore::render::SeriesRole;

    #[test]
    fn runner_overlays_configured_comparisons() {
        let mut cfg = SessionConfig::from_args(PatternParameters::taper(8, 0.5, 30.0), 361);
        cfg.seed = Some(1);
        cfg.comparisons.push(ComparisonSpec {
            parameters: PatternParameters::taper(8, 0.5, 40.0),
            name: None,
        });
        cfg.comparisons.push(ComparisonSpec {
            parameters: PatternParameters::uniform(8, 0.5, 0.0),
            name: None,
        });

        let scene = Runner::new(cfg).execute().unwrap();
        let chart = scene.chart().unwrap();
        assert_eq!(chart.with_role(SeriesRole::Comparison).count(), 1);
        assert_eq!(chart.with_role(SeriesRole::Reference).count(), 1);
        assert_eq!(chart.live().unwrap().x.len(), 361);
    }

    #[test]
    fn runner_rejects_invalid_live_parameters() {
        let cfg = SessionConfig::from_args(PatternParameters::steered(8, 2.0, 30.0), 100);
        assert!(Runner::new(cfg).execute().is_err());
    }
}

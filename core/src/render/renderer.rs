use crate::comparison::store::{ComparisonEntry, ComparisonStore};
use crate::math::window::{TaperCondition, TaperWindow};
use crate::pattern::grating::GratingCheckPattern;
use crate::pattern::taper::TaperedPattern;
use crate::prelude::{
    FamilyParameters, PatternCurve, PatternError, PatternFamily,
    PatternParameters, PatternResult, PatternStrategy, SampleResolution,
};
use crate::render::scene::{
    ChartScene, ContourGrid, LineStyle, RenderedScene, SceneView, Series, SeriesRole,
    SpatialScene, StatusMessage, SurfaceGrid,
};
use crate::telemetry::log::LogManager;

/// Color of the live trace.
pub const LIVE_COLOR: &str = "#1f77b4";
/// Color of grating-lobe markers and the sidelobe reference line.
pub const MARKER_COLOR: &str = "red";
const TRACE_WIDTH: f64 = 2.0;

const ANGLE_AXIS: &str = "Angle θ (degrees)";
const MAGNITUDE_AXIS: &str = "Normalized Array Factor";

/// Composes the live pattern and its comparison overlays into one scene.
pub struct PatternRenderer {
    resolution: SampleResolution,
    logger: LogManager,
}

impl PatternRenderer {
    pub fn new(resolution: SampleResolution) -> Self {
        Self {
            resolution,
            logger: LogManager::new(),
        }
    }

    /// Renders `live` plus the entries of its family stored in `store`.
    pub fn render_session(
        &self,
        live: &PatternParameters,
        store: &ComparisonStore,
    ) -> PatternResult<RenderedScene> {
        self.render(live, store.entries_for(live.family()))
    }

    /// Renders `live` and overlays each comparison of the same family as a dashed trace.
    pub fn render<'a, I>(&self, live: &PatternParameters, comparisons: I) -> PatternResult<RenderedScene>
    where
        I: IntoIterator<Item = &'a ComparisonEntry>,
    {
        let family = live.family();
        let strategy = family.strategy();
        let view = match live.variant {
            FamilyParameters::Spatial3D => {
                let grid = strategy
                    .compute(live, &self.resolution)?
                    .into_spatial()
                    .ok_or_else(|| {
                        PatternError::InvalidParameter(format!("{} did not produce a grid", family))
                    })?;
                if comparisons.into_iter().next().is_some() {
                    self.logger
                        .warn("comparison overlays are not drawn on 3D scenes");
                }
                SceneView::Spatial(SpatialScene {
                    label: strategy.summary(live),
                    surface: SurfaceGrid {
                        x: grid.x,
                        y: grid.y,
                        z: grid.z,
                    },
                    contour: ContourGrid {
                        title: "Array Factor Contour Plot".into(),
                        x_axis_title: "Azimuth (degrees)".into(),
                        y_axis_title: "Elevation (degrees)".into(),
                        azimuth_deg: grid.azimuth_deg,
                        elevation_deg: grid.elevation_deg,
                        magnitude: grid.magnitude,
                    },
                })
            }
            _ => SceneView::Chart(self.render_chart(strategy, live, comparisons)?),
        };

        let (x_axis_title, y_axis_title) = match family {
            PatternFamily::Spatial3D => ("X", "Y"),
            _ => (ANGLE_AXIS, MAGNITUDE_AXIS),
        };

        Ok(RenderedScene {
            family,
            title: strategy.title().to_string(),
            x_axis_title: x_axis_title.to_string(),
            y_axis_title: y_axis_title.to_string(),
            view,
        })
    }

    /// Curve of a 2D parameter set, plus the taper that shaped it for the taper family.
    fn trace(
        &self,
        strategy: &dyn PatternStrategy,
        params: &PatternParameters,
    ) -> PatternResult<(PatternCurve, Option<TaperWindow>)> {
        if let FamilyParameters::Taper { .. } = params.variant {
            let (window, curve) = TaperedPattern.evaluate(params, &self.resolution)?;
            return Ok((curve, Some(window)));
        }
        let curve = strategy
            .compute(params, &self.resolution)?
            .into_curve()
            .ok_or_else(|| {
                PatternError::InvalidParameter(format!(
                    "{} did not produce a curve",
                    strategy.family()
                ))
            })?;
        Ok((curve, None))
    }

    fn render_chart<'a, I>(
        &self,
        strategy: &dyn PatternStrategy,
        live: &PatternParameters,
        comparisons: I,
    ) -> PatternResult<ChartScene>
    where
        I: IntoIterator<Item = &'a ComparisonEntry>,
    {
        let family = strategy.family();
        let (curve, live_window) = self.trace(strategy, live)?;
        let mut series = vec![Series::from_curve(
            strategy.summary(live),
            SeriesRole::Live,
            LIVE_COLOR,
            LineStyle::Solid,
            TRACE_WIDTH,
            curve,
        )];
        let mut scene = ChartScene {
            series: Vec::new(),
            grating: None,
            taper: None,
            status: None,
        };

        if let FamilyParameters::GratingCheck { .. } = live.variant {
            let report = GratingCheckPattern.report(live)?;
            for &angle in &report.lobe_angles_deg {
                series.push(Series::segment(
                    "Grating Lobe".into(),
                    MARKER_COLOR,
                    (angle, 0.0),
                    (angle, 1.0),
                ));
            }
            scene.status = Some(if report.lobes_present {
                StatusMessage::warning(report.status_text())
            } else {
                StatusMessage::success(report.status_text())
            });
            scene.grating = Some(report);
        }

        if let Some(window) = live_window {
            let level = window.reference_level();
            series.push(Series::segment(
                format!("Desired SLL ({} dB)", window.sidelobe_level_db),
                MARKER_COLOR,
                (0.0, level),
                (180.0, level),
            ));
            scene.status = match window.condition {
                TaperCondition::Nominal => None,
                TaperCondition::NearUniform => Some(StatusMessage::warning(format!(
                    "N={} is too small for a {} dB Chebyshev taper; weights are near-uniform",
                    live.element_count, window.sidelobe_level_db
                ))),
                TaperCondition::IllConditioned => Some(StatusMessage::warning(format!(
                    "Chebyshev taper for N={} at {} dB is ill-conditioned",
                    live.element_count, window.sidelobe_level_db
                ))),
            };
            scene.taper = Some(window);
        }

        let mut overlays = 0;
        for entry in comparisons {
            if entry.family != family {
                self.logger.warn(&format!(
                    "skipping {} comparison '{}' on a {} scene",
                    entry.family, entry.display_name, family
                ));
                continue;
            }
            let (curve, window) = self.trace(strategy, &entry.parameters)?;
            let mut label = format!(
                "{} ({})",
                entry.display_name,
                strategy.summary(&entry.parameters)
            );
            if let Some(note) = window.as_ref().and_then(condition_note) {
                label.push_str(&format!(" [{}]", note));
            }
            series.push(Series::from_curve(
                label,
                SeriesRole::Comparison,
                &entry.color,
                LineStyle::Dash,
                TRACE_WIDTH,
                curve,
            ));
            overlays += 1;
        }

        self.logger.record(&format!(
            "rendered {} with {} comparison traces",
            family, overlays
        ));
        scene.series = series;
        Ok(scene)
    }
}

/// Legend note for a taper that could not be realized as designed.
fn condition_note(window: &TaperWindow) -> Option<&'static str> {
    if !window.is_degenerate() {
        return None;
    }
    Some(match window.condition {
        TaperCondition::NearUniform => "near-uniform taper",
        _ => "ill-conditioned taper",
    })
}

impl Default for PatternRenderer {
    fn default() -> Self {
        Self::new(SampleResolution::default())
    }
}

/// Renders one scene without keeping any state between calls.
pub fn render<'a, I>(
    live: &PatternParameters,
    comparisons: I,
    resolution: SampleResolution,
) -> PatternResult<RenderedScene>
where
    I: IntoIterator<Item = &'a ComparisonEntry>,
{
    PatternRenderer::new(resolution).render(live, comparisons)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::scene::StatusLevel;

    fn chart(scene: &RenderedScene) -> &ChartScene {
        scene.chart().expect("2D family renders a chart")
    }

    #[test]
    fn live_trace_is_solid_default_color() {
        let scene = render(
            &PatternParameters::uniform(8, 0.5, 0.0),
            Vec::<&ComparisonEntry>::new(),
            SampleResolution::default(),
        )
        .unwrap();
        assert_eq!(scene.title, "ULA Radiation Pattern");
        let chart = chart(&scene);
        assert_eq!(chart.series.len(), 1);
        let live = chart.live().unwrap();
        assert_eq!(live.color, LIVE_COLOR);
        assert_eq!(live.style, LineStyle::Solid);
        assert_eq!(live.x.len(), 1000);
        assert!(chart.status.is_none());
    }

    #[test]
    fn comparisons_of_active_family_are_dashed_overlays() {
        let mut store = ComparisonStore::with_seed(3);
        store
            .add(PatternParameters::uniform(8, 0.5, 0.0), None)
            .unwrap();
        store
            .add(PatternParameters::steered(8, 0.5, 60.0), None)
            .unwrap();
        store
            .add(PatternParameters::uniform(16, 0.5, 1.0), None)
            .unwrap();

        let renderer = PatternRenderer::default();
        let scene = renderer
            .render_session(&PatternParameters::uniform(4, 0.5, 0.0), &store)
            .unwrap();
        let overlays: Vec<_> = chart(&scene).with_role(SeriesRole::Comparison).collect();
        assert_eq!(overlays.len(), 2);
        assert_eq!(overlays[0].label, "Plot 1 (N=8, d=0.5λ, β=0.00 rad)");
        assert_eq!(overlays[1].label, "Plot 3 (N=16, d=0.5λ, β=1.00 rad)");
        assert!(overlays.iter().all(|s| s.style == LineStyle::Dash));
        assert_eq!(overlays[0].color, store.entries()[0].color);
        assert_eq!(overlays[1].color, store.entries()[2].color);
    }

    #[test]
    fn foreign_family_entries_are_skipped() {
        let mut store = ComparisonStore::with_seed(3);
        store
            .add(PatternParameters::steered(8, 0.5, 60.0), None)
            .unwrap();
        let scene = render(
            &PatternParameters::uniform(8, 0.5, 0.0),
            store.entries(),
            SampleResolution::default(),
        )
        .unwrap();
        assert_eq!(chart(&scene).series.len(), 1);
    }

    #[test]
    fn grating_scene_carries_markers_and_warning() {
        let scene = PatternRenderer::default()
            .render(
                &PatternParameters::grating_check(8, 0.6, 1.0),
                Vec::<&ComparisonEntry>::new(),
            )
            .unwrap();
        let chart = chart(&scene);
        let markers: Vec<_> = chart.with_role(SeriesRole::Reference).collect();
        assert_eq!(markers.len(), 2);
        assert!(markers.iter().all(|m| m.y == vec![0.0, 1.0] && m.x[0] == m.x[1]));
        assert!(chart.grating.as_ref().unwrap().lobes_present);
        let status = chart.status.as_ref().unwrap();
        assert_eq!(status.level, StatusLevel::Warning);
        assert_eq!(status.text, "Grating lobes likely: d = 0.60 > λ/2 = 0.50");
    }

    #[test]
    fn grating_scene_without_lobes_reports_success() {
        let scene = PatternRenderer::default()
            .render(
                &PatternParameters::grating_check(8, 0.4, 1.0),
                Vec::<&ComparisonEntry>::new(),
            )
            .unwrap();
        let chart = chart(&scene);
        assert_eq!(chart.with_role(SeriesRole::Reference).count(), 0);
        assert!(!chart.grating.as_ref().unwrap().lobes_present);
        assert_eq!(chart.status.as_ref().unwrap().level, StatusLevel::Success);
    }

    #[test]
    fn taper_scene_draws_sidelobe_reference() {
        let scene = PatternRenderer::default()
            .render(
                &PatternParameters::taper(8, 0.5, 30.0),
                Vec::<&ComparisonEntry>::new(),
            )
            .unwrap();
        let chart = chart(&scene);
        let reference = chart.with_role(SeriesRole::Reference).next().unwrap();
        assert_eq!(reference.label, "Desired SLL (30 dB)");
        assert_eq!(reference.x, vec![0.0, 180.0]);
        let expected = 10f64.powf(-1.5);
        assert!(reference.y.iter().all(|&y| (y - expected).abs() < 1e-12));
        assert_eq!(chart.taper.as_ref().unwrap().weights.len(), 8);
        assert!(chart.status.is_none());
    }

    #[test]
    fn degenerate_taper_is_surfaced() {
        let scene = PatternRenderer::default()
            .render(
                &PatternParameters::taper(2, 0.5, 40.0),
                Vec::<&ComparisonEntry>::new(),
            )
            .unwrap();
        let status = chart(&scene).status.clone().unwrap();
        assert_eq!(status.level, StatusLevel::Warning);
        assert!(status.text.contains("near-uniform"));
    }

    #[test]
    fn degenerate_taper_overlay_is_labelled() {
        let mut store = ComparisonStore::with_seed(5);
        store
            .add(PatternParameters::taper(2, 0.5, 40.0), None)
            .unwrap();
        store
            .add(PatternParameters::taper(8, 0.5, 30.0), None)
            .unwrap();

        let scene = PatternRenderer::default()
            .render_session(&PatternParameters::taper(8, 0.5, 30.0), &store)
            .unwrap();
        let chart = chart(&scene);
        let overlays: Vec<_> = chart.with_role(SeriesRole::Comparison).collect();
        assert_eq!(
            overlays[0].label,
            "Plot 1 (N=2, d=0.5λ, R=40 dB) [near-uniform taper]"
        );
        assert_eq!(overlays[1].label, "Plot 2 (N=8, d=0.5λ, R=30 dB)");
        assert!(chart.status.is_none());
        assert_eq!(chart.taper.as_ref().unwrap().weights.len(), 8);
    }

    #[test]
    fn spatial_scene_has_surface_and_contour() {
        let scene = PatternRenderer::default()
            .render(
                &PatternParameters::spatial(8, 0.5),
                Vec::<&ComparisonEntry>::new(),
            )
            .unwrap();
        assert!(scene.chart().is_none());
        let spatial = scene.spatial().unwrap();
        assert_eq!(spatial.surface.x.dim(), (100, 100));
        assert_eq!(spatial.contour.magnitude.dim(), (100, 100));
        assert_eq!(spatial.contour.x_axis_title, "Azimuth (degrees)");
    }

    #[test]
    fn invalid_live_parameters_block_render() {
        let result = render(
            &PatternParameters::uniform(1, 0.5, 0.0),
            Vec::<&ComparisonEntry>::new(),
            SampleResolution::default(),
        );
        assert!(matches!(result, Err(PatternError::InvalidParameter(_))));
    }
}

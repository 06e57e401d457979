//! Chart-ready output handed to whatever draws the patterns.

use crate::math::window::TaperWindow;
use crate::pattern::grating::GratingLobeReport;
use crate::prelude::{PatternCurve, PatternFamily};
use ndarray::Array2;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    Solid,
    Dash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesRole {
    Live,
    Comparison,
    /// Grating-lobe markers and sidelobe reference lines.
    Reference,
}

/// One labelled x/y trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: String,
    pub role: SeriesRole,
    pub color: String,
    pub style: LineStyle,
    pub width: f64,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Series {
    pub fn from_curve(
        label: String,
        role: SeriesRole,
        color: &str,
        style: LineStyle,
        width: f64,
        curve: PatternCurve,
    ) -> Self {
        Self {
            label,
            role,
            color: color.to_string(),
            style,
            width,
            x: curve.angles_deg,
            y: curve.magnitudes,
        }
    }

    pub fn segment(label: String, color: &str, from: (f64, f64), to: (f64, f64)) -> Self {
        Self {
            label,
            role: SeriesRole::Reference,
            color: color.to_string(),
            style: LineStyle::Dash,
            width: 1.0,
            x: vec![from.0, to.0],
            y: vec![from.1, to.1],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusLevel {
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
}

impl StatusMessage {
    pub fn success(text: String) -> Self {
        Self {
            level: StatusLevel::Success,
            text,
        }
    }

    pub fn warning(text: String) -> Self {
        Self {
            level: StatusLevel::Warning,
            text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartScene {
    pub series: Vec<Series>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grating: Option<GratingLobeReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taper: Option<TaperWindow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusMessage>,
}

impl ChartScene {
    pub fn with_role(&self, role: SeriesRole) -> impl Iterator<Item = &Series> {
        self.series.iter().filter(move |series| series.role == role)
    }

    pub fn live(&self) -> Option<&Series> {
        self.with_role(SeriesRole::Live).next()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurfaceGrid {
    pub x: Array2<f64>,
    pub y: Array2<f64>,
    pub z: Array2<f64>,
}

/// Unprojected magnitude, rows = elevation, columns = azimuth.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContourGrid {
    pub title: String,
    pub x_axis_title: String,
    pub y_axis_title: String,
    pub azimuth_deg: Vec<f64>,
    pub elevation_deg: Vec<f64>,
    pub magnitude: Array2<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpatialScene {
    pub label: String,
    pub surface: SurfaceGrid,
    pub contour: ContourGrid,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SceneView {
    Chart(ChartScene),
    Spatial(SpatialScene),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedScene {
    pub family: PatternFamily,
    pub title: String,
    pub x_axis_title: String,
    pub y_axis_title: String,
    pub view: SceneView,
}

impl RenderedScene {
    pub fn chart(&self) -> Option<&ChartScene> {
        match &self.view {
            SceneView::Chart(chart) => Some(chart),
            SceneView::Spatial(_) => None,
        }
    }

    pub fn spatial(&self) -> Option<&SpatialScene> {
        match &self.view {
            SceneView::Spatial(spatial) => Some(spatial),
            SceneView::Chart(_) => None,
        }
    }
}

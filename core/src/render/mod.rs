pub mod renderer;
pub mod scene;

pub use renderer::{render, PatternRenderer, LIVE_COLOR, MARKER_COLOR};
pub use scene::{
    ChartScene, ContourGrid, LineStyle, RenderedScene, SceneView, Series, SeriesRole,
    SpatialScene, StatusLevel, StatusMessage, SurfaceGrid,
};

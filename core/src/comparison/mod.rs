pub mod palette;
pub mod store;

pub use palette::{next_color, DISTINCT_COLORS};
pub use store::{ComparisonEntry, ComparisonStore};

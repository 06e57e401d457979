use ndarray::{Array2, Zip};

pub struct MatrixHelper;

impl MatrixHelper {
    /// Coordinate matrices with `rows.len()` rows and `cols.len()` columns.
    ///
    /// The first matrix repeats `cols` along each row, the second repeats `rows`
    /// down each column.
    pub fn meshgrid(cols: &[f64], rows: &[f64]) -> (Array2<f64>, Array2<f64>) {
        let shape = (rows.len(), cols.len());
        let col_grid = Array2::from_shape_fn(shape, |(_, c)| cols[c]);
        let row_grid = Array2::from_shape_fn(shape, |(r, _)| rows[r]);
        (col_grid, row_grid)
    }

    /// Projects radius `r` at azimuth `az` and polar angle `el` (radians) to X, Y, Z.
    pub fn spherical_to_cartesian(
        r: &Array2<f64>,
        az: &Array2<f64>,
        el: &Array2<f64>,
    ) -> (Array2<f64>, Array2<f64>, Array2<f64>) {
        let x = Zip::from(r)
            .and(az)
            .and(el)
            .map_collect(|&r, &az, &el| r * el.sin() * az.cos());
        let y = Zip::from(r)
            .and(az)
            .and(el)
            .map_collect(|&r, &az, &el| r * el.sin() * az.sin());
        let z = Zip::from(r).and(el).map_collect(|&r, &el| r * el.cos());
        (x, y, z)
    }
}

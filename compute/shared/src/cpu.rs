//! Facilities that are specific to CPU implementations

use data::{buffers::Grid, Precision, FIRST_INTERIOR};
use ndarray::{s, ArrayView2, ArrayViewMut2, Zip};

/// Shape of the input neighborhood needed to compute one output cell
pub const STENCIL_SHAPE: [usize; 2] = [3, 3];

/// Relax a band of interior rows
///
/// - `source` is the full grid of the previous iteration.
/// - `band` is the full-width slice of the destination grid that covers rows
///   `first_row..first_row + band.nrows()`. These must all be interior rows.
///
/// Every interior cell of the band is replaced by the mean of its four
/// orthogonal neighbors in `source`. The leftmost and rightmost column of the
/// band are boundary cells and are left alone, as are the prior contents of
/// the band, which are never read.
///
/// Returns the largest absolute difference between a new value and the value
/// of the same cell in `source`.
pub fn relax_band(
    source: ArrayView2<'_, Precision>,
    mut band: ArrayViewMut2<'_, Precision>,
    first_row: usize,
) -> Precision {
    let [rows, cols] = [band.nrows(), band.ncols()];
    assert_eq!(cols, source.ncols(), "band must span the full grid width");
    assert!(
        first_row >= FIRST_INTERIOR && first_row + rows < source.nrows(),
        "band must only cover interior rows"
    );
    if rows == 0 || cols < STENCIL_SHAPE[1] {
        return 0.0;
    }

    // Each output cell is matched with the 3x3 input window centered on it
    let input = source.slice(s![first_row - 1..first_row + rows + 1, ..]);
    let output = band.slice_mut(s![.., 1..cols - 1]);
    Zip::from(output)
        .and(input.windows(STENCIL_SHAPE))
        .fold(0.0, |largest: Precision, out, window| {
            let new = (window[[2, 1]] + window[[0, 1]] + window[[1, 2]] + window[[1, 0]]) / 4.0;
            *out = new;
            largest.max((new - window[[1, 1]]).abs())
        })
}

/// Relax every interior cell of `destination` from `source`
///
/// Convenience wrapper around [`relax_band`] for sequential backends.
pub fn relax_grid(source: &Grid, destination: &mut Grid) -> Precision {
    let last_row = source.nrows().saturating_sub(1).max(FIRST_INTERIOR);
    relax_band(
        source.view(),
        destination.slice_mut(s![FIRST_INTERIOR..last_row, ..]),
        FIRST_INTERIOR,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn four_neighbor_mean() {
        let source = array![
            [0.0, 1.0, 2.0, 0.0],
            [3.0, 4.0, 5.0, 6.0],
            [7.0, 8.0, 9.0, 10.0],
            [0.0, 11.0, 12.0, 0.0],
        ];
        // Prior destination contents must not influence the result
        let mut destination = Grid::from_elem((4, 4), -100.0);
        let largest = relax_grid(&source, &mut destination);

        let expected_11 = (8.0 + 1.0 + 5.0 + 3.0) / 4.0;
        let expected_12 = (9.0 + 2.0 + 6.0 + 4.0) / 4.0;
        let expected_21 = (11.0 + 4.0 + 9.0 + 7.0) / 4.0;
        let expected_22 = (12.0 + 5.0 + 10.0 + 8.0) / 4.0;
        assert_eq!(destination[[1, 1]], expected_11);
        assert_eq!(destination[[1, 2]], expected_12);
        assert_eq!(destination[[2, 1]], expected_21);
        assert_eq!(destination[[2, 2]], expected_22);

        let expected_largest = [
            (expected_11 - 4.0f64).abs(),
            (expected_12 - 5.0f64).abs(),
            (expected_21 - 8.0f64).abs(),
            (expected_22 - 9.0f64).abs(),
        ]
        .into_iter()
        .fold(0.0, Precision::max);
        assert_eq!(largest, expected_largest);
    }

    #[test]
    fn boundary_is_untouched() {
        let source = Grid::from_shape_fn((6, 6), |(row, col)| (row * 6 + col) as Precision);
        let mut destination = Grid::from_elem((6, 6), -1.0);
        relax_grid(&source, &mut destination);
        for idx in 0..6 {
            assert_eq!(destination[[0, idx]], -1.0);
            assert_eq!(destination[[5, idx]], -1.0);
            assert_eq!(destination[[idx, 0]], -1.0);
            assert_eq!(destination[[idx, 5]], -1.0);
        }
        assert!(destination
            .slice(s![1..5, 1..5])
            .iter()
            .all(|&value| value != -1.0));
    }

    #[test]
    fn bands_match_whole_grid() {
        let source = Grid::from_shape_fn((7, 7), |(row, col)| ((row * 31 + col * 17) % 11) as Precision);
        let mut whole = Grid::zeros((7, 7));
        let whole_largest = relax_grid(&source, &mut whole);

        let mut banded = Grid::zeros((7, 7));
        let mut banded_largest: Precision = 0.0;
        for (start, end) in [(1, 3), (3, 4), (4, 6)] {
            let band = banded.slice_mut(s![start..end, ..]);
            banded_largest = banded_largest.max(relax_band(source.view(), band, start));
        }
        assert_eq!(whole, banded);
        assert_eq!(whole_largest, banded_largest);
    }

    #[test]
    fn steady_state_does_not_change() {
        let source = Grid::from_elem((5, 5), 0.5);
        let mut destination = Grid::zeros((5, 5));
        assert_eq!(relax_grid(&source, &mut destination), 0.0);
        assert!(destination.slice(s![1..4, 1..4]).iter().all(|&value| value == 0.5));
    }

    #[test]
    #[should_panic]
    fn boundary_rows_are_rejected() {
        let source = Grid::zeros((5, 5));
        let mut destination = Grid::zeros((5, 5));
        relax_band(source.view(), destination.slice_mut(s![0..2, ..]), 0);
    }
}

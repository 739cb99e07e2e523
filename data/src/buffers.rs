//! Ping-pong grid storage

use crate::Precision;
use ndarray::{Array2, ArrayViewMut2};

/// Square grid of cells
///
/// The outermost rows and columns are the fixed boundary of the problem, the
/// remaining cells form the interior that gets relaxed.
pub type Grid = Array2<Precision>;

/// One of the two buffers of a [`BufferPair`]
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum BufferId {
    A,
    B,
}
//
impl BufferId {
    /// Buffer that iteration number `iteration` (counting from 0) writes to
    ///
    /// Iterations alternate between writing to A (reading B) and writing to B
    /// (reading A), starting with A.
    pub fn written_at(iteration: usize) -> Self {
        if iteration % 2 == 0 {
            Self::A
        } else {
            Self::B
        }
    }

    /// The other buffer of the pair
    pub fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }

    /// Position of this buffer within the pair
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Pair of grids where one acts as a source and the other as a destination
///
/// Both grids are stored in standard (row-major, contiguous) layout, which
/// the relaxation backends rely on to hand out row bands.
#[derive(Clone, Debug, PartialEq)]
pub struct BufferPair([Grid; 2]);
//
impl BufferPair {
    /// Set up a buffer pair where both buffers start as copies of `initial`
    pub fn new(initial: Grid) -> Self {
        let initial = Self::standard(initial);
        Self([initial.clone(), initial])
    }

    /// Set up a buffer pair from two pre-seeded grids
    ///
    /// The grids are expected to have identical contents. Their shapes are
    /// only checked once a backend is asked to relax them.
    pub fn from_grids(a: Grid, b: Grid) -> Self {
        Self([Self::standard(a), Self::standard(b)])
    }

    /// Access one of the buffers
    pub fn get(&self, id: BufferId) -> &Grid {
        &self.0[id.index()]
    }

    /// Shapes of buffers A and B
    pub fn shapes(&self) -> [[usize; 2]; 2] {
        let shape = |grid: &Grid| [grid.nrows(), grid.ncols()];
        [shape(&self.0[0]), shape(&self.0[1])]
    }

    /// Access the source and destination buffers of an iteration that writes
    /// to `destination`
    pub fn source_and_destination(&mut self, destination: BufferId) -> (&Grid, &mut Grid) {
        let [a, b] = &mut self.0;
        match destination {
            BufferId::A => (b, a),
            BufferId::B => (a, b),
        }
    }

    /// Mutably access the cells of both buffers at once
    ///
    /// Views are handed out instead of the grids themselves, so that the
    /// buffers cannot be replaced by grids of another shape or layout.
    pub fn grids_mut(&mut self) -> [ArrayViewMut2<'_, Precision>; 2] {
        let [a, b] = &mut self.0;
        [a.view_mut(), b.view_mut()]
    }

    /// Extract the buffer that holds a result, dropping the other one
    pub fn into_grid(self, id: BufferId) -> Grid {
        let [a, b] = self.0;
        match id {
            BufferId::A => a,
            BufferId::B => b,
        }
    }

    /// Make sure a grid uses the row-major contiguous layout
    fn standard(grid: Grid) -> Grid {
        if grid.is_standard_layout() {
            grid
        } else {
            grid.as_standard_layout().into_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn buffers_alternate() {
        assert_eq!(BufferId::written_at(0), BufferId::A);
        assert_eq!(BufferId::written_at(1), BufferId::B);
        assert_eq!(BufferId::written_at(2), BufferId::A);
        assert_eq!(BufferId::A.other(), BufferId::B);
        assert_eq!(BufferId::B.other(), BufferId::A);
    }

    #[test]
    fn new_pair_holds_identical_copies() {
        let initial = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]];
        let pair = BufferPair::new(initial.clone());
        assert_eq!(pair.get(BufferId::A), &initial);
        assert_eq!(pair.get(BufferId::B), &initial);
        assert_eq!(pair.shapes(), [[3, 3], [3, 3]]);
    }

    #[test]
    fn source_is_the_other_buffer() {
        let mut pair = BufferPair::from_grids(Grid::zeros((3, 3)), Grid::ones((3, 3)));

        let (source, destination) = pair.source_and_destination(BufferId::A);
        assert_eq!(source[[1, 1]], 1.0);
        destination[[1, 1]] = 42.0;
        assert_eq!(pair.get(BufferId::A)[[1, 1]], 42.0);

        let (source, _destination) = pair.source_and_destination(BufferId::B);
        assert_eq!(source[[1, 1]], 42.0);
    }

    #[test]
    fn layout_is_normalized() {
        let transposed = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]].reversed_axes();
        assert!(!transposed.is_standard_layout());
        let pair = BufferPair::new(transposed.clone());
        assert!(pair.get(BufferId::A).is_standard_layout());
        assert_eq!(pair.get(BufferId::B), &transposed);
        assert_eq!(pair.into_grid(BufferId::B), transposed);
    }

    #[test]
    fn mutable_access_keeps_layout() {
        let transposed = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]].reversed_axes();
        let mut pair = BufferPair::new(Grid::zeros((3, 3)));
        for mut grid in pair.grids_mut() {
            grid.assign(&transposed);
        }
        for id in [BufferId::A, BufferId::B] {
            assert!(pair.get(id).is_standard_layout());
            assert_eq!(pair.get(id), &transposed);
        }
    }
}

//! Buffer pair shared by all workers of a run

use crate::partition::RowBand;
use data::{
    buffers::{BufferId, BufferPair},
    Precision, FIRST_INTERIOR,
};
use ndarray::{ArrayView2, ArrayViewMut2};
use std::marker::PhantomData;

/// Buffer pair that every worker can read and write concurrently
///
/// No locking is involved: soundness relies on workers following the barrier
/// protocol, see [`SharedBuffers::relax_band()`].
pub(crate) struct SharedBuffers<'buffers> {
    /// Pointers to the first cell of buffers A and B
    grids: [*mut Precision; 2],

    /// Number of rows and columns of each buffer
    dimension: usize,

    /// Exclusive borrow of the underlying buffers
    buffers: PhantomData<&'buffers mut BufferPair>,
}
//
// SAFETY: Access to the pointed-to cells is synchronized by the barrier
//         protocol, as required by the unsafe methods below.
unsafe impl Send for SharedBuffers<'_> {}
unsafe impl Sync for SharedBuffers<'_> {}
//
impl<'buffers> SharedBuffers<'buffers> {
    /// Share a pair of square `dimension x dimension` buffers
    pub fn new(buffers: &'buffers mut BufferPair, dimension: usize) -> Self {
        assert_eq!(buffers.shapes(), [[dimension; 2]; 2]);
        // BufferPair keeps its grids in standard layout
        let grids = buffers.grids_mut().map(|mut grid| {
            debug_assert!(grid.is_standard_layout());
            grid.as_mut_ptr()
        });
        Self {
            grids,
            dimension,
            buffers: PhantomData,
        }
    }

    /// Relax `band` of buffer `destination`, reading from the other buffer
    ///
    /// Returns the largest absolute change of a cell within the band.
    ///
    /// # Safety
    ///
    /// For the duration of the call...
    ///
    /// - No other thread may write to the source buffer.
    /// - No other thread may access the rows of `band` in `destination`.
    /// - `band` must only cover interior rows.
    ///
    /// Workers uphold this by owning disjoint bands, and by all relaxing into
    /// the same destination buffer between the same pair of barriers.
    pub unsafe fn relax_band(&self, destination: BufferId, band: RowBand) -> Precision {
        let dimension = self.dimension;
        assert!(band.start >= FIRST_INTERIOR && band.end < dimension);
        let source_ptr = self.grids[destination.other().index()];
        let destination_ptr = self.grids[destination.index()];

        // SAFETY: Pointers target live row-major buffers of the right shape,
        //         aliasing is ruled out by the caller.
        let (source, band_view) = unsafe {
            (
                ArrayView2::from_shape_ptr((dimension, dimension), source_ptr.cast_const()),
                ArrayViewMut2::from_shape_ptr(
                    (band.len(), dimension),
                    destination_ptr.add(band.start * dimension),
                ),
            )
        };
        compute::cpu::relax_band(source, band_view, band.start)
    }
}

//! Uniform acceleration grid for Poisson-disk neighbour rejection.
//!
//! Cells have side `min_dist / √2`, so a cell can hold at most one point that respects
//! `min_dist`, and any two points closer than `min_dist` sit at most two cells apart.
//! Cells store indices into the caller's point arena, never the points themselves.
use glam::DVec2;

/// Chebyshev radius, in cells, scanned by [`SpatialGrid::is_far_enough`].
pub const NEIGHBOUR_REACH: usize = 2;

/// A 2D grid of cells each holding at most one accepted point index.
#[derive(Clone, Debug)]
pub struct SpatialGrid {
    cell_size: f64,
    width: usize,
    height: usize,
    cells: Vec<Option<u32>>,
}

impl SpatialGrid {
    /// Creates an empty grid covering `[0, extent.x) × [0, extent.y)`.
    pub fn new(extent: DVec2, min_dist: f64) -> Self {
        debug_assert!(min_dist > 0.0);
        let cell_size = min_dist / std::f64::consts::SQRT_2;
        let width = ((extent.x / cell_size).ceil() as usize).max(1);
        let height = ((extent.y / cell_size).ceil() as usize).max(1);

        Self {
            cell_size,
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Grid size in cells as `(width, height)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Cell coordinates containing `p`, clamped onto the grid.
    #[inline]
    pub fn cell_of(&self, p: DVec2) -> (usize, usize) {
        let x = ((p.x / self.cell_size).floor() as isize).clamp(0, self.width as isize - 1);
        let y = ((p.y / self.cell_size).floor() as isize).clamp(0, self.height as isize - 1);
        (x as usize, y as usize)
    }

    #[inline]
    fn cell_index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Index stored in the cell containing `p`, if any.
    pub fn occupant(&self, p: DVec2) -> Option<u32> {
        let (x, y) = self.cell_of(p);
        self.cells[self.cell_index(x, y)]
    }

    /// Stores `index` in the cell containing `p`, returning the index it replaced.
    ///
    /// A replaced occupant is not an error; it stays in the caller's arena but is
    /// no longer visible to neighbour queries.
    pub fn insert(&mut self, p: DVec2, index: u32) -> Option<u32> {
        let (x, y) = self.cell_of(p);
        let idx = self.cell_index(x, y);
        self.cells[idx].replace(index)
    }

    /// Returns `false` as soon as an occupant within [`NEIGHBOUR_REACH`] cells of
    /// `candidate` lies strictly closer than `dist`.
    pub fn is_far_enough(&self, points: &[DVec2], candidate: DVec2, dist: f64) -> bool {
        let dist_squared = dist * dist;
        let (gx, gy) = self.cell_of(candidate);
        let start_x = gx.saturating_sub(NEIGHBOUR_REACH);
        let end_x = (gx + NEIGHBOUR_REACH + 1).min(self.width);
        let start_y = gy.saturating_sub(NEIGHBOUR_REACH);
        let end_y = (gy + NEIGHBOUR_REACH + 1).min(self.height);

        for y in start_y..end_y {
            for x in start_x..end_x {
                let Some(index) = self.cells[self.cell_index(x, y)] else {
                    continue;
                };
                let Some(existing) = points.get(index as usize) else {
                    continue;
                };
                if candidate.distance_squared(*existing) < dist_squared {
                    return false;
                }
            }
        }

        true
    }
}

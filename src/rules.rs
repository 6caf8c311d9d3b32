use crate::grid::{CellSource, Grid};

/// Where a cell sits relative to the grid border.
///
/// Each region carries the neighbor offsets that stay inside the grid, so the
/// counter never has to bounds-check individual lookups.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region {
    TopLeft,
    Top,
    TopRight,
    Left,
    Interior,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

const TOP_LEFT: [(isize, isize); 3] = [(0, 1), (1, 0), (1, 1)];
const TOP_RIGHT: [(isize, isize); 3] = [(0, -1), (1, -1), (1, 0)];
const BOTTOM_LEFT: [(isize, isize); 3] = [(-1, 0), (-1, 1), (0, 1)];
const BOTTOM_RIGHT: [(isize, isize); 3] = [(-1, -1), (-1, 0), (0, -1)];
const TOP: [(isize, isize); 5] = [(0, -1), (0, 1), (1, -1), (1, 0), (1, 1)];
const BOTTOM: [(isize, isize); 5] = [(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1)];
const LEFT: [(isize, isize); 5] = [(-1, 0), (-1, 1), (0, 1), (1, 0), (1, 1)];
const RIGHT: [(isize, isize); 5] = [(-1, -1), (-1, 0), (0, -1), (1, -1), (1, 0)];
#[rustfmt::skip]
const INTERIOR: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

impl Region {
    pub fn classify(row: usize, col: usize, size: usize) -> Region {
        debug_assert!(size >= 2, "a {size}x{size} grid has no border regions");
        debug_assert!(row < size && col < size, "cell ({row}, {col}) outside {size}x{size} grid");
        let last = size - 1;
        match (row == 0, row == last, col == 0, col == last) {
            (true, _, true, _) => Region::TopLeft,
            (true, _, _, true) => Region::TopRight,
            (true, _, _, _) => Region::Top,
            (_, true, true, _) => Region::BottomLeft,
            (_, true, _, true) => Region::BottomRight,
            (_, true, _, _) => Region::Bottom,
            (_, _, true, _) => Region::Left,
            (_, _, _, true) => Region::Right,
            _ => Region::Interior,
        }
    }

    pub fn offsets(self) -> &'static [(isize, isize)] {
        match self {
            Region::TopLeft => &TOP_LEFT,
            Region::Top => &TOP,
            Region::TopRight => &TOP_RIGHT,
            Region::Left => &LEFT,
            Region::Interior => &INTERIOR,
            Region::Right => &RIGHT,
            Region::BottomLeft => &BOTTOM_LEFT,
            Region::Bottom => &BOTTOM,
            Region::BottomRight => &BOTTOM_RIGHT,
        }
    }

    pub fn neighbor_count(self) -> usize {
        self.offsets().len()
    }
}

/// Number of alive neighbors of `(row, col)`, in `0..=8`. The grid does not
/// wrap: border cells simply have fewer neighbors.
pub fn count_alive_neighbors<G: CellSource + ?Sized>(grid: &G, row: usize, col: usize) -> u8 {
    let size = grid.size();
    // 1x1 の盤面には隣接セルが存在しない
    if size < 2 {
        return 0;
    }
    Region::classify(row, col, size)
        .offsets()
        .iter()
        .filter(|&&(dr, dc)| {
            let r = row.wrapping_add_signed(dr);
            let c = col.wrapping_add_signed(dc);
            grid.is_alive(r, c)
        })
        .count() as u8
}

#[inline]
pub fn next_state(alive: bool, neighbors: u8) -> bool {
    matches!((alive, neighbors), (true, 2) | (true, 3) | (false, 3))
}

#[inline]
pub fn evolve_cell<G: CellSource + ?Sized>(grid: &G, row: usize, col: usize) -> bool {
    next_state(grid.is_alive(row, col), count_alive_neighbors(grid, row, col))
}

/// Writes the next generation of `row` into `dst_row` and returns how many of
/// its cells are alive.
pub fn evolve_row(src: &Grid, row: usize, dst_row: &mut [bool]) -> usize {
    debug_assert_eq!(dst_row.len(), src.size());
    let mut alive = 0;
    for (col, cell) in dst_row.iter_mut().enumerate() {
        *cell = evolve_cell(src, row, col);
        alive += usize::from(*cell);
    }
    alive
}

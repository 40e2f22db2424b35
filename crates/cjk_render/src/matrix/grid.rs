use std::fmt::Display;

use log::warn;
use serde::ser::{Serialize, SerializeSeq, Serializer};

/// Row-major matrix of cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T> Default for Grid<T> {
    fn default() -> Self {
        Self { width: 0, height: 0, cells: Vec::new() }
    }
}

impl<T> Grid<T> {
    pub fn new(width: usize, height: usize, cells: Vec<T>) -> Self {
        assert_eq!(width * height, cells.len());
        Self { width, height, cells }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a grid from nested rows. All rows must share the first row's length.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(width * height);
        for row in rows {
            assert_eq!(row.len(), width, "ragged rows");
            cells.extend(row);
        }
        Self { width, height, cells }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    pub fn get(&self, row: usize, column: usize) -> Option<&T> {
        if row >= self.height || column >= self.width {
            return None;
        }
        self.cells.get(row * self.width + column)
    }

    pub fn row(&self, index: usize) -> Option<&[T]> {
        if index >= self.height {
            return None;
        }
        let start = index * self.width;
        Some(&self.cells[start..start + self.width])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.height).filter_map(move |index| self.row(index))
    }

    /// Append `other` to the right of this grid, row by row.
    ///
    /// An empty grid adopts `other` as is and appending an empty grid is a
    /// no-op. Grids of different heights keep only the rows they share.
    pub fn append_columns(&mut self, other: Grid<T>) {
        if self.height == 0 {
            *self = other;
            return;
        }
        if other.height == 0 && other.width == 0 {
            return;
        }

        let height = self.height.min(other.height);
        if height != self.height || height != other.height {
            warn!(
                "concatenating grids of height {} and {}, keeping {height} rows",
                self.height, other.height
            );
        }

        let width = self.width + other.width;
        let mut cells = Vec::with_capacity(width * height);
        let mut left = std::mem::take(&mut self.cells).into_iter();
        let mut right = other.cells.into_iter();

        for _ in 0..height {
            cells.extend(left.by_ref().take(self.width));
            cells.extend(right.by_ref().take(other.width));
        }

        self.width = width;
        self.height = height;
        self.cells = cells;
    }
}

impl<T: Clone> Grid<T> {
    pub fn to_nested(&self) -> Vec<Vec<T>> {
        self.rows().map(<[T]>::to_vec).collect()
    }
}

impl<T: Display> Grid<T> {
    /// Each row with its cells concatenated through `Display`.
    pub fn text_rows(&self) -> impl Iterator<Item = String> + '_ {
        self.rows().map(|row| row.iter().map(ToString::to_string).collect::<String>())
    }
}

impl<T: Serialize> Serialize for Grid<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.height))?;
        for row in self.rows() {
            seq.serialize_element(row)?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_to_empty_adopts_other() {
        let mut grid = Grid::empty();
        grid.append_columns(Grid::new(2, 1, vec![1u8, 0]));
        assert_eq!(grid, Grid::new(2, 1, vec![1, 0]));
    }

    #[test]
    fn append_columns_keeps_rows_aligned() {
        let mut grid = Grid::from_rows(vec![vec![1u8, 1], vec![0, 0]]);
        grid.append_columns(Grid::from_rows(vec![vec![0, 0, 0], vec![1, 1, 1]]));

        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.to_nested(), vec![vec![1, 1, 0, 0, 0], vec![0, 0, 1, 1, 1]]);
    }

    #[test]
    fn mismatched_heights_keep_shared_rows() {
        let mut grid = Grid::from_rows(vec![vec![1u8], vec![1], vec![1]]);
        grid.append_columns(Grid::from_rows(vec![vec![0u8, 0], vec![0, 0]]));

        assert_eq!((grid.width(), grid.height()), (3, 2));
        assert_eq!(grid.cells().len(), 6);
        assert_eq!(grid.to_nested(), vec![vec![1, 0, 0], vec![1, 0, 0]]);

        grid.append_columns(Grid::from_rows(vec![vec![1u8]; 4]));
        grid.append_columns(Grid::empty());
        assert_eq!(grid.rows().count(), 2);
        assert_eq!(grid.row(1), Some(&[1u8, 0, 0, 1][..]));
    }

    #[test]
    fn text_rows_join_cells() {
        let grid = Grid::from_rows(vec![vec![1u8, 0, 1], vec![0, 1, 0]]);
        let rows: Vec<String> = grid.text_rows().collect();
        assert_eq!(rows, vec!["101", "010"]);
    }

    #[test]
    fn serializes_as_nested_rows() {
        let grid = Grid::from_rows(vec![vec!['⣿', '⠀']]);
        assert_eq!(serde_json::to_string(&grid).unwrap(), r#"[["⣿","⠀"]]"#);
        assert_eq!(serde_json::to_string(&Grid::<u8>::empty()).unwrap(), "[]");
    }

    #[test]
    fn out_of_range_lookups() {
        let grid = Grid::new(2, 2, vec![0u8, 1, 1, 0]);
        assert_eq!(grid.get(1, 0), Some(&1));
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.get(0, 2), None);
        assert!(grid.row(2).is_none());
    }
}

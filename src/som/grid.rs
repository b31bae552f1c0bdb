//! Square grid storage addressable both as a flat sequence and by coordinates.

use crate::error::{Result, SomColorError};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// A cell position on a square grid.
///
/// `x` selects the row and `y` the column, so the flat index is `x * stride + y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Row.
    pub x: usize,
    /// Column.
    pub y: usize,
}

impl Position {
    /// Creates a new position.
    #[inline]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Euclidean distance between two grid positions.
    #[inline]
    pub fn distance(&self, other: &Position) -> f64 {
        let dx = self.x as f64 - other.x as f64;
        let dy = self.y as f64 - other.y as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A square 2D grid backed by a single row-major vector.
///
/// The side length (`stride`) is the exact integer square root of the
/// backing length; construction fails otherwise. Deserialization goes
/// through the same check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid<T>")]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct GridBuffer<T> {
    stride: usize,
    cells: Vec<T>,
}

/// Unchecked serialized form of a [`GridBuffer`].
#[derive(Deserialize)]
struct RawGrid<T> {
    stride: usize,
    cells: Vec<T>,
}

impl<T> TryFrom<RawGrid<T>> for GridBuffer<T> {
    type Error = SomColorError;

    fn try_from(raw: RawGrid<T>) -> Result<Self> {
        let len = raw.cells.len();
        let grid = Self::from_vec(raw.cells)?;
        if grid.stride != raw.stride {
            return Err(SomColorError::NonSquareGrid { len });
        }
        Ok(grid)
    }
}

impl<T> GridBuffer<T> {
    /// Wraps a flat sequence whose length is a non-zero perfect square.
    pub fn from_vec(cells: Vec<T>) -> Result<Self> {
        let len = cells.len();
        let stride = exact_sqrt(len).ok_or(SomColorError::NonSquareGrid { len })?;
        Ok(Self { stride, cells })
    }

    /// Builds a `stride x stride` grid by calling `f` for every position in row-major order.
    pub fn from_fn<F>(stride: usize, mut f: F) -> Result<Self>
    where
        F: FnMut(Position) -> T,
    {
        if stride == 0 {
            return Err(SomColorError::NonSquareGrid { len: 0 });
        }
        let cells = (0..stride * stride)
            .map(|i| f(Position::new(i / stride, i % stride)))
            .collect();
        Ok(Self { stride, cells })
    }

    /// Side length of the grid.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false for a constructed grid; present for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Converts a position to its flat index.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is outside `[0, stride)`.
    #[inline]
    pub fn index_of(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.stride && y < self.stride,
            "position ({}, {}) out of bounds for grid stride {}",
            x,
            y,
            self.stride
        );
        x * self.stride + y
    }

    /// Converts a flat index to its position.
    #[inline]
    pub fn position_of(&self, index: usize) -> Position {
        Position::new(index / self.stride, index % self.stride)
    }

    /// Returns the cell at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is outside `[0, stride)`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> &T {
        &self.cells[self.index_of(x, y)]
    }

    /// Overwrites the cell at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is outside `[0, stride)`.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        let idx = self.index_of(x, y);
        self.cells[idx] = value;
    }

    /// Returns a uniformly random cell, drawing the row then the column.
    pub fn sample_random<R: Rng>(&self, rng: &mut R) -> &T {
        let x = rng.gen_range(0..self.stride);
        let y = rng.gen_range(0..self.stride);
        self.get(x, y)
    }

    /// Iterates cells in row-major order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.cells.iter()
    }

    /// The backing storage in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    /// Consumes the grid, returning its backing storage.
    pub fn into_vec(self) -> Vec<T> {
        self.cells
    }
}

impl<T: Clone> GridBuffer<T> {
    /// Creates a `stride x stride` grid with every cell set to `value`.
    pub fn filled(stride: usize, value: T) -> Result<Self> {
        Self::from_fn(stride, |_| value.clone())
    }
}

impl<T> Index<usize> for GridBuffer<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.cells[index]
    }
}

impl<T> IndexMut<usize> for GridBuffer<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.cells[index]
    }
}

/// Integer square root of `len` when `len` is a non-zero perfect square.
fn exact_sqrt(len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let mut root = (len as f64).sqrt() as usize;
    // float sqrt can be off by one for large inputs
    while root * root > len {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= len {
        root += 1;
    }
    (root * root == len).then_some(root)
}

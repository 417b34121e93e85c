//! # Embedding Matrix

use serde::{Deserialize, Serialize};

use crate::errors::{WTResult, WordtableError};

/// A dense, row-major ``(rows, dim)`` table of f32 values.
///
/// Row `i` holds the vector of the token with id `i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingMatrix {
    rows: usize,
    dim: usize,
    data: Vec<f32>,
}

impl EmbeddingMatrix {
    /// Create a zero-filled matrix.
    ///
    /// ## Returns
    /// A `MatrixTooLarge` error if ``rows * dim`` overflows or cannot be allocated.
    pub fn zeros(
        rows: usize,
        dim: usize,
    ) -> WTResult<Self> {
        let too_large = || WordtableError::MatrixTooLarge { rows, dim };

        let len = rows.checked_mul(dim).ok_or_else(too_large)?;
        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|_| too_large())?;
        data.resize(len, 0.0);

        Ok(Self { rows, dim, data })
    }

    /// The ``(rows, dim)`` shape.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.dim)
    }

    /// The number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The row width.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Get row `idx`.
    pub fn row(
        &self,
        idx: usize,
    ) -> Option<&[f32]> {
        if idx < self.rows {
            Some(&self.data[idx * self.dim..(idx + 1) * self.dim])
        } else {
            None
        }
    }

    /// Get mutable row `idx`.
    ///
    /// ## Panics
    /// If `idx` is out of range.
    pub fn row_mut(
        &mut self,
        idx: usize,
    ) -> &mut [f32] {
        &mut self.data[idx * self.dim..(idx + 1) * self.dim]
    }

    /// The flat, mutable row-major data.
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Iterate rows in id order.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f32]> {
        (0..self.rows).map(|idx| &self.data[idx * self.dim..(idx + 1) * self.dim])
    }

    /// The flat row-major data.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Consume the matrix, returning the flat row-major data.
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }
}

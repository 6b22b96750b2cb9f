//! An immutable, rectangular collection of observation vectors.

use crate::error::Error;
use nalgebra::DVector;

#[derive(Clone, Debug)]
pub struct Dataset {
    rows: Vec<DVector<f64>>,
    dim: usize,
}

impl Dataset {
    pub fn new(rows: Vec<DVector<f64>>) -> Result<Self, Error> {
        let dim = rows
            .first()
            .ok_or_else(|| Error::InvalidBuilder("dataset must contain at least one row".into()))?
            .len();
        for row in &rows {
            if row.len() != dim {
                return Err(Error::DimensionMismatch {
                    expected: dim,
                    found: row.len(),
                });
            }
        }
        Ok(Self { rows, dim })
    }

    pub fn size(&self) -> usize {
        self.rows.len()
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn rows(&self) -> &[DVector<f64>] {
        &self.rows
    }
}

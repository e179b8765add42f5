use arff::dynamic::de::from_dataset;
use arff::dynamic::DataSet as ArffDataSet;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use num_traits::AsPrimitive;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// Feature matrix (one sample per row) together with one class label per row
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset<L> {
    x: Array2<f64>,
    y: Array1<L>,
}

impl<L: Clone> Dataset<L> {
    pub fn new(x: Array2<f64>, y: Array1<L>) -> Result<Self> {
        if x.nrows() != y.len() {
            return Err(Error::ShapeMismatch {
                expected: x.nrows(),
                found: y.len(),
            });
        }
        Ok(Dataset { x, y })
    }

    /// build from rows of any primitive numeric type
    pub fn from_rows<T>(rows: &[Vec<T>], y: Vec<L>) -> Result<Self>
    where
        T: AsPrimitive<f64>,
    {
        let n_cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * n_cols);
        for row in rows {
            if row.len() != n_cols {
                return Err(Error::ShapeMismatch {
                    expected: n_cols,
                    found: row.len(),
                });
            }
            data.extend(row.iter().map(|&v| v.as_()));
        }

        let x = shaped(rows.len(), n_cols, data)?;
        Dataset::new(x, Array1::from(y))
    }

    /// Parse an ARFF document and split column `target` off as the labels.
    ///
    /// All remaining columns must be numeric.
    pub fn from_arff(text: &str, target: &str) -> Result<Self>
    where
        L: DeserializeOwned,
    {
        let data = ArffDataSet::from_str(text)?;
        let (dx, dy) = data.split_one(target);

        let x: Vec<f64> = from_dataset(&dx)?;
        let y: Vec<L> = from_dataset(&dy)?;

        let n_cols = dx.n_cols();
        let x = shaped(y.len(), n_cols, x)?;
        Dataset::new(x, Array1::from(y))
    }

    pub fn x(&self) -> ArrayView2<f64> {
        self.x.view()
    }

    pub fn y(&self) -> ArrayView1<L> {
        self.y.view()
    }

    pub fn n_rows(&self) -> usize {
        self.y.len()
    }

    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    /// Copy out the rows named by `ids`, in that order
    pub fn select(&self, ids: &[usize]) -> (Array2<f64>, Array1<L>) {
        select_rows(self.x.view(), self.y.view(), ids)
    }
}

/// Subset of `x` and `y` at the rows `ids`
pub fn select_rows<L: Clone>(
    x: ArrayView2<f64>,
    y: ArrayView1<L>,
    ids: &[usize],
) -> (Array2<f64>, Array1<L>) {
    (x.select(Axis(0), ids), y.select(Axis(0), ids))
}

fn shaped(rows: usize, cols: usize, data: Vec<f64>) -> Result<Array2<f64>> {
    let found = data.len();
    Array2::from_shape_vec((rows, cols), data).map_err(|_| Error::ShapeMismatch {
        expected: rows * cols,
        found,
    })
}

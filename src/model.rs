//! The contract a classifier must satisfy to be cross-validated.

use ndarray::{Array1, ArrayView1, ArrayView2};

use crate::error::Result;

/// A trainable, prunable classifier over labels of type `L`.
///
/// One instance is refit on every fold, so `fit` must discard everything
/// learned before. Evaluation drives a single `&mut` handle through the folds
/// in sequence; no two folds run against the same model at once.
pub trait Classifier<L> {
    /// Train from scratch on `x` (one sample per row) with labels `y`.
    fn fit(&mut self, x: ArrayView2<f64>, y: ArrayView1<L>) -> Result<()>;

    /// One label per row of `x`.
    fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<L>>;

    /// Adjust a fitted model toward better performance on the validation split.
    fn prune(
        &mut self,
        x_train: ArrayView2<f64>,
        y_train: ArrayView1<L>,
        x_val: ArrayView2<f64>,
        y_val: ArrayView1<L>,
    ) -> Result<()>;
}

impl<'m, L, M> Classifier<L> for &'m mut M
where
    M: Classifier<L> + ?Sized,
{
    fn fit(&mut self, x: ArrayView2<f64>, y: ArrayView1<L>) -> Result<()> {
        (**self).fit(x, y)
    }

    fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<L>> {
        (**self).predict(x)
    }

    fn prune(
        &mut self,
        x_train: ArrayView2<f64>,
        y_train: ArrayView1<L>,
        x_val: ArrayView2<f64>,
        y_val: ArrayView1<L>,
    ) -> Result<()> {
        (**self).prune(x_train, y_train, x_val, y_val)
    }
}
